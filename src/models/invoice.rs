use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::invoices::InvoiceStatus;

/// Query parameters for the filtered invoice search
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceSearchQuery {
    #[serde(default)]
    pub query: String,
    pub page: Option<u64>,
}

impl InvoiceSearchQuery {
    /// 1-based page number; anything below 1 is treated as the first page.
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// One row of the paginated invoice table: invoice fields joined with the
/// owning customer.
#[derive(Debug, Clone, FromQueryResult, Serialize, Deserialize)]
pub struct InvoiceTableRow {
    pub id: Uuid,
    pub amount: i32,
    pub date: chrono::NaiveDate,
    pub status: InvoiceStatus,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// One of the five most recent invoices shown on the dashboard
#[derive(Debug, Clone, FromQueryResult, Serialize, Deserialize)]
pub struct LatestInvoice {
    pub id: Uuid,
    pub amount: i32,
    pub name: String,
    pub image_url: String,
    pub email: String,
}

/// Single-invoice lookup. The amount is converted from minor to major
/// currency units at this boundary only; storage stays in minor units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceForm {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: f64,
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoicePagesResponse {
    pub pages: u64,
}
