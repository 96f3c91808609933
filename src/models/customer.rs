use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query parameters for the filtered customer search
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerSearchQuery {
    #[serde(default)]
    pub query: String,
}

/// Minimal customer listing entry (id + name)
#[derive(Debug, Clone, FromQueryResult, Serialize, Deserialize)]
pub struct CustomerField {
    pub id: Uuid,
    pub name: String,
}

/// Customer row with invoice aggregates derived by join. Customers without
/// invoices appear with all aggregates at zero.
#[derive(Debug, Clone, FromQueryResult, Serialize, Deserialize)]
pub struct CustomerWithTotals {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    /// Sum of pending invoice amounts in minor currency units
    pub total_pending: i64,
    /// Sum of paid invoice amounts in minor currency units
    pub total_paid: i64,
}
