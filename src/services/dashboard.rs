//! Dashboard summary aggregation.
//!
//! Three independent queries are issued concurrently and joined; the
//! summary is assembled only once all three have completed, and any single
//! failure fails the whole aggregate.

use sea_orm::{DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QuerySelect};

use crate::entities::invoices::InvoiceStatus;
use crate::entities::prelude::*;
use crate::error::StoreError;
use crate::models::dashboard::CardData;
use crate::services::invoices::summed_amount;
use crate::services::schema_guard::{self, ManagedTable};

#[derive(Debug, FromQueryResult)]
struct StatusTotals {
    paid: i64,
    pending: i64,
}

pub async fn fetch_card_data(db: &DatabaseConnection) -> Result<CardData, StoreError> {
    schema_guard::ensure_table(db, ManagedTable::Customers).await?;
    schema_guard::ensure_table(db, ManagedTable::Invoices).await?;

    let invoice_count = Invoices::find().count(db);
    let customer_count = Customers::find().count(db);
    let status_totals = Invoices::find()
        .select_only()
        .column_as(summed_amount(InvoiceStatus::Paid), "paid")
        .column_as(summed_amount(InvoiceStatus::Pending), "pending")
        .into_model::<StatusTotals>()
        .one(db);

    // join semantics: all three complete before the summary is assembled
    let (invoice_count, customer_count, status_totals) =
        tokio::join!(invoice_count, customer_count, status_totals);

    let number_of_invoices =
        invoice_count.map_err(|e| StoreError::db("failed to count invoices", e))?;
    let number_of_customers =
        customer_count.map_err(|e| StoreError::db("failed to count customers", e))?;
    let totals = status_totals
        .map_err(|e| StoreError::db("failed to total invoice amounts", e))?
        .unwrap_or(StatusTotals { paid: 0, pending: 0 });

    Ok(CardData {
        number_of_invoices,
        number_of_customers,
        total_paid_invoices: totals.paid,
        total_pending_invoices: totals.pending,
    })
}
