//! Filtered, paginated invoice queries.
//!
//! The search string is matched case-insensitively against customer name,
//! customer email, the amount and date rendered as text, and the status:
//! the OR of all five, the way the dashboard search box behaves.

use sea_orm::sea_query::{Alias, Expr, ExprTrait, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use uuid::Uuid;

use crate::entities::invoices::InvoiceStatus;
use crate::entities::{customers, invoices, prelude::*};
use crate::error::StoreError;
use crate::models::invoice::{InvoiceForm, InvoiceTableRow, LatestInvoice};
use crate::services::schema_guard::{self, ManagedTable};

pub const ITEMS_PER_PAGE: u64 = 6;

pub fn total_pages(matching_rows: u64) -> u64 {
    matching_rows.div_ceil(ITEMS_PER_PAGE)
}

/// SUM(amount) restricted to one status, coalesced to zero so customers
/// and summaries without matching invoices aggregate to 0 rather than NULL.
pub(crate) fn summed_amount(status: InvoiceStatus) -> SimpleExpr {
    let case = Expr::case(
        invoices::Column::Status.eq(status),
        Expr::col((invoices::Entity, invoices::Column::Amount)),
    )
    .finally(Expr::val(0));
    Func::coalesce([Func::sum(case).into(), Expr::val(0i64).into()]).into()
}

/// Case-insensitive substring match: lower(expr) LIKE lower(%query%)
pub(crate) fn matches_insensitive<E>(expr: E, pattern: &str) -> SimpleExpr
where
    E: Into<SimpleExpr>,
{
    Expr::expr(Func::lower(expr.into())).like(pattern.to_lowercase())
}

fn search_filter(query: &str) -> Condition {
    let pattern = format!("%{}%", query);
    Condition::any()
        .add(matches_insensitive(
            Expr::col((customers::Entity, customers::Column::Name)),
            &pattern,
        ))
        .add(matches_insensitive(
            Expr::col((customers::Entity, customers::Column::Email)),
            &pattern,
        ))
        .add(matches_insensitive(
            Expr::col((invoices::Entity, invoices::Column::Amount)).cast_as(Alias::new("text")),
            &pattern,
        ))
        .add(matches_insensitive(
            Expr::col((invoices::Entity, invoices::Column::Date)).cast_as(Alias::new("text")),
            &pattern,
        ))
        .add(matches_insensitive(
            Expr::col((invoices::Entity, invoices::Column::Status)).cast_as(Alias::new("text")),
            &pattern,
        ))
}

/// One page (6 rows) of the invoice table matching `query`, newest first.
/// Pages are 1-based.
pub async fn fetch_filtered_invoices(
    db: &DatabaseConnection,
    query: &str,
    page: u64,
) -> Result<Vec<InvoiceTableRow>, StoreError> {
    schema_guard::ensure_table(db, ManagedTable::Customers).await?;
    schema_guard::ensure_table(db, ManagedTable::Invoices).await?;

    let offset = (page.max(1) - 1) * ITEMS_PER_PAGE;

    Invoices::find()
        .select_only()
        .column(invoices::Column::Id)
        .column(invoices::Column::Amount)
        .column(invoices::Column::Date)
        .column(invoices::Column::Status)
        .column(customers::Column::Name)
        .column(customers::Column::Email)
        .column(customers::Column::ImageUrl)
        .join(JoinType::InnerJoin, invoices::Relation::Customers.def())
        .filter(search_filter(query))
        .order_by(invoices::Column::Date, Order::Desc)
        .limit(ITEMS_PER_PAGE)
        .offset(offset)
        .into_model::<InvoiceTableRow>()
        .all(db)
        .await
        .map_err(|e| StoreError::db("failed to fetch invoices", e))
}

/// Number of pages the same filter would produce.
pub async fn fetch_invoices_pages(
    db: &DatabaseConnection,
    query: &str,
) -> Result<u64, StoreError> {
    schema_guard::ensure_table(db, ManagedTable::Customers).await?;
    schema_guard::ensure_table(db, ManagedTable::Invoices).await?;

    let count = Invoices::find()
        .join(JoinType::InnerJoin, invoices::Relation::Customers.def())
        .filter(search_filter(query))
        .count(db)
        .await
        .map_err(|e| StoreError::db("failed to count invoices", e))?;

    Ok(total_pages(count))
}

/// Single invoice lookup. The amount leaves this function in major
/// currency units; everywhere else it stays in minor units.
pub async fn fetch_invoice_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<InvoiceForm>, StoreError> {
    schema_guard::ensure_table(db, ManagedTable::Invoices).await?;

    let invoice = Invoices::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| StoreError::db("failed to fetch invoice", e))?;

    Ok(invoice.map(|inv| InvoiceForm {
        id: inv.id,
        customer_id: inv.customer_id,
        amount: f64::from(inv.amount) / 100.0,
        status: inv.status,
    }))
}

/// The five most recent invoices with their customers, for the dashboard.
pub async fn fetch_latest_invoices(
    db: &DatabaseConnection,
) -> Result<Vec<LatestInvoice>, StoreError> {
    schema_guard::ensure_table(db, ManagedTable::Customers).await?;
    schema_guard::ensure_table(db, ManagedTable::Invoices).await?;

    Invoices::find()
        .select_only()
        .column(invoices::Column::Id)
        .column(invoices::Column::Amount)
        .column(customers::Column::Name)
        .column(customers::Column::ImageUrl)
        .column(customers::Column::Email)
        .join(JoinType::InnerJoin, invoices::Relation::Customers.def())
        .order_by(invoices::Column::Date, Order::Desc)
        .limit(5)
        .into_model::<LatestInvoice>()
        .all(db)
        .await
        .map_err(|e| StoreError::db("failed to fetch the latest invoices", e))
}
