//! Customer queries with invoice aggregates derived by join.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, Order, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

use crate::entities::invoices::InvoiceStatus;
use crate::entities::{customers, invoices, prelude::*};
use crate::error::StoreError;
use crate::models::customer::{CustomerField, CustomerWithTotals};
use crate::services::invoices::{matches_insensitive, summed_amount};
use crate::services::schema_guard::{self, ManagedTable};

/// All customers as id/name pairs, ordered by name.
pub async fn fetch_customers(db: &DatabaseConnection) -> Result<Vec<CustomerField>, StoreError> {
    schema_guard::ensure_table(db, ManagedTable::Customers).await?;

    Customers::find()
        .select_only()
        .column(customers::Column::Id)
        .column(customers::Column::Name)
        .order_by(customers::Column::Name, Order::Asc)
        .into_model::<CustomerField>()
        .all(db)
        .await
        .map_err(|e| StoreError::db("failed to fetch all customers", e))
}

/// Customers whose name or email matches `query` (case-insensitive),
/// each with invoice count and pending/paid totals from a single grouped
/// query. The join is outer: customers without invoices appear with all
/// aggregates at zero.
pub async fn fetch_filtered_customers(
    db: &DatabaseConnection,
    query: &str,
) -> Result<Vec<CustomerWithTotals>, StoreError> {
    schema_guard::ensure_table(db, ManagedTable::Customers).await?;
    schema_guard::ensure_table(db, ManagedTable::Invoices).await?;

    let pattern = format!("%{}%", query);

    Customers::find()
        .select_only()
        .column(customers::Column::Id)
        .column(customers::Column::Name)
        .column(customers::Column::Email)
        .column(customers::Column::ImageUrl)
        .column_as(invoices::Column::Id.count(), "total_invoices")
        .column_as(summed_amount(InvoiceStatus::Pending), "total_pending")
        .column_as(summed_amount(InvoiceStatus::Paid), "total_paid")
        .join(JoinType::LeftJoin, customers::Relation::Invoices.def())
        .filter(
            Condition::any()
                .add(matches_insensitive(
                    Expr::col((customers::Entity, customers::Column::Name)),
                    &pattern,
                ))
                .add(matches_insensitive(
                    Expr::col((customers::Entity, customers::Column::Email)),
                    &pattern,
                )),
        )
        .group_by(customers::Column::Id)
        .group_by(customers::Column::Name)
        .group_by(customers::Column::Email)
        .group_by(customers::Column::ImageUrl)
        .order_by(customers::Column::Name, Order::Asc)
        .into_model::<CustomerWithTotals>()
        .all(db)
        .await
        .map_err(|e| StoreError::db("failed to fetch customer table", e))
}
