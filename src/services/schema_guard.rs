//! Idempotent schema bootstrap.
//!
//! Every store calls `ensure_table` before touching its table, so reads and
//! writes never race table creation; `ensure_all` runs the same guard for
//! every managed table at startup. Re-running any of it is a no-op. A guard
//! failure is fatal to the calling operation and surfaced, never retried.

use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Schema, Statement};

use crate::entities::{company_overviews, customers, invoices, stocks};
use crate::error::StoreError;

/// Tables owned by this layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagedTable {
    Customers,
    Invoices,
    Stocks,
    CompanyOverviews,
}

pub async fn ensure_all(db: &DatabaseConnection) -> Result<(), StoreError> {
    for table in [
        ManagedTable::Customers,
        ManagedTable::Invoices,
        ManagedTable::Stocks,
        ManagedTable::CompanyOverviews,
    ] {
        ensure_table(db, table).await?;
    }
    Ok(())
}

/// Create the table, its prerequisite extension and any supporting unique
/// index if absent. Safe to call before every operation.
pub async fn ensure_table(db: &DatabaseConnection, table: ManagedTable) -> Result<(), StoreError> {
    let backend = db.get_database_backend();

    // uuid primary keys; the extension is a precondition of the original
    // schema and harmless to re-create
    if backend == DbBackend::Postgres {
        db.execute(Statement::from_string(
            backend,
            r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp""#,
        ))
        .await
        .map_err(|e| StoreError::db("failed to ensure database schema", e))?;
    }

    let schema = Schema::new(backend);
    let mut create = match table {
        ManagedTable::Customers => schema.create_table_from_entity(customers::Entity),
        ManagedTable::Invoices => schema.create_table_from_entity(invoices::Entity),
        ManagedTable::Stocks => schema.create_table_from_entity(stocks::Entity),
        ManagedTable::CompanyOverviews => {
            schema.create_table_from_entity(company_overviews::Entity)
        }
    };
    create.if_not_exists();

    db.execute(backend.build(&create))
        .await
        .map_err(|e| StoreError::db("failed to ensure database schema", e))?;

    // One row per (symbol, date); the upsert conflict target
    if table == ManagedTable::Stocks {
        let index = Index::create()
            .if_not_exists()
            .name("idx_stocks_symbol_date")
            .table(stocks::Entity)
            .col(stocks::Column::Symbol)
            .col(stocks::Column::Date)
            .unique()
            .to_owned();

        db.execute(backend.build(&index))
            .await
            .map_err(|e| StoreError::db("failed to ensure database schema", e))?;
    }

    Ok(())
}
