//! Company overview store: one row per ticker symbol, merge-upserted.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::{company_overviews, prelude::*};
use crate::error::StoreError;
use crate::models::stock::{CompanyOverviewData, OverviewInput};
use crate::services::schema_guard::{self, ManagedTable};
use crate::services::symbols::normalize_symbol;

/// Upsert the overview for one symbol. On conflict every descriptive field
/// is replaced and updated_at refreshed; there is never more than one row
/// per symbol. Returns the normalized symbol used as the key.
pub async fn store_company_overview(
    db: &DatabaseConnection,
    symbol: &str,
    input: &OverviewInput,
) -> Result<String, StoreError> {
    schema_guard::ensure_table(db, ManagedTable::CompanyOverviews).await?;

    let symbol = normalize_symbol(symbol);

    let model = company_overviews::ActiveModel {
        id: Set(Uuid::new_v4()),
        symbol: Set(symbol.clone()),
        asset_type: Set(input.asset_type.clone()),
        name: Set(input.name.clone()),
        description: Set(input.description.clone()),
        exchange: Set(input.exchange.clone()),
        sector: Set(input.sector.clone()),
        industry: Set(input.industry.clone()),
        market_capitalization: Set(input.market_capitalization.clone()),
        updated_at: Set(Some(chrono::Utc::now().fixed_offset())),
    };

    CompanyOverviews::insert(model)
        .on_conflict(
            OnConflict::column(company_overviews::Column::Symbol)
                .update_columns([
                    company_overviews::Column::AssetType,
                    company_overviews::Column::Name,
                    company_overviews::Column::Description,
                    company_overviews::Column::Exchange,
                    company_overviews::Column::Sector,
                    company_overviews::Column::Industry,
                    company_overviews::Column::MarketCapitalization,
                    company_overviews::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map_err(|e| StoreError::db("failed to store company overview", e))?;

    tracing::debug!("Stored company overview for {}", symbol);

    Ok(symbol)
}

/// Fetch the stored overview for one symbol. Absence is `None`, not an
/// error.
pub async fn fetch_company_overview(
    db: &DatabaseConnection,
    symbol: &str,
) -> Result<Option<CompanyOverviewData>, StoreError> {
    schema_guard::ensure_table(db, ManagedTable::CompanyOverviews).await?;

    let symbol = normalize_symbol(symbol);

    let row = CompanyOverviews::find()
        .filter(company_overviews::Column::Symbol.eq(&symbol))
        .one(db)
        .await
        .map_err(|e| StoreError::db("failed to fetch company overview", e))?;

    Ok(row.map(CompanyOverviewData::from))
}
