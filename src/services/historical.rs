//! Historical metrics assembler.
//!
//! Converts a descending raw price window into display points annotated
//! with day-over-day percent change. One extra lookback row is fetched so
//! the oldest returned row still has a predecessor to diff against.

use rust_decimal::prelude::ToPrimitive;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect};

use crate::entities::{prelude::*, stocks};
use crate::error::StoreError;
use crate::models::stock::HistoricalPricePoint;
use crate::services::daily_prices::clamp_window;
use crate::services::schema_guard::{self, ManagedTable};
use crate::services::symbols::normalize_symbol;

pub async fn fetch_historical_prices(
    db: &DatabaseConnection,
    symbol: &str,
    limit: u64,
) -> Result<Vec<HistoricalPricePoint>, StoreError> {
    schema_guard::ensure_table(db, ManagedTable::Stocks).await?;

    let symbol = normalize_symbol(symbol);
    let window = clamp_window(limit);

    // One extra row of lookback for the change of the oldest returned row
    let rows = Stocks::find()
        .filter(stocks::Column::Symbol.eq(&symbol))
        .order_by(stocks::Column::Date, Order::Desc)
        .limit(window + 1)
        .all(db)
        .await
        .map_err(|e| StoreError::db("failed to fetch stored stock prices", e))?;

    Ok(assemble_historical(&rows, window as usize))
}

/// Pair each of the first `limit` rows with its chronological predecessor
/// (the next row in the descending slice) and compute the percent change.
/// The change is null when the predecessor is missing, its close is zero,
/// or either close does not convert to a finite number.
pub fn assemble_historical(rows: &[stocks::Model], limit: usize) -> Vec<HistoricalPricePoint> {
    rows.iter()
        .take(limit)
        .enumerate()
        .map(|(i, row)| {
            let close = row.close.to_f64().unwrap_or(f64::NAN);
            let previous_close = rows
                .get(i + 1)
                .map(|prev| prev.close.to_f64().unwrap_or(f64::NAN));

            let change_percent = match previous_close {
                Some(prev) if close.is_finite() && prev.is_finite() && prev != 0.0 => {
                    Some((close - prev) / prev * 100.0)
                }
                _ => None,
            };

            HistoricalPricePoint {
                date: row.date.format("%Y-%m-%d").to_string(),
                close,
                volume: row.volume,
                change_percent,
            }
        })
        .collect()
}
