//! SeaORM Entity for daily stock price time-series storage
//!
//! One row per (symbol, date); a later write for the same key overwrites
//! low/high/close/volume in place. The unique (symbol, date) index is
//! created by the schema guard.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stocks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Ticker symbol, normalized to trimmed uppercase before storage
    pub symbol: String,
    pub date: Date,
    #[sea_orm(column_type = "Decimal(Some((12, 4)))")]
    pub low: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 4)))")]
    pub high: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 4)))")]
    pub close: Decimal,
    /// Traded volume, non-negative
    pub volume: i64,
    pub created_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
