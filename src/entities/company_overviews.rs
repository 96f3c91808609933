//! SeaORM Entity for company overview metadata
//!
//! Keyed by ticker symbol (unique). Writes are merge-upserts that replace
//! every descriptive field and refresh updated_at.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company_overviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub symbol: String,
    pub asset_type: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub exchange: String,
    pub sector: String,
    pub industry: String,
    pub market_capitalization: String,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
