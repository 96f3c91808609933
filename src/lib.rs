// src/lib.rs

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use services::quotes::QuoteProvider;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub quotes: Arc<dyn QuoteProvider>,
}

pub mod entities {
    pub mod prelude;
    pub mod company_overviews;
    pub mod customers;
    pub mod invoices;
    pub mod stocks;
}

pub mod services {
    pub mod customers;
    pub mod daily_prices;
    pub mod dashboard;
    pub mod historical;
    pub mod invoices;
    pub mod overviews;
    pub mod quotes;
    pub mod schema_guard;
    pub mod symbols;
}

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
