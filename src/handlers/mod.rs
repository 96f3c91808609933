pub mod customers;
pub mod dashboard;
pub mod invoices;
pub mod stocks;

use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::error::StoreError;
use crate::models::common::ErrorResponse;
use crate::AppState;

/// Map a store failure to the HTTP boundary: validation failures are the
/// caller's fault, everything else is a storage error.
pub(crate) fn error_response(err: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        StoreError::InvalidRow(_) => StatusCode::BAD_REQUEST,
        StoreError::Db { context, source } => {
            tracing::error!("{}: {}", context, source);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/api/invoices", get(invoices::search_invoices))
        .route("/api/invoices/pages", get(invoices::invoice_pages))
        .route("/api/invoices/latest", get(invoices::latest_invoices))
        .route("/api/invoices/{id}", get(invoices::invoice_by_id))
        .route("/api/customers", get(customers::search_customers))
        .route("/api/customers/list", get(customers::list_customers))
        .route("/api/dashboard/cards", get(dashboard::card_data))
        .route(
            "/api/stocks/{symbol}/prices",
            get(stocks::get_daily_prices).post(stocks::submit_daily_prices),
        )
        .route(
            "/api/stocks/{symbol}/historical",
            get(stocks::get_historical_prices),
        )
        .route(
            "/api/stocks/{symbol}/overview",
            put(stocks::put_overview).get(stocks::get_overview),
        )
        .route("/api/stocks/{symbol}", get(stocks::stock_detail))
        .with_state(state)
}

async fn liveness() -> &'static str {
    "finboard backend is up"
}
