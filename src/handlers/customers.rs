use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::handlers::error_response;
use crate::models::common::ErrorResponse;
use crate::models::customer::{CustomerField, CustomerSearchQuery, CustomerWithTotals};
use crate::services::customers;
use crate::AppState;

/// Handler for GET /api/customers
/// Customers matching the search query with invoice aggregates.
pub async fn search_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomerSearchQuery>,
) -> Result<Json<Vec<CustomerWithTotals>>, (StatusCode, Json<ErrorResponse>)> {
    customers::fetch_filtered_customers(&state.db, &query.query)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Handler for GET /api/customers/list
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerField>>, (StatusCode, Json<ErrorResponse>)> {
    customers::fetch_customers(&state.db)
        .await
        .map(Json)
        .map_err(error_response)
}
