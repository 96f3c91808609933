use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::handlers::error_response;
use crate::models::common::ErrorResponse;
use crate::models::dashboard::CardData;
use crate::services::dashboard;
use crate::AppState;

/// Handler for GET /api/dashboard/cards
/// Fans out the three summary queries and returns the combined card data;
/// any single failure fails the whole response.
pub async fn card_data(
    State(state): State<AppState>,
) -> Result<Json<CardData>, (StatusCode, Json<ErrorResponse>)> {
    dashboard::fetch_card_data(&state.db)
        .await
        .map(Json)
        .map_err(error_response)
}
