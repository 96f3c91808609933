use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::handlers::error_response;
use crate::models::common::ErrorResponse;
use crate::models::invoice::{
    InvoiceForm, InvoicePagesResponse, InvoiceSearchQuery, InvoiceTableRow, LatestInvoice,
};
use crate::services::invoices;
use crate::AppState;

/// Handler for GET /api/invoices
/// One 6-row page of invoices matching the search query, newest first.
pub async fn search_invoices(
    State(state): State<AppState>,
    Query(query): Query<InvoiceSearchQuery>,
) -> Result<Json<Vec<InvoiceTableRow>>, (StatusCode, Json<ErrorResponse>)> {
    tracing::debug!(
        "Searching invoices (query: '{}', page: {})",
        query.query,
        query.page()
    );

    invoices::fetch_filtered_invoices(&state.db, &query.query, query.page())
        .await
        .map(Json)
        .map_err(error_response)
}

/// Handler for GET /api/invoices/pages
pub async fn invoice_pages(
    State(state): State<AppState>,
    Query(query): Query<InvoiceSearchQuery>,
) -> Result<Json<InvoicePagesResponse>, (StatusCode, Json<ErrorResponse>)> {
    invoices::fetch_invoices_pages(&state.db, &query.query)
        .await
        .map(|pages| Json(InvoicePagesResponse { pages }))
        .map_err(error_response)
}

/// Handler for GET /api/invoices/latest
pub async fn latest_invoices(
    State(state): State<AppState>,
) -> Result<Json<Vec<LatestInvoice>>, (StatusCode, Json<ErrorResponse>)> {
    invoices::fetch_latest_invoices(&state.db)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Handler for GET /api/invoices/{id}
pub async fn invoice_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceForm>, (StatusCode, Json<ErrorResponse>)> {
    let invoice = invoices::fetch_invoice_by_id(&state.db, id)
        .await
        .map_err(error_response)?;

    invoice.map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Invoice '{}' not found", id),
            }),
        )
    })
}
