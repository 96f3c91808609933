use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::entities::stocks;
use crate::handlers::error_response;
use crate::models::common::ErrorResponse;
use crate::models::stock::{
    CompanyOverviewData, HistoricalPricePoint, OverviewInput, PriceWindowQuery,
    SubmitPricesRequest,
};
use crate::services::quotes::CurrentQuote;
use crate::services::symbols::normalize_symbol;
use crate::services::{daily_prices, historical, overviews};
use crate::AppState;

/// Raw price reads default to a month of rows
const DEFAULT_RAW_WINDOW: u64 = 30;
/// The stock detail page shows a quarter of history
const DETAIL_WINDOW: u64 = 90;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPricesResponse {
    pub message: String,
    pub symbol: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPricesResponse {
    pub symbol: String,
    pub rows: Vec<stocks::Model>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewStoredResponse {
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockDetailWarnings {
    pub overview_unavailable: bool,
    pub prices_unavailable: bool,
}

/// Aggregate view for the stock detail page. Overview and price sections
/// degrade independently: a failed read leaves the section absent/empty
/// and sets the matching warning instead of failing the whole response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockDetailResponse {
    pub symbol: String,
    pub overview: Option<CompanyOverviewData>,
    pub prices: Vec<HistoricalPricePoint>,
    pub quote: Option<CurrentQuote>,
    pub warnings: StockDetailWarnings,
}

/// Handler for POST /api/stocks/{symbol}/prices
/// Bulk-ingests daily price rows. The batch is validated before any write;
/// the stored rows are independent upserts keyed by (symbol, date).
pub async fn submit_daily_prices(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Json(request): Json<SubmitPricesRequest>,
) -> Result<Json<SubmitPricesResponse>, (StatusCode, Json<ErrorResponse>)> {
    let rows = request.validate().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: e }),
        )
    })?;

    tracing::info!("Storing {} daily price rows for '{}'", rows.len(), symbol);

    let stored = daily_prices::store_daily_prices(&state.db, &symbol, &rows)
        .await
        .map_err(error_response)?;

    Ok(Json(SubmitPricesResponse {
        message: "Stock prices stored.".to_string(),
        symbol: stored.symbol,
        rows: stored.rows,
    }))
}

/// Handler for GET /api/stocks/{symbol}/prices
pub async fn get_daily_prices(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<PriceWindowQuery>,
) -> Result<Json<RawPricesResponse>, (StatusCode, Json<ErrorResponse>)> {
    let limit = query.limit.unwrap_or(DEFAULT_RAW_WINDOW);

    let rows = daily_prices::fetch_daily_prices(&state.db, &symbol, limit)
        .await
        .map_err(error_response)?;

    Ok(Json(RawPricesResponse {
        symbol: normalize_symbol(&symbol),
        rows,
    }))
}

/// Handler for GET /api/stocks/{symbol}/historical
pub async fn get_historical_prices(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<PriceWindowQuery>,
) -> Result<Json<Vec<HistoricalPricePoint>>, (StatusCode, Json<ErrorResponse>)> {
    let limit = query.limit.unwrap_or(DETAIL_WINDOW);

    historical::fetch_historical_prices(&state.db, &symbol, limit)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Handler for PUT /api/stocks/{symbol}/overview
pub async fn put_overview(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Json(input): Json<OverviewInput>,
) -> Result<Json<OverviewStoredResponse>, (StatusCode, Json<ErrorResponse>)> {
    overviews::store_company_overview(&state.db, &symbol, &input)
        .await
        .map(|symbol| Json(OverviewStoredResponse { symbol }))
        .map_err(error_response)
}

/// Handler for GET /api/stocks/{symbol}/overview
pub async fn get_overview(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<CompanyOverviewData>, (StatusCode, Json<ErrorResponse>)> {
    let overview = overviews::fetch_company_overview(&state.db, &symbol)
        .await
        .map_err(error_response)?;

    overview.map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Overview for '{}' not found", normalize_symbol(&symbol)),
            }),
        )
    })
}

/// Handler for GET /api/stocks/{symbol}
pub async fn stock_detail(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Json<StockDetailResponse> {
    let symbol = normalize_symbol(&symbol);

    let (overview, prices, quote) = tokio::join!(
        overviews::fetch_company_overview(&state.db, &symbol),
        historical::fetch_historical_prices(&state.db, &symbol, DETAIL_WINDOW),
        state.quotes.current_quote(&symbol),
    );

    let (overview, overview_unavailable) = match overview {
        Ok(overview) => (overview, false),
        Err(e) => {
            tracing::warn!("Overview unavailable for {}: {}", symbol, e);
            (None, true)
        }
    };

    let (prices, prices_unavailable) = match prices {
        Ok(prices) => (prices, false),
        Err(e) => {
            tracing::warn!("Historical prices unavailable for {}: {}", symbol, e);
            (Vec::new(), true)
        }
    };

    Json(StockDetailResponse {
        symbol,
        overview,
        prices,
        quote,
        warnings: StockDetailWarnings {
            overview_unavailable,
            prices_unavailable,
        },
    })
}
