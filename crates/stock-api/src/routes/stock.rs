//! Stock data routes

use axum::{
    Json, Router,
    extract::{FromRequestParts, Path, State},
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use stock_core::StockOverview;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Ticker path segment; malformed segments are answered with a `detail` body
#[derive(Deserialize, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
struct Ticker(String);

/// GET /api/stock/{ticker} - profile, quote and intraday chart
async fn get_stock(
    State(state): State<AppState>,
    Ticker(ticker): Ticker,
) -> Result<Json<StockOverview>, ApiError> {
    debug!("GET stock overview: {}", ticker);
    Ok(Json(state.stocks.overview(&ticker).await?))
}

/// GET /api/quote/{ticker} - latest quote
async fn get_quote(
    State(state): State<AppState>,
    Ticker(ticker): Ticker,
) -> Result<Json<Value>, ApiError> {
    debug!("GET quote: {}", ticker);
    Ok(Json(state.stocks.quote(&ticker).await?))
}

/// GET /api/historical/daily/{ticker} - daily price bars
async fn get_daily_history(
    State(state): State<AppState>,
    Ticker(ticker): Ticker,
) -> Result<Json<Value>, ApiError> {
    debug!("GET daily history: {}", ticker);
    Ok(Json(state.stocks.daily_history(&ticker).await?))
}

/// Create stock data routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/stock/{ticker}", get(get_stock))
        .route("/api/quote/{ticker}", get(get_quote))
        .route("/api/historical/daily/{ticker}", get(get_daily_history))
}
