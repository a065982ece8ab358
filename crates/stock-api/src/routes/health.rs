//! Liveness endpoint

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Liveness response
#[derive(Serialize)]
pub struct LivenessResponse {
    pub message: String,
}

/// Liveness handler; does not touch the upstream
async fn liveness() -> Json<LivenessResponse> {
    metrics::counter!("stock_analytics_liveness_checks_total").increment(1);

    Json(LivenessResponse {
        message: "Stock Analytics API is running.".to_string(),
    })
}

/// Create liveness routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(liveness))
}
