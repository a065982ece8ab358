//! API routes

mod health;
pub mod metrics;
mod stock;

use axum::Router;
use std::sync::Arc;

use crate::cors::{CorsConfig, cors_layer};
use crate::error::ApiError;
use crate::state::{AppState, MetricsHandle};

/// Unknown paths answer with the same `detail` body as every other error
async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Create the main router
pub fn create_router(
    state: AppState,
    cors: &CorsConfig,
    metrics_handle: Option<Arc<MetricsHandle>>,
) -> Router {
    let mut router = Router::new()
        // Liveness
        .merge(health::routes())
        // Stock data API
        .merge(stock::routes())
        .with_state(state);

    // Add metrics endpoint if handle is provided
    if let Some(handle) = metrics_handle {
        router = router.merge(metrics::routes(handle));
    }

    router
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(cors_layer(cors))
}
