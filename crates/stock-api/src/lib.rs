//! Stock Analytics REST API
//!
//! This crate provides the Axum-based HTTP surface for Stock Analytics:
//! the liveness route, the stock data routes and the CORS policy
//! applied to all of them.

pub mod cors;
pub mod error;
pub mod routes;
pub mod state;

pub use cors::{CorsConfig, cors_layer};
pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, MetricsHandle};
