//! Stock Analytics Core Business Logic
//!
//! This crate composes upstream calls into the aggregated responses
//! served by the HTTP API.

pub mod error;
pub mod fetch;
pub mod service;

pub use error::CoreError;
pub use fetch::FetchMode;
pub use service::{StockOverview, StockService};
