//! Stock Analytics Upstream Proxy
//!
//! This crate provides the client for communicating with the upstream
//! financial-data API, normalizing transport and payload failures into
//! a single error type.

pub mod client;
pub mod error;

pub use client::{DEFAULT_BASE_URL, FmpClient, FmpClientConfig, is_falsy};
pub use error::ProxyError;
