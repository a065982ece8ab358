//! Proxy error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("API key is not configured on the server.")]
    MissingApiKey,

    #[error("API request failed: {detail}")]
    UpstreamError { status: u16, detail: String },

    #[error("No data found for the given ticker.")]
    NotFound,

    #[error("An unexpected error occurred: {0}")]
    Http(#[from] reqwest::Error),

    #[error("An unexpected error occurred: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ProxyError {
    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::MissingApiKey => "missing_api_key",
            ProxyError::UpstreamError { .. } => "upstream_error",
            ProxyError::NotFound => "not_found",
            ProxyError::Http(_) => "http",
            ProxyError::InvalidUrl(_) => "invalid_url",
        }
    }
}
