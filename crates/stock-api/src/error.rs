//! API error types

use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use stock_core::CoreError;
use stock_proxy::ProxyError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("{}", .0.body_text())]
    InvalidPath(#[from] PathRejection),

    #[error("{0}")]
    Core(#[from] CoreError),
}

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        ApiError::Core(CoreError::Proxy(err))
    }
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidPath(rejection) => rejection.status(),
            ApiError::Core(CoreError::IncompleteData(_)) => StatusCode::NOT_FOUND,
            ApiError::Core(CoreError::Proxy(e)) => match e {
                ProxyError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
                // Mirror whatever the upstream answered with
                ProxyError::UpstreamError { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                ProxyError::NotFound => StatusCode::NOT_FOUND,
                ProxyError::Http(_) | ProxyError::InvalidUrl(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", detail);
        } else {
            warn!(status = status.as_u16(), "{}", detail);
        }

        (status, axum::Json(json!({ "detail": detail }))).into_response()
    }
}
