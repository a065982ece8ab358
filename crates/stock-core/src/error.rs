//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Proxy(#[from] stock_proxy::ProxyError),

    #[error("Could not retrieve full data for ticker {0}.")]
    IncompleteData(String),
}
