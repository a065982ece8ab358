//! Financial data upstream client

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ProxyError;

/// Base URL of the FinancialModelingPrep v3 API
pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

/// Upstream client configuration
#[derive(Clone, Debug)]
pub struct FmpClientConfig {
    /// Base URL of the upstream API, without a trailing slash
    pub base_url: String,
    /// API key sent as the `apikey` query parameter
    pub api_key: Option<String>,
}

impl Default for FmpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

/// Upstream financial data API client
///
/// Every call to [`FmpClient::fetch`] issues exactly one GET request.
/// Nothing is cached between calls.
pub struct FmpClient {
    config: FmpClientConfig,
    client: Client,
}

impl FmpClient {
    /// Create a new upstream client
    pub fn new(config: FmpClientConfig) -> Result<Self, ProxyError> {
        let client = Client::builder().build()?;

        info!("Created upstream client for {}", config.base_url);
        if config.api_key.as_deref().is_none_or(str::is_empty) {
            warn!("No upstream API key configured; data requests will be rejected");
        }

        Ok(Self { config, client })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Whether a usable API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Build the full URL for a resource path such as `/quote/AAPL`
    fn resource_url(&self, resource: &str, api_key: &str) -> Result<Url, ProxyError> {
        let mut url = Url::parse(&format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            resource
        ))?;
        url.query_pairs_mut().append_pair("apikey", api_key);
        Ok(url)
    }

    /// Fetch a resource and return its parsed JSON payload
    pub async fn fetch(&self, resource: &str) -> Result<Value, ProxyError> {
        let result = self.fetch_resource(resource).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::counter!(
            "stock_analytics_upstream_requests_total",
            "resource" => resource_kind(resource).to_string(),
            "outcome" => outcome
        )
        .increment(1);

        result
    }

    async fn fetch_resource(&self, resource: &str) -> Result<Value, ProxyError> {
        let api_key = self.api_key().ok_or(ProxyError::MissingApiKey)?;
        let url = self.resource_url(resource, api_key)?;

        // The key lives in the query string, so only the resource path is logged
        debug!("Fetching upstream resource: {}", resource);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = extract_error_detail(&body);
            warn!(
                status = status.as_u16(),
                "Upstream request for {} failed: {}", resource, detail
            );
            return Err(ProxyError::UpstreamError {
                status: status.as_u16(),
                detail,
            });
        }

        let data: Value = response.json().await?;

        // The upstream answers unknown tickers with `[]` or `[{}]`
        if is_falsy(&data) || matches!(&data, Value::Array(items) if is_falsy(&items[0])) {
            debug!("Upstream returned no data for {}", resource);
            return Err(ProxyError::NotFound);
        }

        Ok(data)
    }
}

/// Pull a human-readable message out of an upstream error body.
///
/// A JSON object carrying an `error` field yields that field; anything
/// else yields the raw body text.
fn extract_error_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("error") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    }
}

/// Truthiness of a JSON value: null, false, zero, and empty strings,
/// arrays and objects are all falsy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// First path segment of a resource, e.g. `quote` for `/quote/AAPL`
fn resource_kind(resource: &str) -> &str {
    resource
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
}
