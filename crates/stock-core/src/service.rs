//! Stock data service composing upstream calls into API responses

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use stock_proxy::{FmpClient, ProxyError};
use tracing::{debug, info};

use crate::error::CoreError;
use crate::fetch::FetchMode;

/// Upstream resources the service knows how to request
#[derive(Debug, Clone, Copy)]
enum Resource {
    Profile,
    Quote,
    IntradayChart,
    DailyHistory,
}

impl Resource {
    fn path(self, ticker: &str) -> String {
        match self {
            Resource::Profile => format!("/profile/{}", ticker),
            Resource::Quote => format!("/quote/{}", ticker),
            Resource::IntradayChart => format!("/historical-chart/5min/{}", ticker),
            Resource::DailyHistory => format!("/historical-price-full/{}", ticker),
        }
    }
}

/// Combined view of a single ticker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockOverview {
    pub profile: Value,
    pub quote: Value,
    pub chart_intraday: Value,
}

/// Service behind the stock data endpoints.
///
/// Holds no per-request state: every operation issues fresh upstream calls.
pub struct StockService {
    upstream: Arc<FmpClient>,
    fetch_mode: FetchMode,
}

impl StockService {
    /// Create a new stock service
    pub fn new(upstream: Arc<FmpClient>, fetch_mode: FetchMode) -> Self {
        info!("Stock service using {} upstream fetches", fetch_mode.as_str());
        Self {
            upstream,
            fetch_mode,
        }
    }

    async fn fetch(&self, resource: Resource, ticker: &str) -> Result<Value, ProxyError> {
        self.upstream.fetch(&resource.path(ticker)).await
    }

    /// Profile, latest quote and intraday chart for a ticker
    pub async fn overview(&self, ticker: &str) -> Result<StockOverview, CoreError> {
        debug!("Building overview for {}", ticker);

        let incomplete = || CoreError::IncompleteData(ticker.to_string());
        // An empty profile or quote means the overview cannot be assembled
        let required = |e: ProxyError| match e {
            ProxyError::NotFound => incomplete(),
            other => CoreError::Proxy(other),
        };

        let (profile, quote, chart_intraday) = match self.fetch_mode {
            FetchMode::Sequential => {
                let profile = self.fetch(Resource::Profile, ticker).await.map_err(required)?;
                let quote = self.fetch(Resource::Quote, ticker).await.map_err(required)?;
                let intraday = self.fetch(Resource::IntradayChart, ticker).await?;
                (profile, quote, intraday)
            }
            FetchMode::Concurrent => {
                let (profile, quote, intraday) = tokio::join!(
                    self.fetch(Resource::Profile, ticker),
                    self.fetch(Resource::Quote, ticker),
                    self.fetch(Resource::IntradayChart, ticker),
                );
                // Profile errors win over quote errors, which win over intraday
                // errors, regardless of which call finished first.
                (profile.map_err(required)?, quote.map_err(required)?, intraday?)
            }
        };

        let profile = first_element(profile).ok_or_else(incomplete)?;
        let quote = first_element(quote).ok_or_else(incomplete)?;

        Ok(StockOverview {
            profile,
            quote,
            chart_intraday,
        })
    }

    /// Latest quote for a ticker
    pub async fn quote(&self, ticker: &str) -> Result<Value, CoreError> {
        let quote = self.fetch(Resource::Quote, ticker).await?;
        first_element(quote).ok_or(CoreError::Proxy(ProxyError::NotFound))
    }

    /// Daily price bars for a ticker, empty when the upstream has none
    pub async fn daily_history(&self, ticker: &str) -> Result<Value, CoreError> {
        let data = self.fetch(Resource::DailyHistory, ticker).await?;

        let historical = match data {
            Value::Object(mut map) => map.remove("historical"),
            _ => None,
        };
        Ok(historical.unwrap_or_else(|| Value::Array(Vec::new())))
    }
}

/// First element of an array payload; `None` for empty arrays and non-arrays
fn first_element(value: Value) -> Option<Value> {
    match value {
        Value::Array(items) => items.into_iter().next(),
        _ => None,
    }
}
