//! Application state

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use stock_core::StockService;

/// Handle used to render Prometheus metrics
pub type MetricsHandle = PrometheusHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub stocks: Arc<StockService>,
}

impl AppState {
    pub fn new(stocks: Arc<StockService>) -> Self {
        Self { stocks }
    }
}
