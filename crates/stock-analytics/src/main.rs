//! Stock Analytics - aggregating proxy for financial market data

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;

use config::{Config, ConfigSource};
use stock_api::{AppState, create_router};
use stock_core::{FetchMode, StockService};
use stock_proxy::FmpClient;

/// Stock Analytics - aggregating proxy for financial market data
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "STOCK_ANALYTICS_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "STOCK_ANALYTICS_PORT")]
    port: Option<u16>,

    /// Upstream API key
    #[arg(long, env = "FMP_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Upstream fan-out for the combined endpoint (sequential or concurrent)
    #[arg(long, env = "STOCK_ANALYTICS_FETCH_MODE")]
    fetch_mode: Option<FetchMode>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a local .env before clap reads the environment
    load_dotenv();

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let (mut config, source) = Config::load(&args.config)?;
    if args.api_key.is_some() {
        config.upstream.api_key = args.api_key;
    }
    if let Some(mode) = args.fetch_mode {
        config.upstream.fetch_mode = mode;
    }

    // Initialize logging
    init_logging(&config.logging.level, &config.logging.format);

    info!("Starting Stock Analytics v{}", env!("CARGO_PKG_VERSION"));
    match source {
        ConfigSource::File => info!("Loaded configuration from {}", args.config),
        ConfigSource::Defaults => {
            info!("Config file not found at {}, using defaults", args.config)
        }
    }

    // Initialize metrics recorder
    let metrics_handle = if config.metrics.enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(Arc::new(handle))
    } else {
        None
    };

    // Initialize upstream client
    let upstream = Arc::new(FmpClient::new(config.upstream.client_config())?);
    if !upstream.has_api_key() {
        warn!("FMP_API_KEY is not set; stock data endpoints will answer with 500");
    }

    // Initialize stock service
    let stocks = Arc::new(StockService::new(upstream, config.upstream.fetch_mode));

    // Create router
    let app = create_router(AppState::new(stocks), &config.cors, metrics_handle)
        .layer(TraceLayer::new_for_http());

    // Determine bind address
    let bind_addr = args.bind.unwrap_or(config.server.bind_address);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind_addr, port)
        .parse()
        .with_context(|| format!("Invalid bind address: {}:{}", bind_addr, port))?;

    info!("Listening on {}", addr);
    info!(
        "Upstream: {} ({} fetch)",
        config.upstream.base_url,
        config.upstream.fetch_mode.as_str()
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Initialize logging
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if format.eq_ignore_ascii_case("json") {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Load a .env file from the current directory or the nearest ancestor
fn load_dotenv() {
    // A missing .env is normal in deployments that set variables directly
    let _ = dotenvy::dotenv();
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_mode_flag() {
        let args = Args::try_parse_from(["stock-analytics", "--fetch-mode", "concurrent"]).unwrap();
        assert_eq!(args.fetch_mode, Some(FetchMode::Concurrent));

        let args = Args::try_parse_from(["stock-analytics", "--fetch-mode", "Sequential"]).unwrap();
        assert_eq!(args.fetch_mode, Some(FetchMode::Sequential));
    }

    #[test]
    fn test_unknown_fetch_mode_is_rejected() {
        assert!(Args::try_parse_from(["stock-analytics", "--fetch-mode", "parallel"]).is_err());
    }
}
