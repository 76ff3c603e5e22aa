//! E-Kejaksaan Case Tracking API Server
//!
//! REST API over the deadline engine used by the case dashboard
//!
//! Usage:
//!   cargo run --bin ekejaksaan_api
//!
//! Environment:
//!   PORT / EKEJAKSAAN_PORT - Server port (default: 8080)
//!   EKEJAKSAAN_HOST        - Server host (default: 0.0.0.0)
//!   EKEJAKSAAN_API_KEY     - Required X-API-Key value (optional)
//!   RUST_LOG               - Log level (default: info)

use ekejaksaan_deadline::api::{create_router, AppState};
use ekejaksaan_deadline::utils::constants::{APP_NAME, APP_VERSION};
use ekejaksaan_deadline::{ClassificationTelemetry, ServerConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = ServerConfig::from_env()?;
    if config.api_key.is_none() {
        warn!("EKEJAKSAAN_API_KEY not set, API is open to any caller");
    }

    let telemetry = Arc::new(ClassificationTelemetry::new());
    let state = Arc::new(AppState::new(telemetry.clone(), config.api_key.clone()));
    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;

    info!("{} v{} starting on http://{}", APP_NAME, APP_VERSION, addr);
    info!("Endpoints:");
    info!("  POST /v1/deadline/classify  - Classify one milestone date");
    info!("  GET  /v1/deadline/limits    - Deadline limit table");
    info!("  POST /v1/cases/render       - Overdue cell hints for dashboard rows");
    info!("  POST /v1/cases/update-check - Validate and annotate a cell update");
    info!("  GET  /v1/stats              - Classification statistics");
    info!("  GET  /v1/health             - Health check");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    let stats = telemetry.get_stats();
    info!("Shutdown signal received");
    info!("   Total classified: {}", stats.total_classified);
    info!("   Overdue: {}", stats.total_overdue);
    info!("   Date unavailable: {}", stats.date_unavailable);
    info!("   Unknown field: {}", stats.unknown_field);

    Ok(())
}
