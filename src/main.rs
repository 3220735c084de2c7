// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use battery_telemetry::application::dashboard_session::DashboardSession;
use battery_telemetry::infrastructure::config::{load_charts_config, load_dashboard_config};
use battery_telemetry::infrastructure::http_source::HttpSampleSource;
use battery_telemetry::presentation::app_state::AppState;
use battery_telemetry::presentation::router::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let dashboard_config = load_dashboard_config().context("loading config/dashboard")?;
    let charts_config = load_charts_config().context("loading config/charts")?;

    // Create data source (infrastructure layer)
    let source = Arc::new(HttpSampleSource::new(
        &dashboard_config.source.base_url,
        &dashboard_config.source.battery_path,
        &dashboard_config.source.thermal_path,
    ));

    // Create the viewer session (application layer)
    let session = DashboardSession::new(
        &dashboard_config.sampling,
        &dashboard_config.hover,
        charts_config,
    );
    let state = Arc::new(AppState::new(session, source));

    // Initial load, then periodic refresh
    let applied = state.refresh().await;
    tracing::info!(
        "Initial load: battery {}, thermal {}",
        if applied.battery { "ok" } else { "unavailable" },
        if applied.thermal { "ok" } else { "unavailable" },
    );

    let refresh_secs = dashboard_config.server.refresh_secs;
    if refresh_secs > 0 {
        let state = state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(refresh_secs));
            // the first tick completes immediately and the initial load already ran
            interval.tick().await;
            loop {
                interval.tick().await;
                state.refresh().await;
            }
        });
    }

    // Build router (presentation layer)
    let app = router(state);

    // Start server
    let addr: SocketAddr = dashboard_config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {}", dashboard_config.server.bind))?;
    tracing::info!("Starting battery-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
