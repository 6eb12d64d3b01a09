//! # opc-api: Binary Entry Point
//!
//! Reads configuration from the environment, installs the Prometheus
//! recorder, and serves the API until Ctrl-C.

use metrics_exporter_prometheus::PrometheusBuilder;
use opc_api::state::{AppConfig, AppState, LogFormat};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(?config, "starting order packs calculator");

    let port = config.port;
    let metrics_enabled = config.metrics_enabled;
    let mut state = AppState::with_config(config);
    if metrics_enabled {
        let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
            tracing::error!("Prometheus recorder installation failed: {e}");
            e
        })?;
        // Recorder is live only now; publish the initial registry size again.
        opc_api::middleware::metrics::set_pack_sizes_configured(
            state.calculator.list_pack_sizes().len(),
        );
        state = state.with_metrics(handle);
    }

    let app = opc_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("order packs calculator listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
