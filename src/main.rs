//! CareSync healthcare-services API server.
//!
//! Reads configuration from TOML file (~/.config/caresync/config.toml).

use std::sync::Arc;

use tracing::{error, info};

use caresync::shared::shutdown::ShutdownSignal;
use caresync::{create_api_router, default_config_path, ApiState, AppConfig, InMemoryStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("CARESYNC_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting CareSync API server...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = match metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to install Prometheus metrics recorder: {}", e);
            return Err(e.into());
        }
    };
    info!("Prometheus metrics recorder installed");

    // ── Storage & application state ────────────────────────────
    let storage: Arc<dyn caresync::Storage> = Arc::new(InMemoryStorage::new());
    let state = ApiState::new(storage, prometheus_handle);
    info!("Validation schemas compiled (vitals, leads)");

    // ── Graceful shutdown ──────────────────────────────────────
    let shutdown = ShutdownSignal::new();
    shutdown.listen_for_os_signals();

    // ── HTTP server ────────────────────────────────────────────
    let router = create_api_router(state);
    let address = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on http://{}", address);
    info!("Swagger UI available at http://{}/swagger-ui", address);

    let wait_for_shutdown = {
        let shutdown = shutdown.clone();
        async move { shutdown.wait().await }
    };
    axum::serve(listener, router)
        .with_graceful_shutdown(wait_for_shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}
