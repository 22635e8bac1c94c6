//! CRM Bridge - API Server Binary
//!
//! Starts the HTTP bridge in front of a SuiteCRM-compatible legacy REST
//! endpoint.
//!
//! # Usage
//!
//! ```bash
//! CRM_URL=https://crm.example.com/service/v4_1/rest.php \
//! CRM_USERNAME=admin CRM_PASSWORD=... cargo run --bin crm-bridge-api
//! ```
//!
//! # Environment Variables
//!
//! * `CRM_URL` - Remote REST endpoint (required)
//! * `CRM_USERNAME` - Remote login user (required)
//! * `CRM_PASSWORD` - Remote login password (required)
//! * `CRM_PASSWORD_HASH` - Credential digest: `sha256` (default) or `plain`
//! * `CRM_TIMEOUT_SECS` - Outbound request timeout (default: 30)
//! * `CRM_MAX_RESULTS` - List operation result cap (default: 10)
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_crm::{CrmConfig, SuiteCrmClient};
use interface_api::{config::ApiConfig, create_router};

/// Main entry point for the bridge server.
///
/// Initializes logging, loads configuration, constructs the session adapter,
/// and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Mandatory CRM configuration is missing from the environment
/// - The server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let api_config = ApiConfig::from_env()?;
    init_tracing(&api_config.log_level);

    tracing::info!(
        host = %api_config.host,
        port = %api_config.port,
        "Starting CRM bridge"
    );

    // Remote URL and credentials are mandatory; fail fast without them
    let crm_config = CrmConfig::from_env()?;
    tracing::info!(url = %crm_config.url, "Using remote CRM endpoint");

    let crm = Arc::new(SuiteCrmClient::new(crm_config)?);
    let app = create_router(crm);

    let addr: SocketAddr = api_config.server_addr().parse()?;
    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
