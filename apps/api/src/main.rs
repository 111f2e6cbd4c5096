//! # Emporium API Server
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tracing (RUST_LOG) ─► ApiConfig::load ─► Database::new (migrations)    │
//! │        ─► AppState ─► router ─► axum::serve (until Ctrl+C / SIGTERM)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use emporium_api::config::ApiConfig;
use emporium_api::{router, AppState};
use emporium_db::{Database, DbConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info,emporium=debug,sqlx=warn";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(true)
        .init();

    info!("Starting Emporium API server...");

    let config = ApiConfig::load()?;
    info!(
        addr = %config.socket_addr(),
        db_path = %config.db_path.display(),
        policy = ?config.submit_policy(),
        "Configuration loaded"
    );

    let db_config = DbConfig::new(config.db_path.clone()).max_connections(config.db_max_connections);
    let db = Database::new(db_config).await?;
    info!("Database ready");

    let app = router(AppState::with_database(db.clone(), config.submit_policy()));

    let listener = TcpListener::bind(config.socket_addr()).await?;
    info!(addr = %config.socket_addr(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
