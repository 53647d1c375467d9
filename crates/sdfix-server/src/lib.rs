//! sdfix Server
//!
//! HTTP front end for the remediation engine. Accepts a block of code with
//! its origin metadata and returns the original and remediated code.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use sdfix_engine::{Remediator, RULES};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter when it is set.
pub fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Start the remediation HTTP server
///
/// Builds the remediator, binds the listener and serves until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting sdfix server");
    info!("Bind address: {}", config.bind_addr());
    info!("Rewrite rules loaded: {}", RULES.len());

    let state = AppState::new(Remediator::system());
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server");
}
