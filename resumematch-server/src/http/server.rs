//! Axum server setup
//!
//! Server skeleton with:
//! - CORS restricted to the configured frontend origin, credentials allowed
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::{Config, DEFAULT_CORS_ORIGIN};
use crate::state::AppState;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8000)
    pub bind_addr: SocketAddr,

    /// The single origin allowed to make credentialed cross-origin requests
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

impl From<&Config> for ServerConfig {
    fn from(config: &Config) -> Self {
        Self {
            bind_addr: config.bind_addr,
            cors_origin: config.cors_origin.clone(),
        }
    }
}

/// CORS for one origin.
///
/// The allow-origin header is only sent back to that origin. Wildcards
/// are not allowed together with credentials, so methods and headers
/// mirror the preflight request instead.
fn cors_layer(origin: &str) -> Result<CorsLayer, ServerError> {
    let origin = HeaderValue::from_str(origin)
        .map_err(|_| ServerError::InvalidOrigin(origin.to_string()))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Build the application router with all routes
pub fn build_router(state: AppState, cors_origin: &str) -> Result<Router, ServerError> {
    let cors = cors_layer(cors_origin)?;

    Ok(Router::new()
        .merge(routes::root::router())
        .merge(routes::collections::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let store = MongoStore::connect(&config.mongo_uri, DATABASE_NAME).await?;
/// let state = AppState::new(Arc::new(store));
/// run_server(state, ServerConfig::from(&config)).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state, &config.cors_origin)?;
    tracing::info!(origin = %config.cors_origin, "CORS origin configured");

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CORS origin: {0:?}")]
    InvalidOrigin(String),
}
