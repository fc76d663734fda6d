//! HTTP server command
//!
//! Runs the backend with the diagnostic routes (`/`, `/test-mongo`).

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use resumematch_server::{
    run_server, AppState, Config, MongoStore, ServerConfig, Store, DATABASE_NAME,
};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8000)
    #[arg(long, short = 'b', env = "BIND_ADDR")]
    pub bind: Option<SocketAddr>,

    /// Frontend origin allowed by CORS (default: http://localhost:3000)
    #[arg(long, env = "CORS_ORIGIN")]
    pub cors_origin: Option<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;

    let mut server_config = ServerConfig::from(&config);
    if let Some(bind) = args.bind {
        server_config.bind_addr = bind;
    }
    if let Some(origin) = args.cors_origin {
        server_config.cors_origin = origin;
    }

    let store = MongoStore::connect(&config.mongo_uri, DATABASE_NAME)
        .await
        .context("Failed to create MongoDB client")?;
    let store: Arc<dyn Store> = Arc::new(store);

    // Index creation waits on server selection; don't hold up startup for it.
    let indexing = Arc::clone(&store);
    tokio::spawn(async move {
        match indexing.ensure_indexes().await {
            Ok(()) => tracing::info!("users.email unique index ready"),
            Err(e) => tracing::warn!(error = %e, "could not ensure users index"),
        }
    });

    tracing::info!(
        database = DATABASE_NAME,
        "Starting ResumeMatch AI Backend on {}",
        server_config.bind_addr
    );

    run_server(AppState::new(store), server_config)
        .await
        .context("Server error")?;

    Ok(())
}
