//! resumematch CLI - ResumeMatch AI backend entry point
//!
//! - `serve`: run the HTTP backend
//! - `seed-admin`: provision the administrator account (one-shot)
//!
//! Configuration comes from the environment; a `.env` file in the working
//! directory is loaded first when present.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "resumematch",
    author,
    version,
    about = "ResumeMatch AI backend - HTTP server and admin seeding"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP backend (`/` and `/test-mongo`)
    Serve(commands::serve::ServeArgs),
    /// Create the admin user if it does not exist yet
    SeedAdmin,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so `env = ...` arguments see values from .env.
    // Missing .env is fine; real environment variables take precedence.
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "failed to read .env"),
    }

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::SeedAdmin => commands::run_seed_admin().await,
    };

    tracing_setup::shutdown_otel();
    result
}
