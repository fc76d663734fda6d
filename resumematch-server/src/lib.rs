//! resumematch-server: backend scaffold for ResumeMatch AI
//!
//! Loads configuration, holds the MongoDB handle, serves the diagnostic
//! HTTP routes and provisions the administrator account.

pub mod auth;
pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod seed;
pub mod state;

pub use config::{Config, ConfigError};
pub use db::{DbError, MemoryStore, MongoStore, Store, DATABASE_NAME};
pub use http::{build_router, run_server, ServerConfig, ServerError};
pub use seed::{seed_admin, AdminSeed, SeedError, SeedOutcome};
pub use state::AppState;
