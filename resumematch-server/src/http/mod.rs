//! HTTP server layer
//!
//! Axum server with:
//! - CORS (single configured origin, credentials allowed)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, ServerConfig, ServerError};
