//! Command implementations for the resumematch CLI

pub mod seed;
pub mod serve;

pub use seed::run_seed_admin;
pub use serve::run_serve;
