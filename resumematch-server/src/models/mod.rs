//! Domain models persisted in MongoDB

pub mod user;

pub use user::{Role, User};
