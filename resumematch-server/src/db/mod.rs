//! Database layer - the document store handle
//!
//! # Design Principles
//!
//! - One client per process, built by the caller and injected (no globals)
//! - Handlers and the seeder depend on the [`Store`] trait, not the driver
//! - Rely on the unique email index, handle conflicts - no check-then-insert

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

use crate::models::User;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Logical database used by the backend.
pub const DATABASE_NAME: &str = "resumematch";

/// Collection holding [`User`] documents.
pub const USERS_COLLECTION: &str = "users";

/// MongoDB duplicate key error code.
pub(crate) const DUPLICATE_KEY: i32 = 11000;

/// Database error type
#[derive(Debug, Error)]
pub enum DbError {
    /// No server could be reached (selection timeout, network failure)
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// The unique email index cannot be built over existing documents
    #[error("users.email holds duplicate values, remove the extra documents to enable the unique index: {0}")]
    DuplicateKeys(String),

    #[error("database error: {0}")]
    Driver(mongodb::error::Error),

    #[error("document serialization failed: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),
}

impl From<mongodb::error::Error> for DbError {
    fn from(e: mongodb::error::Error) -> Self {
        match e.kind.as_ref() {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => Self::Unavailable(e.to_string()),
            _ => Self::Driver(e),
        }
    }
}

/// Result of an insert keyed on a unique field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyExists,
}

/// Handle to the backing document store.
///
/// Implementations must make [`Store::insert_user_if_absent`] atomic with
/// respect to concurrent callers using the same email.
#[async_trait]
pub trait Store: Send + Sync {
    /// Logical database name this handle points at
    fn database_name(&self) -> &str;

    /// Names of the collections currently present
    async fn list_collection_names(&self) -> Result<Vec<String>, DbError>;

    /// Create the unique index on `users.email` (idempotent)
    async fn ensure_indexes(&self) -> Result<(), DbError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError>;

    /// Insert `user` unless a user with the same email already exists
    async fn insert_user_if_absent(&self, user: &User) -> Result<InsertOutcome, DbError>;
}

pub(crate) fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) => we.code == DUPLICATE_KEY,
        ErrorKind::Command(ce) => ce.code == DUPLICATE_KEY,
        _ => false,
    }
}
