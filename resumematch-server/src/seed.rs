//! One-shot administrator seeding
//!
//! Safe to run repeatedly and concurrently: the final write is an atomic
//! insert-if-absent keyed on email, backed by the unique index.

use thiserror::Error;

use crate::auth::{password, PasswordError};
use crate::db::{DbError, InsertOutcome, Store};
use crate::models::{Role, User};

pub const DEFAULT_ADMIN_NAME: &str = "Admin";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "AdminPass1!";

/// Administrator account to provision
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            name: DEFAULT_ADMIN_NAME.to_string(),
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            role: Role::Admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created,
    AlreadyExists,
}

impl SeedOutcome {
    /// Line printed by the `seed-admin` command
    pub fn message(&self) -> &'static str {
        match self {
            Self::Created => "Admin created",
            Self::AlreadyExists => "Admin already exists",
        }
    }
}

#[derive(Error, Debug)]
pub enum SeedError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Create the admin user unless one with the same email exists.
pub async fn seed_admin(store: &dyn Store, seed: &AdminSeed) -> Result<SeedOutcome, SeedError> {
    match store.ensure_indexes().await {
        Ok(()) => {}
        // Existing data blocks the index; the upsert below still refuses
        // to add another document for this email.
        Err(DbError::DuplicateKeys(detail)) => {
            tracing::warn!(%detail, "unique email index missing, continuing without it");
        }
        Err(e) => return Err(e.into()),
    }

    // Fast path, skips hashing. Not relied on for uniqueness.
    if store.find_user_by_email(&seed.email).await?.is_some() {
        tracing::info!(email = %seed.email, "admin already present, nothing to do");
        return Ok(SeedOutcome::AlreadyExists);
    }

    // argon2 is CPU-bound, keep it off the async workers
    let plaintext = seed.password.clone();
    let hash = tokio::task::spawn_blocking(move || password::hash(&plaintext)).await??;
    let user = User::new(&seed.name, &seed.email, hash, seed.role);

    let outcome = match store.insert_user_if_absent(&user).await? {
        InsertOutcome::Inserted => {
            tracing::info!(email = %seed.email, role = %seed.role, "admin user inserted");
            SeedOutcome::Created
        }
        InsertOutcome::AlreadyExists => {
            tracing::info!(email = %seed.email, "admin inserted concurrently by another run");
            SeedOutcome::AlreadyExists
        }
    };
    Ok(outcome)
}
