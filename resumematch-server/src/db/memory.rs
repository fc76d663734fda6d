//! In-process store with the same contract as [`MongoStore`](super::MongoStore)
//!
//! Used wherever a live server is not wanted: router tests, seeder tests.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{DbError, InsertOutcome, Store, DATABASE_NAME, USERS_COLLECTION};
use crate::models::User;

#[derive(Default)]
struct Inner {
    /// Collections created outside the users path
    collections: BTreeSet<String>,
    users: Vec<User>,
    users_indexed: bool,
}

/// Memory-backed [`Store`]
pub struct MemoryStore {
    name: String,
    offline: AtomicBool,
    inner: RwLock<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DATABASE_NAME)
    }
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offline: AtomicBool::new(false),
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Pre-create empty collections.
    pub fn with_collections<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner
            .get_mut()
            .collections
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Simulate an outage: every operation fails with [`DbError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Snapshot of stored users
    pub async fn users(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    /// Store `user` as-is, bypassing the email check. Stands in for data
    /// written before the unique index existed.
    pub async fn insert_unchecked(&self, user: User) {
        let mut stored = user;
        stored.id.get_or_insert_with(ObjectId::new);
        self.inner.write().await.users.push(stored);
    }

    fn check_online(&self) -> Result<(), DbError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable(format!(
                "server selection timed out for '{}'",
                self.name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn database_name(&self) -> &str {
        &self.name
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, DbError> {
        self.check_online()?;
        let inner = self.inner.read().await;
        let mut names = inner.collections.clone();
        if inner.users_indexed || !inner.users.is_empty() {
            names.insert(USERS_COLLECTION.to_string());
        }
        Ok(names.into_iter().collect())
    }

    async fn ensure_indexes(&self) -> Result<(), DbError> {
        self.check_online()?;
        let mut inner = self.inner.write().await;
        let duplicate = {
            let mut seen = BTreeSet::new();
            inner
                .users
                .iter()
                .find(|u| !seen.insert(u.email.as_str()))
                .map(|u| u.email.clone())
        };
        if let Some(email) = duplicate {
            return Err(DbError::DuplicateKeys(format!(
                "duplicate key {{ email: \"{}\" }}",
                email
            )));
        }
        inner.users_indexed = true;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        self.check_online()?;
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user_if_absent(&self, user: &User) -> Result<InsertOutcome, DbError> {
        self.check_online()?;
        // Lookup and insert under one write guard
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.email == user.email) {
            return Ok(InsertOutcome::AlreadyExists);
        }

        let mut stored = user.clone();
        stored.id = Some(ObjectId::new());
        inner.users.push(stored);
        Ok(InsertOutcome::Inserted)
    }
}
