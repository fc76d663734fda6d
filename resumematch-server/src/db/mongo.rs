//! MongoDB-backed store
//!
//! The driver keeps its own connection pool per `Client`, so one
//! `MongoStore` is built at startup and shared behind an `Arc`.

use async_trait::async_trait;
use mongodb::bson::{self, doc};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};

use super::{is_duplicate_key, DbError, InsertOutcome, Store, USERS_COLLECTION};
use crate::models::User;

/// Application name reported to the server in the handshake.
const APP_NAME: &str = "resumematch";

/// MongoDB handle for a single logical database
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Build a client for `uri` and bind it to `database_name`.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation as [`DbError::Unavailable`].
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot be parsed.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = MongoStore::connect("mongodb://localhost:27017", DATABASE_NAME).await?;
    /// ```
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, DbError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(APP_NAME.to_string());

        let client = Client::with_options(options)?;
        let database = client.database(database_name);
        tracing::debug!(database = database_name, "MongoDB client created");

        Ok(Self { database })
    }

    /// The database handle
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn users(&self) -> Collection<User> {
        self.database.collection(USERS_COLLECTION)
    }
}

#[async_trait]
impl Store for MongoStore {
    fn database_name(&self) -> &str {
        self.database.name()
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, DbError> {
        Ok(self.database.list_collection_names().await?)
    }

    async fn ensure_indexes(&self) -> Result<(), DbError> {
        let options = IndexOptions::builder().unique(true).build();
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(options)
            .build();

        match self.users().create_index(index).await {
            Ok(created) => {
                tracing::debug!(index = %created.index_name, "users index ensured");
                Ok(())
            }
            Err(e) if is_duplicate_key(&e) => Err(DbError::DuplicateKeys(e.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        Ok(self.users().find_one(doc! { "email": email }).await?)
    }

    /// Single upsert with `$setOnInsert`: existing documents are never touched.
    /// Two racing upserts can both miss the filter; the unique index turns the
    /// loser into a duplicate key error, reported as `AlreadyExists`.
    async fn insert_user_if_absent(&self, user: &User) -> Result<InsertOutcome, DbError> {
        let mut document = bson::to_document(user)?;
        document.remove("_id");

        let result = self
            .users()
            .update_one(
                doc! { "email": user.email.as_str() },
                doc! { "$setOnInsert": document },
            )
            .upsert(true)
            .await;

        match result {
            Ok(r) if r.upserted_id.is_some() => Ok(InsertOutcome::Inserted),
            Ok(_) => Ok(InsertOutcome::AlreadyExists),
            Err(e) if is_duplicate_key(&e) => Ok(InsertOutcome::AlreadyExists),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DATABASE_NAME;

    #[tokio::test]
    async fn connect_is_lazy_and_binds_database() {
        // Nothing listens here; building the client must still succeed.
        let store = MongoStore::connect("mongodb://127.0.0.1:1", DATABASE_NAME)
            .await
            .expect("client creation should not dial the server");
        assert_eq!(store.database_name(), "resumematch");
        assert_eq!(store.database().name(), "resumematch");
    }

    #[tokio::test]
    async fn rejects_malformed_uri() {
        let result = MongoStore::connect("not-a-uri", DATABASE_NAME).await;
        assert!(matches!(result, Err(DbError::Driver(_))));
    }

    #[tokio::test]
    async fn unreachable_server_is_unavailable() {
        let store = MongoStore::connect(
            "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=300",
            DATABASE_NAME,
        )
        .await
        .unwrap();

        let err = store.list_collection_names().await.unwrap_err();
        assert!(matches!(err, DbError::Unavailable(_)), "got {err:?}");
    }

    // Integration tests require a real database
    // Run with: MONGO_URI=mongodb://... cargo test -p resumematch-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn lists_collections_on_live_server() {
        let uri = std::env::var("MONGO_URI").expect("MONGO_URI required");
        let store = MongoStore::connect(&uri, "resumematch_test_list")
            .await
            .expect("client creation failed");

        store.ensure_indexes().await.expect("index creation failed");
        let names = store.list_collection_names().await.expect("list failed");
        assert!(names.contains(&USERS_COLLECTION.to_string()));

        store.database().drop().await.expect("drop failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_emails_block_unique_index() {
        let uri = std::env::var("MONGO_URI").expect("MONGO_URI required");
        let store = MongoStore::connect(&uri, "resumematch_test_dupes")
            .await
            .expect("client creation failed");
        store.database().drop().await.expect("drop failed");

        let raw = store.database().collection::<bson::Document>(USERS_COLLECTION);
        for _ in 0..2 {
            raw.insert_one(doc! { "email": "admin@example.com", "role": "admin" })
                .await
                .expect("insert failed");
        }

        let err = store.ensure_indexes().await.unwrap_err();
        assert!(matches!(err, DbError::DuplicateKeys(_)), "got {err:?}");

        store.database().drop().await.expect("drop failed");
    }
}
