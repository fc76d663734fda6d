//! One-shot admin seeding command

use anyhow::{Context, Result};

use resumematch_server::{seed_admin, AdminSeed, Config, MongoStore, DATABASE_NAME};

/// Create the default admin user unless it already exists.
///
/// Prints the outcome; both "created" and "already exists" exit 0.
pub async fn run_seed_admin() -> Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;

    let store = MongoStore::connect(&config.mongo_uri, DATABASE_NAME)
        .await
        .context("Failed to create MongoDB client")?;

    let outcome = seed_admin(&store, &AdminSeed::default())
        .await
        .context("Failed to seed admin user")?;

    println!("{}", outcome.message());
    Ok(())
}
