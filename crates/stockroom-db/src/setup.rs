//! Store connection setup.
//!
//! Entry points call [`connect`] with the configured store address before
//! anything else; failure here means the process cannot serve.

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::store::SqliteDocumentStore;

/// Connects to the `SQLite` store at `address`.
///
/// `address` is a `SQLite` URL such as `sqlite://stockroom.db` or
/// `sqlite::memory:`. The database file is created if it doesn't exist.
/// At least one connection is kept open so an in-memory store survives
/// idle periods.
///
/// # Example
///
/// ```rust,no_run
/// use stockroom_db::connect;
///
/// # async fn example() -> anyhow::Result<()> {
/// let store = connect("sqlite://stockroom.db", 8).await?;
/// # Ok(())
/// # }
/// ```
pub async fn connect(address: &str, max_connections: u32) -> Result<SqliteDocumentStore> {
    let options = SqliteConnectOptions::from_str(address)
        .with_context(|| format!("Invalid store address: {address}"))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .min_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to connect to store at {address}"))?;

    tracing::info!(
        target: "stockroom.store",
        address,
        max_connections,
        "Connected to document store"
    );

    Ok(SqliteDocumentStore::new(pool))
}

/// Connects to a fresh in-memory store for testing.
///
/// Uses a single connection so every scoped handle sees the same database.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_store() -> Result<SqliteDocumentStore> {
    connect("sqlite::memory:", 1).await
}
