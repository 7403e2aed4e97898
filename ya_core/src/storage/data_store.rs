//! SQLite connection handling

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::errors::StorageError;

/// Handle to the relational store shared by every table module
///
/// Cheap to clone; clones share the same pool.
#[derive(Clone, Debug)]
pub struct DataStore {
    pool: SqlitePool,
}

impl DataStore {
    /// Open (and create if missing) the database at `url`
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        tracing::info!("Initializing data store with url: {}", url);

        let opts = SqliteConnectOptions::from_str(url)
            .map_err(|e| StorageError::Storage(format!("Invalid SQLite url {url}: {e}")))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new().connect_with(opts).await?;

        tracing::info!("Connected to database: url={}", url);
        Ok(Self { pool })
    }

    /// A private in-memory database
    ///
    /// Every connection to `sqlite::memory:` opens a different database, so the
    /// pool is pinned to one connection that is never recycled.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?;

        tracing::debug!("Opened in-memory data store");
        Ok(Self { pool })
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
