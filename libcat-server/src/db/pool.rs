//! Database connection pool management
//!
//! Uses sqlx SqlitePool with explicit connection limits. Every connection
//! has foreign-key enforcement switched on. File stores run in WAL mode so
//! readers do not block the single writer.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default maximum connections for the pool.
/// Kept low; SQLite serializes writers anyway.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a writer waits for the lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open (creating if absent) a SQLite database file as a connection pool.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or created.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(Path::new("library.db")).await?;
/// ```
pub async fn create_pool(path: &Path) -> Result<SqlitePool, sqlx::Error> {
    create_pool_with_options(path, DEFAULT_MAX_CONNECTIONS).await
}

/// Open a SQLite database file with a custom connection limit.
pub async fn create_pool_with_options(
    path: &Path,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Create a pool backed by a private in-memory database.
///
/// Each SQLite connection to `:memory:` is its own database, so the pool
/// holds exactly one connection and never recycles it.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_pool_acquires_connection() {
        let pool = create_memory_pool().await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn foreign_keys_enabled() {
        let pool = create_memory_pool().await.expect("pool creation failed");

        let (enabled,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .expect("pragma failed");

        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn file_pool_creates_missing_database() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("library.db");
        assert!(!path.exists());

        let pool = create_pool(&path).await.expect("pool creation failed");
        sqlx::query("SELECT 1").execute(&pool).await.expect("query failed");
        pool.close().await;

        assert!(path.exists());
    }

    #[tokio::test]
    async fn file_pool_uses_wal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let pool = create_pool(&dir.path().join("library.db"))
            .await
            .expect("pool creation failed");

        let (mode,): (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .expect("pragma failed");

        assert_eq!(mode, "wal");
    }
}
