//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the pool, one repository per record type
//! - Uses JOINs for relationship lists (no N+1)
//! - Maps UNIQUE violations to `DbError::Conflict` (no check-then-insert)
//! - Uses transactions for foreign-key checks and cascading deletes

pub mod authors;
pub mod books;
pub mod borrows;
pub mod users;

pub use authors::{Author, AuthorRepo, AuthorWithBooks};
pub use books::{Book, BookRepo, BookWithAuthor};
pub use borrows::{BookBorrow, Borrow, BorrowRepo, UserBorrow};
pub use users::{User, UserChanges, UserRepo};

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: i64 },

    #[error("conflict: {resource} with {field} '{value}' already exists")]
    Conflict {
        resource: &'static str,
        field: &'static str,
        value: String,
    },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Start a transaction that takes the write lock up front.
///
/// A deferred transaction that reads before it writes cannot upgrade its
/// lock while another connection holds one, and SQLite answers `SQLITE_BUSY`
/// without waiting. `BEGIN IMMEDIATE` queues on the busy timeout instead.
pub(crate) async fn begin_write(
    pool: &SqlitePool,
) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Fail with `NotFound` unless `table` has a row with this id.
///
/// `table` is always a fixed identifier from this crate, never input.
pub(crate) async fn ensure_exists(
    conn: &mut SqliteConnection,
    table: &'static str,
    resource: &'static str,
    id: i64,
) -> Result<(), DbError> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)");
    let exists: i64 = sqlx::query_scalar(&sql).bind(id).fetch_one(&mut *conn).await?;

    if exists != 0 {
        Ok(())
    } else {
        Err(DbError::not_found(resource, id))
    }
}
