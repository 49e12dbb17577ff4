//! Author repository
//!
//! Deleting an author cascades to its books and their borrows, in one
//! transaction, children first.

use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use super::{begin_write, Book, DbError};
use crate::models::AuthorName;

/// Author record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

/// Author together with the books it owns
#[derive(Debug, Clone)]
pub struct AuthorWithBooks {
    pub author: Author,
    pub books: Vec<Book>,
}

/// Author repository
pub struct AuthorRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AuthorRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: AuthorName) -> Result<Author, DbError> {
        let author: Author = sqlx::query_as(
            "INSERT INTO authors (name) VALUES (?1) RETURNING id, name",
        )
        .bind(name.as_str())
        .fetch_one(self.pool)
        .await?;

        debug!(author_id = author.id, "author created");
        Ok(author)
    }

    /// List every author, ordered by id.
    pub async fn list(&self) -> Result<Vec<Author>, DbError> {
        let authors: Vec<Author> = sqlx::query_as("SELECT id, name FROM authors ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(authors)
    }

    pub async fn get(&self, id: i64) -> Result<Author, DbError> {
        sqlx::query_as("SELECT id, name FROM authors WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("author", id))
    }

    /// Get an author and its books, read in one transaction.
    pub async fn get_with_books(&self, id: i64) -> Result<AuthorWithBooks, DbError> {
        let mut tx = self.pool.begin().await?;

        let author: Author = sqlx::query_as("SELECT id, name FROM authors WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("author", id))?;

        let books: Vec<Book> = sqlx::query_as(
            "SELECT id, title, author_id FROM books WHERE author_id = ?1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(AuthorWithBooks { author, books })
    }

    /// Delete an author, its books, and every borrow of those books.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = begin_write(self.pool).await?;

        let borrows = sqlx::query(
            r#"
            DELETE FROM borrows
            WHERE book_id IN (SELECT id FROM books WHERE author_id = ?1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let books = sqlx::query("DELETE FROM books WHERE author_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM authors WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(DbError::not_found("author", id));
        }

        tx.commit().await?;
        debug!(author_id = id, books, borrows, "author deleted");
        Ok(())
    }
}
