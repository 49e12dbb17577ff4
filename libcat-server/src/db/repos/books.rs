//! Book repository
//!
//! - create: author existence check and insert share a transaction
//! - list: JOIN with authors for the author name (no N+1)
//! - delete: removes the book's borrows in the same transaction

use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use super::{begin_write, ensure_exists, DbError};
use crate::models::BookTitle;

/// Book record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author_id: i64,
}

/// Book with its author's name for list display
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BookWithAuthor {
    pub id: i64,
    pub title: String,
    pub author: String,
}

/// Book repository
pub struct BookRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BookRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a book. Fails with `NotFound` if the author does not exist.
    pub async fn create(&self, title: BookTitle, author_id: i64) -> Result<Book, DbError> {
        let mut tx = begin_write(self.pool).await?;

        ensure_exists(&mut *tx, "authors", "author", author_id).await?;

        let book: Book = sqlx::query_as(
            r#"
            INSERT INTO books (title, author_id)
            VALUES (?1, ?2)
            RETURNING id, title, author_id
            "#,
        )
        .bind(title.as_str())
        .bind(author_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(book_id = book.id, author_id, "book created");
        Ok(book)
    }

    /// List every book with its author's name, ordered by id.
    pub async fn list(&self) -> Result<Vec<BookWithAuthor>, DbError> {
        let books: Vec<BookWithAuthor> = sqlx::query_as(
            r#"
            SELECT b.id, b.title, a.name AS author
            FROM books b
            JOIN authors a ON a.id = b.author_id
            ORDER BY b.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;
        Ok(books)
    }

    pub async fn get(&self, id: i64) -> Result<Book, DbError> {
        sqlx::query_as("SELECT id, title, author_id FROM books WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("book", id))
    }

    /// List the books of one author. Fails with `NotFound` if the author does not exist.
    pub async fn list_for_author(&self, author_id: i64) -> Result<Vec<Book>, DbError> {
        let mut tx = self.pool.begin().await?;

        ensure_exists(&mut *tx, "authors", "author", author_id).await?;

        let books: Vec<Book> = sqlx::query_as(
            "SELECT id, title, author_id FROM books WHERE author_id = ?1 ORDER BY id",
        )
        .bind(author_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(books)
    }

    /// Delete a book and, atomically, all of its borrows.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = begin_write(self.pool).await?;

        let borrows = sqlx::query("DELETE FROM borrows WHERE book_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM books WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(DbError::not_found("book", id));
        }

        tx.commit().await?;
        debug!(book_id = id, borrows, "book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, AuthorRepo, BorrowRepo, UserRepo};
    use crate::models::{AuthorName, Email, UserName};

    async fn author(pool: &SqlitePool, name: &str) -> i64 {
        AuthorRepo::new(pool)
            .create(AuthorName::new(name).unwrap())
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn create_with_missing_author_creates_nothing() {
        let pool = test_pool().await;
        let repo = BookRepo::new(&pool);

        let err = repo
            .create(BookTitle::new("Orphan").unwrap(), 99)
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { resource: "author", id: 99 }));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_joins_author_name() {
        let pool = test_pool().await;
        let repo = BookRepo::new(&pool);
        let tolkien = author(&pool, "Tolkien").await;

        let lotr = repo.create(BookTitle::new("LOTR").unwrap(), tolkien).await.unwrap();

        assert_eq!(
            repo.list().await.unwrap(),
            vec![BookWithAuthor {
                id: lotr.id,
                title: "LOTR".into(),
                author: "Tolkien".into(),
            }]
        );
        assert_eq!(repo.get(lotr.id).await.unwrap(), lotr);
    }

    #[tokio::test]
    async fn list_for_author_checks_owner() {
        let pool = test_pool().await;
        let repo = BookRepo::new(&pool);
        let tolkien = author(&pool, "Tolkien").await;
        let lewis = author(&pool, "Lewis").await;
        repo.create(BookTitle::new("LOTR").unwrap(), tolkien).await.unwrap();

        assert_eq!(repo.list_for_author(tolkien).await.unwrap().len(), 1);
        assert!(repo.list_for_author(lewis).await.unwrap().is_empty());
        assert!(matches!(
            repo.list_for_author(42).await.unwrap_err(),
            DbError::NotFound { resource: "author", .. }
        ));
    }

    #[tokio::test]
    async fn delete_removes_borrows() {
        let pool = test_pool().await;
        let repo = BookRepo::new(&pool);
        let tolkien = author(&pool, "Tolkien").await;
        let lotr = repo.create(BookTitle::new("LOTR").unwrap(), tolkien).await.unwrap();
        let bob = UserRepo::new(&pool)
            .create(UserName::new("Bob").unwrap(), Email::new("b@x.com").unwrap())
            .await
            .unwrap();
        let borrows = BorrowRepo::new(&pool);
        borrows.create(bob.id, lotr.id).await.unwrap();

        repo.delete(lotr.id).await.unwrap();

        assert!(matches!(repo.get(lotr.id).await, Err(DbError::NotFound { .. })));
        assert!(borrows.list_for_user(bob.id).await.unwrap().is_empty());
        assert!(matches!(repo.delete(lotr.id).await, Err(DbError::NotFound { .. })));
    }
}
