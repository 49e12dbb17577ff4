//! Borrow repository
//!
//! A borrow links one user to one book at a point in time. There is no
//! return tracking, and a book may be borrowed any number of times.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use super::{begin_write, ensure_exists, DbError};

/// Borrow record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Borrow {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub borrow_date: DateTime<Utc>,
}

/// A user's borrow, joined with the book title
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserBorrow {
    pub book_id: i64,
    pub book_title: String,
    pub borrow_date: DateTime<Utc>,
}

/// A book's borrow, joined with the borrower's name
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BookBorrow {
    pub user_id: i64,
    pub user_name: String,
    pub borrow_date: DateTime<Utc>,
}

/// Borrow repository
pub struct BorrowRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BorrowRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a borrow stamped with the current UTC time.
    ///
    /// Fails with `NotFound` if either the user or the book does not exist;
    /// both are checked in the same transaction as the insert.
    pub async fn create(&self, user_id: i64, book_id: i64) -> Result<Borrow, DbError> {
        let mut tx = begin_write(self.pool).await?;

        ensure_exists(&mut *tx, "users", "user", user_id).await?;
        ensure_exists(&mut *tx, "books", "book", book_id).await?;

        let borrow: Borrow = sqlx::query_as(
            r#"
            INSERT INTO borrows (user_id, book_id, borrow_date)
            VALUES (?1, ?2, ?3)
            RETURNING id, user_id, book_id, borrow_date
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(borrow_id = borrow.id, user_id, book_id, "borrow recorded");
        Ok(borrow)
    }

    /// Borrows of one user with book titles. Fails with `NotFound` if the user does not exist.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<UserBorrow>, DbError> {
        let mut tx = self.pool.begin().await?;

        ensure_exists(&mut *tx, "users", "user", user_id).await?;

        let borrows: Vec<UserBorrow> = sqlx::query_as(
            r#"
            SELECT br.book_id, b.title AS book_title, br.borrow_date
            FROM borrows br
            JOIN books b ON b.id = br.book_id
            WHERE br.user_id = ?1
            ORDER BY br.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(borrows)
    }

    /// Borrows of one book with borrower names. Fails with `NotFound` if the book does not exist.
    pub async fn list_for_book(&self, book_id: i64) -> Result<Vec<BookBorrow>, DbError> {
        let mut tx = self.pool.begin().await?;

        ensure_exists(&mut *tx, "books", "book", book_id).await?;

        let borrows: Vec<BookBorrow> = sqlx::query_as(
            r#"
            SELECT br.user_id, u.name AS user_name, br.borrow_date
            FROM borrows br
            JOIN users u ON u.id = br.user_id
            WHERE br.book_id = ?1
            ORDER BY br.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(borrows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, AuthorRepo, BookRepo, UserRepo};
    use crate::models::{AuthorName, BookTitle, Email, UserName};

    struct Fixture {
        pool: SqlitePool,
        user_id: i64,
        book_id: i64,
    }

    async fn fixture() -> Fixture {
        let pool = test_pool().await;
        let author = AuthorRepo::new(&pool)
            .create(AuthorName::new("Tolkien").unwrap())
            .await
            .unwrap();
        let book = BookRepo::new(&pool)
            .create(BookTitle::new("LOTR").unwrap(), author.id)
            .await
            .unwrap();
        let user = UserRepo::new(&pool)
            .create(UserName::new("Bob").unwrap(), Email::new("b@x.com").unwrap())
            .await
            .unwrap();
        Fixture {
            user_id: user.id,
            book_id: book.id,
            pool,
        }
    }

    #[tokio::test]
    async fn create_stamps_current_time() {
        let fx = fixture().await;
        let before = Utc::now();

        let borrow = BorrowRepo::new(&fx.pool)
            .create(fx.user_id, fx.book_id)
            .await
            .unwrap();

        assert_eq!(borrow.user_id, fx.user_id);
        assert_eq!(borrow.book_id, fx.book_id);
        assert!(borrow.borrow_date >= before);
        assert!(borrow.borrow_date <= Utc::now());
    }

    #[tokio::test]
    async fn missing_references_create_nothing() {
        let fx = fixture().await;
        let repo = BorrowRepo::new(&fx.pool);

        let err = repo.create(999, fx.book_id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "user", id: 999 }));

        let err = repo.create(fx.user_id, 999).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "book", id: 999 }));

        assert!(repo.list_for_user(fx.user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lists_by_user_and_by_book() {
        let fx = fixture().await;
        let repo = BorrowRepo::new(&fx.pool);
        let borrow = repo.create(fx.user_id, fx.book_id).await.unwrap();

        let by_user = repo.list_for_user(fx.user_id).await.unwrap();
        assert_eq!(
            by_user,
            vec![UserBorrow {
                book_id: fx.book_id,
                book_title: "LOTR".into(),
                borrow_date: borrow.borrow_date,
            }]
        );

        let by_book = repo.list_for_book(fx.book_id).await.unwrap();
        assert_eq!(by_book.len(), 1);
        assert_eq!(by_book[0].user_name, "Bob");
        assert_eq!(by_book[0].user_id, fx.user_id);
    }

    #[tokio::test]
    async fn lists_require_existing_owner() {
        let fx = fixture().await;
        let repo = BorrowRepo::new(&fx.pool);

        assert!(matches!(
            repo.list_for_user(404).await.unwrap_err(),
            DbError::NotFound { resource: "user", .. }
        ));
        assert!(matches!(
            repo.list_for_book(404).await.unwrap_err(),
            DbError::NotFound { resource: "book", .. }
        ));
    }

    #[tokio::test]
    async fn borrow_date_cannot_be_rewritten() {
        let fx = fixture().await;
        let borrow = BorrowRepo::new(&fx.pool)
            .create(fx.user_id, fx.book_id)
            .await
            .unwrap();

        let result = sqlx::query("UPDATE borrows SET borrow_date = ?1 WHERE id = ?2")
            .bind(Utc::now())
            .bind(borrow.id)
            .execute(&fx.pool)
            .await;

        assert!(result.is_err());
    }
}
