//! User repository
//!
//! - create/update: email uniqueness is left to the UNIQUE constraint
//! - delete: removes the user's borrows in the same transaction

use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use super::{begin_write, is_unique_violation, DbError};
use crate::models::{Email, UserName};

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<UserName>,
    pub email: Option<Email>,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user. Fails with `Conflict` if the email is taken.
    pub async fn create(&self, name: UserName, email: Email) -> Result<User, DbError> {
        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (name, email)
            VALUES (?1, ?2)
            RETURNING id, name, email
            "#,
        )
        .bind(name.as_str())
        .bind(email.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| email_conflict(e, &email))?;

        debug!(user_id = user.id, "user created");
        Ok(user)
    }

    /// List every user, ordered by id.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users: Vec<User> = sqlx::query_as("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(users)
    }

    /// Get a single user by id.
    pub async fn get(&self, id: i64) -> Result<User, DbError> {
        sqlx::query_as("SELECT id, name, email FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("user", id))
    }

    /// Apply the present fields of `changes` in a single statement.
    pub async fn update(&self, id: i64, changes: UserChanges) -> Result<User, DbError> {
        let user: User = sqlx::query_as(
            r#"
            UPDATE users
            SET name = COALESCE(?1, name),
                email = COALESCE(?2, email)
            WHERE id = ?3
            RETURNING id, name, email
            "#,
        )
        .bind(changes.name.as_ref().map(UserName::as_str))
        .bind(changes.email.as_ref().map(Email::as_str))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| match &changes.email {
            Some(email) => email_conflict(e, email),
            None => DbError::from(e),
        })?
        .ok_or_else(|| DbError::not_found("user", id))?;

        debug!(user_id = user.id, "user updated");
        Ok(user)
    }

    /// Delete a user and, atomically, all of their borrows.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = begin_write(self.pool).await?;

        let borrows = sqlx::query("DELETE FROM borrows WHERE user_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            // dropping tx rolls back
            return Err(DbError::not_found("user", id));
        }

        tx.commit().await?;
        debug!(user_id = id, borrows, "user deleted");
        Ok(())
    }
}

fn email_conflict(err: sqlx::Error, email: &Email) -> DbError {
    if is_unique_violation(&err) {
        DbError::Conflict {
            resource: "user",
            field: "email",
            value: email.as_str().to_owned(),
        }
    } else {
        DbError::Sqlx(err)
    }
}
