//! Database layer - connection pool, schema, and repositories
//!
//! # Design Principles
//!
//! - The pool is an explicit handle passed to repositories, never a global
//! - Relationship lists are JOIN queries keyed by foreign key, no N+1
//! - Rely on the UNIQUE constraint for emails, map the violation to a conflict
//! - Foreign-key checks and cascading deletes run inside one transaction

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_memory_pool, create_pool, create_pool_with_options};
pub use repos::*;
pub use schema::run_migrations;

/// In-memory pool with the schema applied, for tests.
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    let pool = create_memory_pool().await.expect("memory pool");
    run_migrations(&pool).await.expect("migrations");
    pool
}
