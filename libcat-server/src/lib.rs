//! libcat-server: library catalog records over HTTP
//!
//! Tracks users, authors, books, and borrow events in a SQLite store
//! and exposes CRUD endpoints for them as JSON.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, create_memory_pool, run_migrations, DbError};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
