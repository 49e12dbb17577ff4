//! Subcommand implementations

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use sqlx::SqlitePool;

use libcat_server::{create_pool, run_migrations};

pub mod init_db;
pub mod serve;

pub use init_db::run_init_db;
pub use serve::run_serve;

/// Location of the SQLite store, shared by every subcommand
#[derive(Args, Debug)]
pub struct DatabaseArgs {
    /// Path to the SQLite database file (created if absent)
    #[arg(long, short = 'd', env = "LIBCAT_DATABASE", default_value = "library.db")]
    pub database: PathBuf,
}

impl DatabaseArgs {
    /// Open the store and make sure the schema exists.
    pub async fn open(&self) -> Result<SqlitePool> {
        let pool = create_pool(&self.database)
            .await
            .with_context(|| format!("failed to open database at {}", self.database.display()))?;

        run_migrations(&pool)
            .await
            .context("failed to create database schema")?;

        Ok(pool)
    }
}
