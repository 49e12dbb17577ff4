//! Create the database file and schema without serving

use anyhow::Result;
use clap::Parser;

use super::DatabaseArgs;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let pool = args.db.open().await?;
    pool.close().await;

    println!("Database ready at {}", args.db.database.display());
    Ok(())
}
