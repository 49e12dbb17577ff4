//! libcat CLI - library catalog record keeper
//!
//! Entry point for the `libcat` binary:
//! - `serve`: run the JSON API over a SQLite store
//! - `init-db`: create the store and its schema, then exit
//!
//! Values from a `.env` file in the working directory are loaded first,
//! so `LIBCAT_DATABASE` and `LIBCAT_BIND` can be set there.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "libcat",
    author,
    version,
    about = "Library catalog: users, authors, books, and borrows over a JSON API"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the database and schema, then exit
    InitDb(commands::init_db::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // dotenvy doesn't overwrite variables that are already set
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::InitDb(args) => commands::run_init_db(args).await?,
    }
    Ok(())
}
