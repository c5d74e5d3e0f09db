//! MomentScape CLI - keep short notes on a remote notes server
//!
//! Every command probes the server once before touching any note.

mod cli;
mod commands;
mod error;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::commands::shell::run_shell;
use crate::commands::status::run_status;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("momentscape=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.client_config()?;

    match cli.command {
        Some(Commands::Status) => run_status(config).await?,
        Some(Commands::List { limit, json }) => run_list(limit, json, config).await?,
        Some(Commands::Add { title, body }) => run_add(&title, &body, config).await?,
        Some(Commands::Edit { id, title, body }) => run_edit(&id, title, body, config).await?,
        Some(Commands::Delete { id }) => run_delete(&id, config).await?,
        Some(Commands::Shell) | None => run_shell(config).await?,
    }

    Ok(())
}
