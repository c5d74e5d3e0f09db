use std::time::Duration;

use clap::{Parser, Subcommand};
use momentscape_core::config::{DEFAULT_HEALTH_PATH, DEFAULT_PROBE_TIMEOUT_SECS};
use momentscape_core::ClientConfig;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "momentscape")]
#[command(about = "Keep short notes on a MomentScape notes server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Notes server base URL [default: $MOMENTSCAPE_API_URL, then http://localhost:5000]
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Health endpoint probed before any note is loaded
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_HEALTH_PATH)]
    pub health_path: String,

    /// Seconds to wait for the health probe
    #[arg(long, global = true, value_name = "SECS", default_value_t = DEFAULT_PROBE_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl Cli {
    /// Resolves the server configuration once, at startup.
    pub fn client_config(&self) -> Result<ClientConfig, CliError> {
        Ok(ClientConfig::resolve(self.api_url.clone())?
            .with_health_path(self.health_path.as_str())
            .with_probe_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether the notes server is reachable
    Status,
    /// List notes
    #[command(alias = "ls")]
    List {
        /// Number of notes to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title
        title: String,
        /// Note body
        #[arg(required = true)]
        body: Vec<String>,
    },
    /// Change the title and/or body of a note
    Edit {
        /// Note ID or unique ID prefix
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New body
        #[arg(long)]
        body: Option<String>,
    },
    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Interactive session (the default when no command is given)
    Shell,
}
