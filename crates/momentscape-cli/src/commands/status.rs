use momentscape_core::{ClientConfig, ConnectivityProber, HttpNotesApi};

use crate::error::CliError;

pub async fn run_status(config: ClientConfig) -> Result<(), CliError> {
    let health_url = config.health_url();
    let mut prober = ConnectivityProber::new(config.probe_timeout());
    let api = HttpNotesApi::new(config)?;

    prober.probe(&api).await;
    if prober.connected().is_some() {
        println!("Connected to {health_url}");
        return Ok(());
    }

    let reason = prober.failure().unwrap_or("unknown error");
    Err(CliError::Unreachable(format!(
        "Cannot reach {health_url}: {reason}"
    )))
}
