use momentscape_core::ClientConfig;

use crate::commands::common::{connect, submitted_note_id};
use crate::error::CliError;

pub async fn run_add(
    title: &str,
    body_parts: &[String],
    config: ClientConfig,
) -> Result<(), CliError> {
    let body = body_parts.join(" ");
    let mut session = connect(config).await?;

    let outcome = session.submit(title, body).await;
    let id = submitted_note_id(&session, outcome)?;
    println!("{id}");
    Ok(())
}
