use momentscape_core::ClientConfig;

use crate::commands::common::{connect, resolve_note, submitted_note_id};
use crate::error::CliError;

pub async fn run_edit(
    id: &str,
    title: Option<String>,
    body: Option<String>,
    config: ClientConfig,
) -> Result<(), CliError> {
    if title.is_none() && body.is_none() {
        return Err(CliError::NothingToEdit);
    }

    let mut session = connect(config).await?;
    let note = resolve_note(id, &session)?;

    session.begin_edit(&note);
    let title = title.unwrap_or(note.title);
    let body = body.unwrap_or(note.body);
    let outcome = session.submit(title, body).await;
    let id = submitted_note_id(&session, outcome)?;
    println!("{id}");
    Ok(())
}
