use momentscape_core::session::Outcome;
use momentscape_core::ClientConfig;

use crate::commands::common::{connect, resolve_note, session_failure};
use crate::error::CliError;

pub async fn run_delete(id: &str, config: ClientConfig) -> Result<(), CliError> {
    let mut session = connect(config).await?;
    let note = resolve_note(id, &session)?;

    match session.delete_note(&note.id).await {
        Outcome::Applied => {
            println!("{}", note.id);
            Ok(())
        }
        Outcome::Failed | Outcome::Discarded => Err(session_failure(&session)),
    }
}
