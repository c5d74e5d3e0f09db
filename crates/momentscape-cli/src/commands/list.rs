use chrono::Utc;
use momentscape_core::ClientConfig;

use crate::commands::common::{connect, format_note_lines, EMPTY_NOTES_MESSAGE};
use crate::error::CliError;

pub async fn run_list(
    limit: Option<usize>,
    as_json: bool,
    config: ClientConfig,
) -> Result<(), CliError> {
    let session = connect(config).await?;
    let notes = session.notes();
    let notes = &notes[..limit.unwrap_or(notes.len()).min(notes.len())];

    if as_json {
        println!("{}", serde_json::to_string_pretty(notes)?);
    } else if notes.is_empty() {
        println!("{EMPTY_NOTES_MESSAGE}");
    } else {
        for line in format_note_lines(notes, Utc::now()) {
            println!("{line}");
        }
    }

    Ok(())
}
