use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};
use momentscape_core::session::SubmitOutcome;
use momentscape_core::{
    start_session, ClientConfig, ConnectivityProber, HttpNotesApi, Note, NoteId, NoteSession,
    SessionStatus, Startup,
};

use crate::error::CliError;

pub const EMPTY_NOTES_MESSAGE: &str = "No notes yet. Create your first note!";

/// Probes the server and loads every note.
pub async fn open_session(config: ClientConfig) -> Result<Startup<HttpNotesApi>, CliError> {
    let mut prober = ConnectivityProber::new(config.probe_timeout());
    let api = HttpNotesApi::new(config)?;
    Ok(start_session(api, &mut prober).await)
}

/// Like [`open_session`], but a failed probe or initial load is an error.
pub async fn connect(config: ClientConfig) -> Result<NoteSession<HttpNotesApi>, CliError> {
    match open_session(config).await? {
        Startup::Unreachable(error) => Err(CliError::Unreachable(error.to_string())),
        Startup::Connected(session) => {
            if session.status() == SessionStatus::Error {
                if let Some(error) = session.last_error() {
                    return Err(error.clone().into());
                }
            }
            Ok(session)
        }
    }
}

/// Maps a submit outcome to the affected note id, surfacing the session
/// error when the request failed.
pub fn submitted_note_id<A>(
    session: &NoteSession<A>,
    outcome: SubmitOutcome,
) -> Result<NoteId, CliError> {
    match outcome {
        SubmitOutcome::Created(id) | SubmitOutcome::Updated(id) => Ok(id),
        SubmitOutcome::Skipped => Err(CliError::EmptyContent),
        SubmitOutcome::Discarded => Err(CliError::Discarded),
        SubmitOutcome::Failed => Err(session_failure(session)),
    }
}

pub fn session_failure<A>(session: &NoteSession<A>) -> CliError {
    session
        .last_error()
        .cloned()
        .map_or(CliError::Discarded, CliError::from)
}

/// Finds a note by full id, or by a prefix matching exactly one note.
pub fn resolve_note<A>(note_query: &str, session: &NoteSession<A>) -> Result<Note, CliError> {
    let query = normalize_note_identifier(note_query)?;
    if let Some(note) = session.note(&NoteId::new(query.as_str())) {
        return Ok(note.clone());
    }

    let matching = session
        .notes()
        .iter()
        .filter(|note| note.id.as_str().starts_with(&query))
        .collect::<Vec<_>>();

    match matching.as_slice() {
        [] => Err(CliError::NoteNotFound(query)),
        [note] => Ok((*note).clone()),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|note| short_id(&note.id))
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::AmbiguousNoteId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn short_id(id: &NoteId) -> String {
    id.as_str().chars().take(8).collect()
}

pub fn format_note_lines(notes: &[Note], now: DateTime<Utc>) -> Vec<String> {
    notes
        .iter()
        .map(|note| {
            let short_id = short_id(&note.id);
            let title = preview(&note.title, 24);
            let body = preview(&note.body, 40);
            let relative_time = format_relative_time(note.last_changed_at(), now);
            format!("{short_id:<8}  {title:<24}  {body:<40}  {relative_time}")
        })
        .collect()
}

/// First line of `text`, whitespace collapsed, truncated with an ellipsis.
pub fn preview(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(at).num_minutes().max(0);
    let hour = 60;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < 1 {
        "just now".to_string()
    } else if diff < hour {
        format!("{diff}m ago")
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

/// Creation date, plus the update date when the note has been edited.
pub fn format_note_dates(note: &Note) -> String {
    let created = format_note_date(&note.created_at.with_timezone(&Local));
    match note.updated_at {
        Some(updated) => format!(
            "{created} (Updated: {})",
            format_note_date(&updated.with_timezone(&Local))
        ),
        None => created,
    }
}

/// `Mar 1, 2025, 09:30 AM`
pub fn format_note_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    at.format("%b %-d, %Y, %I:%M %p").to_string()
}
