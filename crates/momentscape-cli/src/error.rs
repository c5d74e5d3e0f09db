use std::io;

use momentscape_core::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] momentscape_core::Error),
    #[error(transparent)]
    Api(#[from] momentscape_core::ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("{0}. Restart momentscape once the server is reachable.")]
    Unreachable(String),
    #[error("Title and body must both be non-empty")]
    EmptyContent,
    #[error("Nothing to change: pass --title and/or --body")]
    NothingToEdit,
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Note not found for id/prefix: {0}")]
    NoteNotFound(String),
    #[error("{0}")]
    AmbiguousNoteId(String),
    #[error("The server response was discarded; run `momentscape list` to check the result")]
    Discarded,
}
