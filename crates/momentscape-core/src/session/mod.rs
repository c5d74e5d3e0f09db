//! Note session: the in-memory collection, the edit session, and every
//! mutation of either.
//!
//! A session only exists after a successful connectivity probe. Startup is
//! packaged as [`start_session`], which probes once and, when the service is
//! reachable, performs the initial load.

mod controller;
mod edit;
#[cfg(test)]
pub(crate) mod testing;

use std::fmt;

use thiserror::Error;

use crate::api::NotesApi;
use crate::connectivity::ConnectivityProber;

pub use controller::{
    DeleteTicket, LoadTicket, NoteSession, Outcome, SessionStatus, SubmitOutcome, SubmitTicket,
};
pub use edit::EditSession;

/// The mutating request that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationAction {
    Create,
    Update,
    Delete,
}

impl fmt::Display for MutationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// Display-only failure surfaced to the user.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Probe failed; the session cannot start without a restart
    #[error("Cannot reach the notes server: {0}")]
    Connectivity(String),
    /// Fetching the collection failed
    #[error("Failed to fetch notes from server: {0}")]
    Load(String),
    #[error("Failed to {action} note: {message}")]
    Mutation {
        action: MutationAction,
        message: String,
    },
}

impl SessionError {
    /// Only connectivity failures leave the user with nothing but a restart.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }
}

/// Result of bringing a session up.
#[derive(Debug)]
pub enum Startup<A> {
    /// The service answered the probe; the initial load has been attempted
    Connected(NoteSession<A>),
    /// Dead end: the probe failed and no load was attempted
    Unreachable(SessionError),
}

/// Probes the service once and, if it is reachable, loads the collection.
pub async fn start_session<A: NotesApi>(api: A, prober: &mut ConnectivityProber) -> Startup<A> {
    prober.probe(&api).await;
    let Some(connected) = prober.connected() else {
        let reason = prober.failure().unwrap_or("unknown error").to_string();
        return Startup::Unreachable(SessionError::Connectivity(reason));
    };

    let mut session = NoteSession::new(api, connected);
    session.load_all().await;
    Startup::Connected(session)
}
