//! One-shot reachability check run before any note is loaded.

use std::time::Duration;

use crate::api::{ApiError, NotesApi};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectivityState {
    Checking,
    Connected,
    /// Carries the human-readable reason the probe failed
    Failed(String),
}

/// Proof that the probe reached the notes service.
///
/// Only handed out by [`ConnectivityProber::connected`], and required to
/// build a [`crate::NoteSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Connected {
    _private: (),
}

/// Settles [`ConnectivityState`] exactly once per process.
#[derive(Debug)]
pub struct ConnectivityProber {
    state: ConnectivityState,
    timeout: Duration,
}

impl ConnectivityProber {
    pub const fn new(timeout: Duration) -> Self {
        Self {
            state: ConnectivityState::Checking,
            timeout,
        }
    }

    pub const fn state(&self) -> &ConnectivityState {
        &self.state
    }

    /// Issues a single health request bounded by the probe timeout.
    ///
    /// Once the state has left `Checking`, later calls return it unchanged
    /// without touching the network.
    pub async fn probe<A: NotesApi>(&mut self, api: &A) -> &ConnectivityState {
        if self.state != ConnectivityState::Checking {
            return &self.state;
        }

        let outcome = match tokio::time::timeout(self.timeout, api.health()).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout(self.timeout)),
        };

        self.state = match outcome {
            Ok(()) => {
                tracing::info!("Notes service reachable");
                ConnectivityState::Connected
            }
            Err(error) => {
                tracing::warn!(%error, "Notes service unreachable");
                ConnectivityState::Failed(error.to_string())
            }
        };
        &self.state
    }

    pub fn connected(&self) -> Option<Connected> {
        matches!(self.state, ConnectivityState::Connected).then_some(Connected { _private: () })
    }

    /// The failure diagnostic, if the probe failed.
    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            ConnectivityState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}
