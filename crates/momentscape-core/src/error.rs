//! Error types for momentscape-core

use thiserror::Error;

/// Result type alias using momentscape-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring a client.
///
/// Failures of individual note operations never surface here; the session
/// controller records them as [`crate::SessionError`] instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
