//! momentscape-core - Core library for MomentScape
//!
//! This crate contains the note models, the REST client for the notes
//! service, the connectivity prober, and the note session controller that
//! every MomentScape front end drives.

pub mod api;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod models;
pub mod session;
pub mod util;

pub use api::{ApiError, HttpNotesApi, NotesApi};
pub use config::ClientConfig;
pub use connectivity::{Connected, ConnectivityProber, ConnectivityState};
pub use error::{Error, Result};
pub use models::{Note, NoteDraft, NoteId, NoteRecord};
pub use session::{start_session, NoteSession, SessionError, SessionStatus, Startup};
