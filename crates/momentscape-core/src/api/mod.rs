//! REST surface of the notes service.

mod http;

use std::time::Duration;

use thiserror::Error;

use crate::models::{NoteDraft, NoteId, NoteRecord};

pub use http::HttpNotesApi;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned an error: {message}")]
    Api { status: u16, message: String },
    #[error("Invalid response payload: {0}")]
    InvalidPayload(String),
    #[error("No response within {}ms", .0.as_millis())]
    Timeout(Duration),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Operations the notes service exposes.
///
/// Implemented over HTTP by [`HttpNotesApi`]; tests substitute scripted
/// implementations.
#[allow(async_fn_in_trait)]
pub trait NotesApi {
    /// Reachability check against the health endpoint
    async fn health(&self) -> ApiResult<()>;

    /// Fetch every note, in service order
    async fn list(&self) -> ApiResult<Vec<NoteRecord>>;

    async fn create(&self, draft: &NoteDraft) -> ApiResult<NoteRecord>;

    async fn update(&self, id: &NoteId, draft: &NoteDraft) -> ApiResult<NoteRecord>;

    /// Delete a note; the response body is ignored
    async fn delete(&self, id: &NoteId) -> ApiResult<()>;
}

impl<T: NotesApi + ?Sized> NotesApi for &T {
    async fn health(&self) -> ApiResult<()> {
        (**self).health().await
    }

    async fn list(&self) -> ApiResult<Vec<NoteRecord>> {
        (**self).list().await
    }

    async fn create(&self, draft: &NoteDraft) -> ApiResult<NoteRecord> {
        (**self).create(draft).await
    }

    async fn update(&self, id: &NoteId, draft: &NoteDraft) -> ApiResult<NoteRecord> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: &NoteId) -> ApiResult<()> {
        (**self).delete(id).await
    }
}
