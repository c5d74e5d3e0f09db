//! Note model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::is_blank;

/// Opaque note identifier assigned by the notes service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A note admitted into the client's collection.
///
/// Only built from a validated [`NoteRecord`], so `title` and `body` are
/// never blank and `created_at` always comes from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Timestamp of the latest change, falling back to creation time.
    #[must_use]
    pub fn last_changed_at(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// Note payload as returned by the notes service, before validation.
///
/// Older deployments of the service return `_id` and `content`; both are
/// accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(alias = "content")]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Reasons a [`NoteRecord`] is refused admission into the collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidNote {
    #[error("note is missing an id")]
    MissingId,
    #[error("note {0} has an empty title")]
    EmptyTitle(String),
    #[error("note {0} has an empty body")]
    EmptyBody(String),
    #[error("note {0} has no createdAt timestamp")]
    MissingCreatedAt(String),
}

impl NoteRecord {
    /// Validate the record and turn it into a [`Note`].
    ///
    /// `known_created_at` fills in a missing `createdAt`, which update
    /// responses are allowed to omit.
    pub fn into_note(self, known_created_at: Option<DateTime<Utc>>) -> Result<Note, InvalidNote> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(InvalidNote::MissingId);
        }
        if is_blank(&self.title) {
            return Err(InvalidNote::EmptyTitle(id.to_string()));
        }
        if is_blank(&self.body) {
            return Err(InvalidNote::EmptyBody(id.to_string()));
        }
        let created_at = self
            .created_at
            .or(known_created_at)
            .ok_or_else(|| InvalidNote::MissingCreatedAt(id.to_string()))?;

        Ok(Note {
            id: NoteId::new(id),
            title: self.title,
            body: self.body,
            created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Request body for creating or updating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub body: String,
}

impl NoteDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Both fields must carry text once surrounding whitespace is ignored.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !is_blank(&self.title) && !is_blank(&self.body)
    }
}
