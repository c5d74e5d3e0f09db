//! Note session controller.
//!
//! Every network-bound operation comes in two shapes: an `async` method that
//! borrows the session mutably for the whole round trip, and a
//! `begin_*`/`settle_*` pair for hosts that run the request elsewhere. The
//! tickets handed out by `begin_*` let `settle_*` drop outcomes that arrive
//! after the state they were issued against has moved on.

use std::collections::HashSet;

use crate::api::{ApiResult, NotesApi};
use crate::connectivity::Connected;
use crate::models::{Note, NoteDraft, NoteId, NoteRecord};

use super::edit::EditSession;
use super::{MutationAction, SessionError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Ready,
    Error,
}

/// How a settled request affected the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Failed,
    /// The outcome was stale and left the session untouched
    Discarded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed or another submit was still pending; no request sent
    Skipped,
    Created(NoteId),
    Updated(NoteId),
    Failed,
    Discarded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    seq: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct SubmitTicket {
    seq: u64,
    epoch: u64,
    target: Option<NoteId>,
    draft: NoteDraft,
}

impl SubmitTicket {
    /// Note to update, or `None` when the submit creates a note.
    pub const fn target(&self) -> Option<&NoteId> {
        self.target.as_ref()
    }

    pub const fn draft(&self) -> &NoteDraft {
        &self.draft
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct DeleteTicket {
    seq: u64,
    id: NoteId,
}

impl DeleteTicket {
    pub const fn id(&self) -> &NoteId {
        &self.id
    }
}

/// Owns the collection, the edit session and the last error.
#[derive(Debug)]
pub struct NoteSession<A> {
    api: A,
    status: SessionStatus,
    notes: Vec<Note>,
    edit: EditSession,
    last_error: Option<SessionError>,
    next_seq: u64,
    applied_load: Option<u64>,
    pending_submit: Option<u64>,
}

impl<A> NoteSession<A> {
    /// Starts in `Loading`; nothing is fetched until [`Self::load_all`].
    pub fn new(api: A, _connected: Connected) -> Self {
        Self {
            api,
            status: SessionStatus::Loading,
            notes: Vec::new(),
            edit: EditSession::default(),
            last_error: None,
            next_seq: 0,
            applied_load: None,
            pending_submit: None,
        }
    }

    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub const fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    pub const fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    pub const fn is_submit_pending(&self) -> bool {
        self.pending_submit.is_some()
    }

    /// Seeds the drafts from `note`, abandoning any other edit in progress.
    pub fn begin_edit(&mut self, note: &Note) {
        tracing::debug!(id = %note.id, "Begin edit");
        self.edit.begin(note);
    }

    pub fn cancel_edit(&mut self) {
        self.edit.reset();
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.edit.set_title(title.into());
    }

    pub fn set_draft_body(&mut self, body: impl Into<String>) {
        self.edit.set_body(body.into());
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.status = SessionStatus::Loading;
        LoadTicket {
            seq: self.next_seq(),
        }
    }

    /// Replaces the collection wholesale on success.
    ///
    /// A load older than the last one applied is discarded, so the newest
    /// load wins whatever order responses arrive in.
    pub fn settle_load(
        &mut self,
        ticket: LoadTicket,
        result: ApiResult<Vec<NoteRecord>>,
    ) -> Outcome {
        if self.applied_load.is_some_and(|applied| applied > ticket.seq) {
            tracing::debug!(seq = ticket.seq, "Discarding stale load");
            return Outcome::Discarded;
        }
        self.applied_load = Some(ticket.seq);

        let notes = result
            .map_err(|error| error.to_string())
            .and_then(|records| admit_collection(records).map_err(|error| error.to_string()));

        match notes {
            Ok(notes) => {
                tracing::info!(count = notes.len(), "Loaded notes");
                self.notes = notes;
                self.status = SessionStatus::Ready;
                self.last_error = None;
                Outcome::Applied
            }
            Err(message) => {
                tracing::warn!(%message, "Failed to load notes");
                self.status = SessionStatus::Error;
                self.last_error = Some(SessionError::Load(message));
                Outcome::Failed
            }
        }
    }

    /// Opens a create or update request from the given field values.
    ///
    /// Returns `None`, leaving every piece of state untouched, when either
    /// field is blank or another submit is still pending.
    pub fn begin_submit(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Option<SubmitTicket> {
        let draft = NoteDraft::new(title, body);
        if !draft.is_submittable() {
            tracing::debug!("Ignoring submit with empty title or body");
            return None;
        }
        if self.pending_submit.is_some() {
            tracing::debug!("Ignoring submit while another is pending");
            return None;
        }

        self.edit.set_title(draft.title.clone());
        self.edit.set_body(draft.body.clone());
        let seq = self.next_seq();
        self.pending_submit = Some(seq);
        Some(SubmitTicket {
            seq,
            epoch: self.edit.epoch(),
            target: self.edit.target().cloned(),
            draft,
        })
    }

    pub fn begin_submit_draft(&mut self) -> Option<SubmitTicket> {
        let draft = self.edit.draft();
        self.begin_submit(draft.title, draft.body)
    }

    /// Applies the response to the submit occupying the pending slot.
    ///
    /// Drafts are only cleared here, after a successful response. An update
    /// whose edit session has since changed is discarded; a create is still
    /// prepended but leaves the newer drafts alone.
    pub fn settle_submit(
        &mut self,
        ticket: SubmitTicket,
        result: ApiResult<NoteRecord>,
    ) -> SubmitOutcome {
        if self.pending_submit != Some(ticket.seq) {
            tracing::debug!(seq = ticket.seq, "Discarding settled submit");
            return SubmitOutcome::Discarded;
        }
        self.pending_submit = None;
        let session_unchanged = self.edit.epoch() == ticket.epoch;

        match ticket.target {
            None => self.settle_create(result, session_unchanged),
            Some(id) => {
                if !session_unchanged {
                    tracing::debug!(%id, "Discarding update for superseded edit session");
                    return SubmitOutcome::Discarded;
                }
                self.settle_update(&id, result)
            }
        }
    }

    pub fn begin_delete(&mut self, id: &NoteId) -> DeleteTicket {
        DeleteTicket {
            seq: self.next_seq(),
            id: id.clone(),
        }
    }

    /// Removes the note by id; clears the edit session if it targeted it.
    pub fn settle_delete(&mut self, ticket: DeleteTicket, result: ApiResult<()>) -> Outcome {
        let DeleteTicket { seq, id } = ticket;
        match result {
            Ok(()) => {
                tracing::info!(%id, seq, "Deleted note");
                self.notes.retain(|note| note.id != id);
                if self.edit.is_editing(&id) {
                    self.edit.reset();
                }
                self.last_error = None;
                Outcome::Applied
            }
            Err(error) => {
                self.fail_mutation(MutationAction::Delete, error.to_string());
                Outcome::Failed
            }
        }
    }

    fn settle_create(
        &mut self,
        result: ApiResult<NoteRecord>,
        session_unchanged: bool,
    ) -> SubmitOutcome {
        let note = match result {
            Ok(record) => record.into_note(None).map_err(|error| error.to_string()),
            Err(error) => Err(error.to_string()),
        };
        let note = match note {
            Ok(note) => note,
            Err(message) => {
                self.fail_mutation(MutationAction::Create, message);
                return SubmitOutcome::Failed;
            }
        };

        let id = note.id.clone();
        if self.note(&id).is_some() {
            tracing::debug!(%id, "Created note is already listed; not prepending");
        } else {
            tracing::info!(%id, "Created note");
            self.notes.insert(0, note);
        }
        if session_unchanged {
            self.edit.reset();
        }
        self.last_error = None;
        SubmitOutcome::Created(id)
    }

    fn settle_update(&mut self, id: &NoteId, result: ApiResult<NoteRecord>) -> SubmitOutcome {
        let record = match result {
            Ok(record) => record,
            Err(error) => {
                self.fail_mutation(MutationAction::Update, error.to_string());
                return SubmitOutcome::Failed;
            }
        };

        let Some(position) = self.notes.iter().position(|note| &note.id == id) else {
            // Saved on the server, but a newer load no longer lists it.
            tracing::info!(%id, "Updated note that is no longer listed");
            self.edit.reset();
            self.last_error = None;
            return SubmitOutcome::Updated(id.clone());
        };
        let known_created_at = self.notes[position].created_at;

        let note = record
            .into_note(Some(known_created_at))
            .map_err(|error| error.to_string())
            .and_then(|note| {
                if &note.id == id {
                    Ok(note)
                } else {
                    Err(format!("response carried note {} instead of {id}", note.id))
                }
            });

        match note {
            Ok(note) => {
                tracing::info!(%id, "Updated note");
                self.notes[position] = note;
                self.edit.reset();
                self.last_error = None;
                SubmitOutcome::Updated(id.clone())
            }
            Err(message) => {
                self.fail_mutation(MutationAction::Update, message);
                SubmitOutcome::Failed
            }
        }
    }

    fn fail_mutation(&mut self, action: MutationAction, message: String) {
        tracing::warn!(%action, %message, "Note request failed");
        self.last_error = Some(SessionError::Mutation { action, message });
    }

    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

impl<A: NotesApi> NoteSession<A> {
    /// Fetches the full collection; see [`Self::settle_load`].
    pub async fn load_all(&mut self) -> Outcome {
        let ticket = self.begin_load();
        let result = self.api.list().await;
        self.settle_load(ticket, result)
    }

    /// Explicit user-triggered refresh.
    pub async fn reload(&mut self) -> Outcome {
        self.load_all().await
    }

    /// Creates a note, or updates the one being edited.
    pub async fn submit(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> SubmitOutcome {
        let Some(ticket) = self.begin_submit(title, body) else {
            return SubmitOutcome::Skipped;
        };
        let result = match ticket.target() {
            None => self.api.create(ticket.draft()).await,
            Some(id) => self.api.update(id, ticket.draft()).await,
        };
        self.settle_submit(ticket, result)
    }

    /// Submits whatever the drafts currently hold.
    pub async fn submit_draft(&mut self) -> SubmitOutcome {
        let draft = self.edit.draft();
        self.submit(draft.title, draft.body).await
    }

    pub async fn delete_note(&mut self, id: &NoteId) -> Outcome {
        let ticket = self.begin_delete(id);
        let result = self.api.delete(ticket.id()).await;
        self.settle_delete(ticket, result)
    }
}

/// Validates a load response and collapses duplicate ids to their first
/// occurrence.
fn admit_collection(records: Vec<NoteRecord>) -> Result<Vec<Note>, crate::models::InvalidNote> {
    let mut seen = HashSet::new();
    let mut notes = Vec::with_capacity(records.len());
    for record in records {
        let note = record.into_note(None)?;
        if seen.insert(note.id.clone()) {
            notes.push(note);
        } else {
            tracing::warn!(id = %note.id, "Dropping duplicate note from load response");
        }
    }
    Ok(notes)
}
