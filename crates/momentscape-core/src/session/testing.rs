//! Scripted [`NotesApi`] for controller and prober tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::api::{ApiError, ApiResult, NotesApi};
use crate::models::{NoteDraft, NoteId, NoteRecord};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Health,
    List,
    Create(NoteDraft),
    Update(NoteId, NoteDraft),
    Delete(NoteId),
}

/// Replays queued responses in order and records every call.
///
/// An operation with nothing queued answers with a 500.
#[derive(Debug, Default)]
pub struct ScriptedApi {
    calls: Mutex<Vec<Call>>,
    health: Mutex<VecDeque<ApiResult<()>>>,
    list: Mutex<VecDeque<ApiResult<Vec<NoteRecord>>>>,
    create: Mutex<VecDeque<ApiResult<NoteRecord>>>,
    update: Mutex<VecDeque<ApiResult<NoteRecord>>>,
    delete: Mutex<VecDeque<ApiResult<()>>>,
    health_delay: Option<Duration>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_health_delay(mut self, delay: Duration) -> Self {
        self.health_delay = Some(delay);
        self
    }

    pub fn push_health(&self, result: ApiResult<()>) {
        self.health.lock().unwrap().push_back(result);
    }

    pub fn push_list(&self, result: ApiResult<Vec<NoteRecord>>) {
        self.list.lock().unwrap().push_back(result);
    }

    pub fn push_create(&self, result: ApiResult<NoteRecord>) {
        self.create.lock().unwrap().push_back(result);
    }

    pub fn push_update(&self, result: ApiResult<NoteRecord>) {
        self.update.lock().unwrap().push_back(result);
    }

    pub fn push_delete(&self, result: ApiResult<()>) {
        self.delete.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn next<T>(queue: &Mutex<VecDeque<ApiResult<T>>>) -> ApiResult<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(server_error(500, "no scripted response")))
}

impl NotesApi for ScriptedApi {
    async fn health(&self) -> ApiResult<()> {
        self.record(Call::Health);
        if let Some(delay) = self.health_delay {
            tokio::time::sleep(delay).await;
        }
        next(&self.health)
    }

    async fn list(&self) -> ApiResult<Vec<NoteRecord>> {
        self.record(Call::List);
        next(&self.list)
    }

    async fn create(&self, draft: &NoteDraft) -> ApiResult<NoteRecord> {
        self.record(Call::Create(draft.clone()));
        next(&self.create)
    }

    async fn update(&self, id: &NoteId, draft: &NoteDraft) -> ApiResult<NoteRecord> {
        self.record(Call::Update(id.clone(), draft.clone()));
        next(&self.update)
    }

    async fn delete(&self, id: &NoteId) -> ApiResult<()> {
        self.record(Call::Delete(id.clone()));
        next(&self.delete)
    }
}

pub fn server_error(status: u16, message: &str) -> ApiError {
    ApiError::Api {
        status,
        message: format!("{message} ({status})"),
    }
}

/// `2025-03-01T09:00:00Z` plus `minutes`.
pub fn ts(minutes: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap() + chrono::Duration::minutes(minutes.into())
}

pub fn record(id: &str, title: &str, body: &str, created_minute: u32) -> NoteRecord {
    NoteRecord {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        created_at: Some(ts(created_minute)),
        updated_at: None,
    }
}
