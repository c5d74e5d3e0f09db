//! `reqwest` implementation of [`NotesApi`].

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ApiError, ApiResult, NotesApi};
use crate::config::ClientConfig;
use crate::models::{NoteDraft, NoteId, NoteRecord};
use crate::util::compact_text;

/// HTTP client for the notes service.
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpNotesApi {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { config, client })
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl NotesApi for HttpNotesApi {
    async fn health(&self) -> ApiResult<()> {
        let url = self.config.health_url();
        tracing::debug!(%url, "GET health");
        let response = self
            .client
            .get(&url)
            .timeout(self.config.probe_timeout())
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn list(&self) -> ApiResult<Vec<NoteRecord>> {
        let url = self.config.notes_url();
        tracing::debug!(%url, "GET notes");
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        decode_json(ensure_success(response).await?).await
    }

    async fn create(&self, draft: &NoteDraft) -> ApiResult<NoteRecord> {
        let url = self.config.notes_url();
        tracing::debug!(%url, "POST note");
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(draft)
            .send()
            .await?;
        decode_json(ensure_success(response).await?).await
    }

    async fn update(&self, id: &NoteId, draft: &NoteDraft) -> ApiResult<NoteRecord> {
        let url = self.config.note_url(id.as_str());
        tracing::debug!(%url, "PUT note");
        let response = self
            .client
            .put(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(draft)
            .send()
            .await?;
        decode_json(ensure_success(response).await?).await
    }

    async fn delete(&self, id: &NoteId) -> ApiResult<()> {
        let url = self.config.note_url(id.as_str());
        tracing::debug!(%url, "DELETE note");
        let response = self.client.delete(&url).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Api {
        status: status.as_u16(),
        message: parse_api_error(status, &body),
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|error| ApiError::InvalidPayload(error.to_string()))
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}
