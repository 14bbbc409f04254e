//! HTTP implementation of the note service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use notehub_core::{
    DataEnvelope, Error, ListNotesParams, Note, NoteDraft, NoteService, NotesPage, Result,
};

use crate::config::ServiceConfig;

/// HTTP client for the NoteHub REST service.
///
/// One instance owns a connection pool and is cheap to clone. All requests
/// carry the configured bearer token; when no token is configured the
/// Authorization header is omitted entirely.
#[derive(Clone)]
pub struct HttpNoteService {
    client: Client,
    config: ServiceConfig,
}

impl HttpNoteService {
    /// Create a new client with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            "Initializing note service client: url={}, auth={}",
            config.base_url,
            config.token.is_some()
        );

        Ok(Self { client, config })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ServiceConfig::default())
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ServiceConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Attach the bearer token when one is configured.
    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => req.header("Authorization", format!("Bearer {}", token)),
            None => req,
        }
    }

    /// Turn a non-success response into a service error, preserving the
    /// status and whatever body the service sent.
    async fn service_error(response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!(status = status, "Note service returned an error response");
        Error::Service { status, body }
    }
}

#[async_trait]
impl NoteService for HttpNoteService {
    async fn list_notes(&self, params: &ListNotesParams) -> Result<NotesPage> {
        // An empty search term is omitted from the query string entirely;
        // the service treats a present-but-empty filter differently.
        let mut query: Vec<(&str, String)> = vec![
            ("page", params.page.to_string()),
            ("perPage", params.per_page.to_string()),
        ];
        if params.is_filtered() {
            query.push(("search", params.search.clone()));
        }

        debug!(
            page = params.page,
            search = %params.search,
            "Fetching notes page"
        );

        let started = std::time::Instant::now();
        let response = self
            .authorize(self.client.get(self.endpoint("/notes")))
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }

        let page: NotesPage = response.json().await?;
        debug!(
            result_count = page.notes.len(),
            total_pages = page.total_pages,
            duration_ms = started.elapsed().as_millis() as u64,
            "Notes page fetched"
        );
        Ok(page)
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        debug!(tag = %draft.tag, "Creating note");

        let started = std::time::Instant::now();
        let response = self
            .authorize(self.client.post(self.endpoint("/notes")))
            .json(draft)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }

        let envelope: DataEnvelope<Note> = response.json().await?;
        debug!(
            note_id = %envelope.data.id,
            duration_ms = started.elapsed().as_millis() as u64,
            "Note created"
        );
        Ok(envelope.data)
    }

    async fn delete_note(&self, id: &str) -> Result<Note> {
        debug!(note_id = %id, "Deleting note");

        let started = std::time::Instant::now();
        let response = self
            .authorize(self.client.delete(self.endpoint(&format!("/notes/{}", id))))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NoteNotFound(id.to_string()));
        }
        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }

        let envelope: DataEnvelope<Note> = response.json().await?;
        debug!(
            note_id = %envelope.data.id,
            duration_ms = started.elapsed().as_millis() as u64,
            "Note deleted"
        );
        Ok(envelope.data)
    }
}
