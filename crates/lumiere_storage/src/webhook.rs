//! Automation webhook relay.

use crate::{MediaTranscoder, http};
use async_trait::async_trait;
use lumiere_core::{ContentRecord, RecordId, normalize_legacy, sort_newest_first};
use lumiere_error::{StorageError, StorageErrorKind};
use lumiere_interface::ContentStore;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;

/// Remote adapter that hands records to an automation webhook.
///
/// Upserts and deletes are POSTed as envelopes:
///
/// ```json
/// {"action": "upsert", "record": { ... }}
/// {"action": "delete", "id": "..."}
/// ```
///
/// A GET on the same URL is expected to return a JSON array of records.
#[derive(Debug, Clone)]
pub struct WebhookRelayStore {
    client: Client,
    url: String,
    transcoder: MediaTranscoder,
}

impl WebhookRelayStore {
    /// Create a relay posting to `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        url: impl Into<String>,
        transcoder: MediaTranscoder,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            client: http::client(timeout)?,
            url: url.into(),
            transcoder,
        })
    }

    /// The copy the webhook receives: published, media re-encoded as JPEG.
    pub fn prepare(&self, record: &ContentRecord) -> ContentRecord {
        let mut published = record.clone().published();
        published.media = self.transcoder.transcode_all(&record.media);
        published
    }

    /// Body of an upsert call.
    pub fn upsert_envelope(record: &ContentRecord) -> Value {
        json!({ "action": "upsert", "record": record })
    }

    /// Body of a delete call.
    pub fn delete_envelope(id: &RecordId) -> Value {
        json!({ "action": "delete", "id": id })
    }

    /// Read a listing body into records, skipping entries that do not normalize.
    pub fn parse_listing(body: Value) -> Result<Vec<ContentRecord>, StorageError> {
        let Value::Array(entries) = body else {
            return Err(StorageError::new(StorageErrorKind::Serialization(
                "webhook listing is not a JSON array".to_string(),
            )));
        };

        let mut records: Vec<ContentRecord> = entries
            .iter()
            .filter_map(|entry| match normalize_legacy(entry) {
                Ok(record) => Some(record.published()),
                Err(e) => {
                    tracing::warn!(error = %e.message, "Skipping unreadable webhook entry");
                    None
                }
            })
            .collect();
        sort_newest_first(&mut records);
        Ok(records)
    }
}

#[async_trait]
impl ContentStore for WebhookRelayStore {
    fn name(&self) -> &'static str {
        "webhook"
    }

    fn is_remote(&self) -> bool {
        true
    }

    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn list(&self) -> Result<Vec<ContentRecord>, StorageError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(http::transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let body: Value = http::json(http::check(response).await?).await?;
        Self::parse_listing(body)
    }

    #[tracing::instrument(skip(self, record), fields(id = %record.id, url = %self.url))]
    async fn upsert(&self, record: &ContentRecord) -> Result<ContentRecord, StorageError> {
        let published = self.prepare(record);
        let envelope = Self::upsert_envelope(&published);
        tracing::info!(
            payload_bytes = envelope.to_string().len(),
            "Relaying record to webhook"
        );

        let response = self
            .client
            .post(&self.url)
            .json(&envelope)
            .send()
            .await
            .map_err(http::transport)?;
        http::check(response).await?;

        Ok(published)
    }

    #[tracing::instrument(skip(self), fields(id = %id, url = %self.url))]
    async fn remove(&self, id: &RecordId) -> Result<(), StorageError> {
        let response = self
            .client
            .post(&self.url)
            .json(&Self::delete_envelope(id))
            .send()
            .await
            .map_err(http::transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        http::check(response).await?;
        Ok(())
    }
}
