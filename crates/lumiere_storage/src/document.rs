//! PostgREST document database with object storage for media.

use crate::{MediaTranscoder, http};
use async_trait::async_trait;
use lumiere_core::{ContentRecord, MediaAsset, RecordId, normalize_legacy, sort_newest_first};
use lumiere_error::{StorageError, StorageErrorKind};
use lumiere_interface::ContentStore;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Remote adapter over a PostgREST table plus an object storage bucket.
///
/// Publishing uploads every inline asset as
/// `{url}/storage/v1/object/{bucket}/{id}/{n}.jpg`, one at a time, then upserts
/// the row with the public URLs in place of the inline data. Identical assets are
/// uploaded once. When the row write fails after uploads succeeded the error is
/// [`StorageErrorKind::PartialWrite`].
#[derive(Debug, Clone)]
pub struct DocumentStore {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    table: String,
    bucket: String,
    transcoder: MediaTranscoder,
}

impl DocumentStore {
    /// Create a store against the project at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        table: impl Into<String>,
        bucket: impl Into<String>,
        transcoder: MediaTranscoder,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            client: http::client(timeout)?,
            url: url.into().trim_end_matches('/').to_string(),
            api_key,
            table: table.into(),
            bucket: bucket.into(),
            transcoder,
        })
    }

    /// Table endpoint.
    pub fn rows_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }

    /// Upload endpoint for the `index`-th asset of a record.
    pub fn object_url(&self, id: &RecordId, index: usize) -> String {
        format!(
            "{}/storage/v1/object/{}/{}/{}.jpg",
            self.url, self.bucket, id, index
        )
    }

    /// Public URL of an uploaded asset.
    pub fn public_url(&self, id: &RecordId, index: usize) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}/{}.jpg",
            self.url, self.bucket, id, index
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("apikey", key).bearer_auth(key),
            None => request,
        }
    }

    /// Upload one inline asset, returning its public URL.
    async fn upload(
        &self,
        id: &RecordId,
        index: usize,
        asset: &MediaAsset,
    ) -> Result<String, StorageError> {
        let MediaAsset::Inline { mime, data } = self.transcoder.to_jpeg(asset) else {
            return Ok(asset.to_src());
        };

        let response = self
            .authorize(self.client.post(self.object_url(id, index)))
            .header("content-type", mime)
            .header("x-upsert", "true")
            .body(data)
            .send()
            .await
            .map_err(http::transport)?;
        http::check(response).await?;

        tracing::debug!(index, "Uploaded media asset");
        Ok(self.public_url(id, index))
    }

    async fn write_row(&self, record: &ContentRecord) -> Result<(), StorageError> {
        let response = self
            .authorize(self.client.post(self.rows_url()))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(record)
            .send()
            .await
            .map_err(http::transport)?;
        http::check(response).await?;
        Ok(())
    }
}

fn partial_write(id: &RecordId, uploaded: Vec<String>, cause: &StorageError) -> StorageError {
    tracing::error!(
        id = %id,
        uploaded = uploaded.len(),
        error = %cause.kind,
        "Media uploaded but record row not written"
    );
    StorageError::new(StorageErrorKind::PartialWrite {
        id: id.to_string(),
        uploaded,
    })
}

#[async_trait]
impl ContentStore for DocumentStore {
    fn name(&self) -> &'static str {
        "document"
    }

    fn is_remote(&self) -> bool {
        true
    }

    #[tracing::instrument(skip(self), fields(table = %self.table))]
    async fn list(&self) -> Result<Vec<ContentRecord>, StorageError> {
        let response = self
            .authorize(self.client.get(self.rows_url()))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(http::transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let rows: Vec<Value> = http::json(http::check(response).await?).await?;
        let mut records: Vec<ContentRecord> = rows
            .iter()
            .filter_map(|row| match normalize_legacy(row) {
                Ok(record) => Some(record.published()),
                Err(e) => {
                    tracing::warn!(error = %e.message, "Skipping unreadable row");
                    None
                }
            })
            .collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    #[tracing::instrument(skip(self, record), fields(id = %record.id, table = %self.table))]
    async fn upsert(&self, record: &ContentRecord) -> Result<ContentRecord, StorageError> {
        let mut resolved = Vec::with_capacity(record.media.len());
        let mut uploaded = Vec::new();
        let mut seen: HashMap<&MediaAsset, String> = HashMap::new();
        for (index, asset) in record.media.iter().enumerate() {
            if !asset.is_inline() {
                resolved.push(asset.to_src());
                continue;
            }
            // Gallery padding repeats the cover.
            if let Some(url) = seen.get(asset) {
                resolved.push(url.clone());
                continue;
            }
            match self.upload(&record.id, index, asset).await {
                Ok(url) => {
                    seen.insert(asset, url.clone());
                    uploaded.push(url.clone());
                    resolved.push(url);
                }
                Err(e) if uploaded.is_empty() => return Err(e),
                Err(e) => return Err(partial_write(&record.id, uploaded, &e)),
            }
        }

        let mut published = record.clone().published();
        let mut urls = resolved.into_iter().map(MediaAsset::Url);
        if let Some(cover) = urls.next() {
            published.media.cover = cover;
        }
        published.media.gallery = urls.collect();

        match self.write_row(&published).await {
            Ok(()) => {}
            Err(e) if uploaded.is_empty() => return Err(e),
            Err(e) => return Err(partial_write(&record.id, uploaded, &e)),
        }

        tracing::info!(media = uploaded.len(), "Published record");
        Ok(published)
    }

    #[tracing::instrument(skip(self), fields(id = %id, table = %self.table))]
    async fn remove(&self, id: &RecordId) -> Result<(), StorageError> {
        let response = self
            .authorize(self.client.delete(self.rows_url()))
            .query(&[("id", format!("eq.{}", id))])
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
