//! Git hosting contents API.

use crate::{MediaTranscoder, http};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lumiere_core::{ContentRecord, RecordId, normalize_legacy, sort_newest_first};
use lumiere_error::{StorageError, StorageErrorKind};
use lumiere_interface::ContentStore;
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";

/// Directory entry returned by the contents API.
#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

/// File returned by the contents API.
#[derive(Debug, Deserialize)]
struct ContentFile {
    sha: String,
    #[serde(default)]
    content: String,
}

/// Remote adapter committing one JSON file per record to a repository.
///
/// Each upsert or removal is a commit on the configured branch. Media stays
/// inline, re-encoded as JPEG.
#[derive(Debug, Clone)]
pub struct GitContentStore {
    client: reqwest::Client,
    api_base: String,
    owner: String,
    repo: String,
    branch: String,
    directory: String,
    token: Option<String>,
    transcoder: MediaTranscoder,
}

impl GitContentStore {
    /// Create a store over `owner/repo`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        api_base: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        directory: impl Into<String>,
        token: Option<String>,
        transcoder: MediaTranscoder,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            client: http::client(timeout)?,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
            directory: directory.into().trim_matches('/').to_string(),
            token,
            transcoder,
        })
    }

    /// Repository path of the file holding `id`.
    pub fn file_path(&self, id: &RecordId) -> String {
        format!("{}/{}.json", self.directory, id)
    }

    /// Contents API URL for a repository path.
    pub fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    /// Base64 file body for a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized.
    pub fn encode_record(record: &ContentRecord) -> Result<String, StorageError> {
        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;
        Ok(STANDARD.encode(bytes))
    }

    /// Read a base64 file body (line-wrapped, as the API returns it) into a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not base64 JSON in a known record shape.
    pub fn decode_record(content: &str) -> Result<ContentRecord, StorageError> {
        let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD
            .decode(compact)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;
        Self::read_record(&bytes)
    }

    /// Read a raw JSON file body into a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not JSON in a known record shape.
    pub fn read_record(bytes: &[u8]) -> Result<ContentRecord, StorageError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;
        normalize_legacy(&value)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.message)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        self.authorize_as(request, JSON_MEDIA_TYPE)
    }

    fn authorize_as(&self, request: RequestBuilder, accept: &str) -> RequestBuilder {
        let request = request.header("Accept", accept);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Fetch a file, `None` when it does not exist.
    async fn fetch(&self, path: &str) -> Result<Option<ContentFile>, StorageError> {
        let response = self
            .authorize(self.client.get(self.contents_url(path)))
            .query(&[("ref", self.branch.as_str())])
            .send()
            .await
            .map_err(http::transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        http::json(http::check(response).await?).await.map(Some)
    }

    /// Raw file body. The contents API leaves `content` empty above 1 MB.
    async fn fetch_raw(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let response = self
            .authorize_as(self.client.get(self.contents_url(path)), RAW_MEDIA_TYPE)
            .query(&[("ref", self.branch.as_str())])
            .send()
            .await
            .map_err(http::transport)?;
        let body = http::check(response)
            .await?
            .bytes()
            .await
            .map_err(http::transport)?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl ContentStore for GitContentStore {
    fn name(&self) -> &'static str {
        "git"
    }

    fn is_remote(&self) -> bool {
        true
    }

    #[tracing::instrument(skip(self), fields(repo = %self.repo, directory = %self.directory))]
    async fn list(&self) -> Result<Vec<ContentRecord>, StorageError> {
        let response = self
            .authorize(self.client.get(self.contents_url(&self.directory)))
            .query(&[("ref", self.branch.as_str())])
            .send()
            .await
            .map_err(http::transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let entries: Vec<ContentEntry> = http::json(http::check(response).await?).await?;

        let mut records = Vec::new();
        for entry in entries
            .iter()
            .filter(|entry| entry.kind == "file" && entry.name.ends_with(".json"))
        {
            let Some(file) = self.fetch(&entry.path).await? else {
                continue;
            };
            let decoded = if file.content.trim().is_empty() {
                tracing::debug!(path = %entry.path, "Inline content omitted, fetching raw body");
                Self::read_record(&self.fetch_raw(&entry.path).await?)
            } else {
                Self::decode_record(&file.content)
            };
            match decoded {
                Ok(record) => records.push(record.published()),
                Err(e) => tracing::warn!(path = %entry.path, error = %e.kind, "Skipping unreadable file"),
            }
        }

        sort_newest_first(&mut records);
        Ok(records)
    }

    #[tracing::instrument(skip(self, record), fields(id = %record.id, repo = %self.repo))]
    async fn upsert(&self, record: &ContentRecord) -> Result<ContentRecord, StorageError> {
        let path = self.file_path(&record.id);
        let existing = self.fetch(&path).await?;

        let mut published = record.clone().published();
        published.media = self.transcoder.transcode_all(&record.media);

        let mut body = json!({
            "message": format!("Publish {} ({})", published.subject.name, published.id),
            "content": Self::encode_record(&published)?,
            "branch": self.branch,
        });
        if let Some(file) = existing {
            body["sha"] = Value::String(file.sha);
        }

        let response = self
            .authorize(self.client.put(self.contents_url(&path)))
            .json(&body)
            .send()
            .await
            .map_err(http::transport)?;
        http::check(response).await?;

        tracing::info!(path = %path, "Committed record");
        Ok(published)
    }

    #[tracing::instrument(skip(self), fields(id = %id, repo = %self.repo))]
    async fn remove(&self, id: &RecordId) -> Result<(), StorageError> {
        let path = self.file_path(id);
        let Some(file) = self.fetch(&path).await? else {
            return Ok(());
        };

        let body = json!({
            "message": format!("Remove {}", id),
            "sha": file.sha,
            "branch": self.branch,
        });
        let response = self
            .authorize(self.client.delete(self.contents_url(&path)))
            .json(&body)
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
