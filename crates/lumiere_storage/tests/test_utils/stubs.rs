//! Stub stores and drivers.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use lumiere_core::{
    ContentRecord, GeneratedPayload, GenerationKind, GenerationRequest, MediaAsset, MediaSet,
    Narrative, RecordId, Subject,
};
use lumiere_error::{GenerationError, StorageError, StorageErrorKind};
use lumiere_interface::{ContentStore, GenerationDriver};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// A draft record created `age_minutes` ago.
pub fn sample_record(name: &str, niche: &str, age_minutes: i64) -> ContentRecord {
    let mut record = ContentRecord::new(
        Subject::new(name, niche, "Tall, long wavy hair"),
        Narrative {
            title: name.to_string(),
            ..Narrative::default()
        },
        MediaSet::with_cover(MediaAsset::Url(format!("https://cdn.example.com/{name}.jpg"))),
    );
    record.created_at = Utc::now() - Duration::minutes(age_minutes);
    record
}

/// Remote store that accepts everything and remembers it as published.
#[derive(Clone, Default)]
pub struct RecordingStore {
    published: Arc<Mutex<Vec<ContentRecord>>>,
    removed: Arc<Mutex<Vec<RecordId>>>,
}

impl RecordingStore {
    pub fn with_records(records: Vec<ContentRecord>) -> Self {
        let store = Self::default();
        store
            .published
            .lock()
            .unwrap()
            .extend(records.into_iter().map(ContentRecord::published));
        store
    }

    pub fn removed(&self) -> Vec<RecordId> {
        self.removed.lock().unwrap().clone()
    }

    pub fn published_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentStore for RecordingStore {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn is_remote(&self) -> bool {
        true
    }

    async fn list(&self) -> Result<Vec<ContentRecord>, StorageError> {
        Ok(self.published.lock().unwrap().clone())
    }

    async fn upsert(&self, record: &ContentRecord) -> Result<ContentRecord, StorageError> {
        let published = record.clone().published();
        self.published.lock().unwrap().push(published.clone());
        Ok(published)
    }

    async fn remove(&self, id: &RecordId) -> Result<(), StorageError> {
        self.removed.lock().unwrap().push(id.clone());
        Ok(())
    }
}

/// Remote store whose every call fails.
#[derive(Clone, Default)]
pub struct FailingStore;

fn unavailable() -> StorageError {
    StorageError::new(StorageErrorKind::Unavailable("backend offline".to_string()))
}

#[async_trait]
impl ContentStore for FailingStore {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn is_remote(&self) -> bool {
        true
    }

    async fn list(&self) -> Result<Vec<ContentRecord>, StorageError> {
        Err(unavailable())
    }

    async fn upsert(&self, _record: &ContentRecord) -> Result<ContentRecord, StorageError> {
        Err(unavailable())
    }

    async fn remove(&self, _id: &RecordId) -> Result<(), StorageError> {
        Err(unavailable())
    }
}

/// Remote store whose listing blocks until released.
#[derive(Clone, Default)]
pub struct GatedStore {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl GatedStore {
    /// Wait until a listing is in progress.
    pub async fn listing_started(&self) {
        self.entered.notified().await;
    }

    /// Let the pending listing return.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl ContentStore for GatedStore {
    fn name(&self) -> &'static str {
        "gated"
    }

    fn is_remote(&self) -> bool {
        true
    }

    async fn list(&self) -> Result<Vec<ContentRecord>, StorageError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(Vec::new())
    }

    async fn upsert(&self, record: &ContentRecord) -> Result<ContentRecord, StorageError> {
        Ok(record.clone().published())
    }

    async fn remove(&self, _id: &RecordId) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Driver answering every text call with a narrative and every image call with a PNG.
pub struct StubDriver;

#[async_trait]
impl GenerationDriver for StubDriver {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedPayload, GenerationError> {
        Ok(match request.kind() {
            GenerationKind::Text { .. } => {
                GeneratedPayload::Text(r#"{"title": "Generated", "intro": "Hello"}"#.to_string())
            }
            GenerationKind::Image => {
                GeneratedPayload::Image(MediaAsset::inline("image/png", vec![1, 2, 3]))
            }
        })
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}
