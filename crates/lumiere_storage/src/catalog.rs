//! In-process list of records, kept in step with the stores.

use lumiere_core::{ContentRecord, RecordId, Subject, normalize_legacy, sort_newest_first};
use lumiere_error::{LumiereResult, StorageError, StorageErrorKind};
use lumiere_interface::{ContentStore, GenerationDriver};
use lumiere_narrative::{ContentAssembler, ProgressReporter};
use rand::seq::SliceRandom;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

/// The authoritative record list for one process.
///
/// Readers get an immutable snapshot; every mutation builds a new list and swaps
/// it in whole, so a reader never sees a half-applied change.
#[derive(Clone)]
pub struct ContentCatalog {
    snapshot: Arc<RwLock<Arc<Vec<ContentRecord>>>>,
    local: Arc<dyn ContentStore>,
    remote: Option<Arc<dyn ContentStore>>,
}

impl ContentCatalog {
    /// Empty catalog over a local store and an optional remote one.
    pub fn new(local: Arc<dyn ContentStore>, remote: Option<Arc<dyn ContentStore>>) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(Arc::new(Vec::new()))),
            local,
            remote,
        }
    }

    /// The local store.
    pub fn local(&self) -> &Arc<dyn ContentStore> {
        &self.local
    }

    /// The remote store, if any.
    pub fn remote(&self) -> Option<&Arc<dyn ContentStore>> {
        self.remote.as_ref()
    }

    /// Replace the snapshot with both stores' contents merged by id.
    ///
    /// Remote copies win over local drafts. An unreachable remote degrades to the
    /// local list with a warning. Records created while the stores were being
    /// listed are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store cannot be listed.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<usize, StorageError> {
        let known: HashSet<RecordId> = self
            .records()
            .await
            .iter()
            .map(|record| record.id.clone())
            .collect();

        let mut merged: HashMap<RecordId, ContentRecord> = self
            .local
            .list()
            .await?
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();

        if let Some(remote) = &self.remote {
            match remote.list().await {
                Ok(records) => {
                    for record in records {
                        merged.insert(record.id.clone(), record);
                    }
                }
                Err(e) => warn!(store = remote.name(), error = %e.kind, "Remote listing failed, showing local records only"),
            }
        }

        let mut guard = self.snapshot.write().await;
        for record in guard.iter() {
            if !known.contains(&record.id) && !merged.contains_key(&record.id) {
                merged.insert(record.id.clone(), record.clone());
            }
        }
        let mut records: Vec<ContentRecord> = merged.into_values().collect();
        sort_newest_first(&mut records);
        let count = records.len();
        *guard = Arc::new(records);
        drop(guard);

        info!(count, "Catalog loaded");
        Ok(count)
    }

    /// Current snapshot, newest first.
    pub async fn records(&self) -> Arc<Vec<ContentRecord>> {
        self.snapshot.read().await.clone()
    }

    /// Record by id.
    pub async fn get(&self, id: &RecordId) -> Option<ContentRecord> {
        self.snapshot
            .read()
            .await
            .iter()
            .find(|record| &record.id == id)
            .cloned()
    }

    /// Save a record locally and put it at the head of the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store rejects the write; the snapshot is
    /// left unchanged.
    #[instrument(skip(self, record), fields(id = %record.id))]
    pub async fn create(&self, record: ContentRecord) -> Result<ContentRecord, StorageError> {
        let stored = self.local.upsert(&record).await.inspect_err(|e| {
            error!(store = self.local.name(), error = %e.kind, "Failed to save record");
        })?;
        self.replace(stored.clone(), true).await;
        Ok(stored)
    }

    /// Assemble a record for `subject` and save it.
    ///
    /// # Errors
    ///
    /// Returns the assembly error, or the storage error if saving fails.
    pub async fn build<D: GenerationDriver>(
        &self,
        assembler: &ContentAssembler<D>,
        subject: Subject,
        progress: &ProgressReporter,
    ) -> LumiereResult<ContentRecord> {
        let record = assembler.build(subject, progress).await?;
        Ok(self.create(record).await?)
    }

    /// Run [`build`](Self::build) on a background task.
    ///
    /// The build is not cancellable: dropping the handle detaches the task, which
    /// still completes and lands its record in the catalog.
    pub fn spawn_build<D: GenerationDriver + 'static>(
        &self,
        assembler: Arc<ContentAssembler<D>>,
        subject: Subject,
        progress: ProgressReporter,
    ) -> JoinHandle<LumiereResult<ContentRecord>> {
        let catalog = self.clone();
        tokio::spawn(async move { catalog.build(&assembler, subject, &progress).await })
    }

    /// Read a record in any known JSON shape and save it.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if the value is not a record, or a storage error if
    /// saving fails.
    pub async fn import(&self, value: &Value) -> LumiereResult<ContentRecord> {
        let record = normalize_legacy(value)?;
        info!(id = %record.id, name = %record.subject.name, "Importing record");
        Ok(self.create(record).await?)
    }

    /// Push a record to the remote store.
    ///
    /// On success the catalog holds the remote's published copy. On failure the
    /// catalog and the local store are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::NotFound`] for an unknown id,
    /// [`StorageErrorKind::InvalidConfig`] without a remote store, or the
    /// remote's error.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn publish(&self, id: &RecordId) -> Result<ContentRecord, StorageError> {
        let remote = self.remote.as_ref().ok_or_else(|| {
            StorageError::new(StorageErrorKind::InvalidConfig(
                "no remote backend configured".to_string(),
            ))
        })?;
        let record = self
            .get(id)
            .await
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(id.to_string())))?;

        let published = remote.upsert(&record).await.inspect_err(|e| {
            error!(store = remote.name(), error = %e.kind, "Publish failed");
        })?;

        self.replace(published.clone(), false).await;
        info!(store = remote.name(), "Record published");
        Ok(published)
    }

    /// Remove a record everywhere. Unknown ids are not an error.
    ///
    /// # Errors
    ///
    /// Returns the first store error; the snapshot keeps the record in that case.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: &RecordId) -> Result<(), StorageError> {
        self.local.remove(id).await?;
        if let Some(remote) = &self.remote {
            remote.remove(id).await?;
        }

        let mut guard = self.snapshot.write().await;
        let remaining: Vec<ContentRecord> = guard
            .iter()
            .filter(|record| &record.id != id)
            .cloned()
            .collect();
        *guard = Arc::new(remaining);
        info!("Record deleted");
        Ok(())
    }

    /// Up to `count` other records in random order.
    pub async fn related(&self, id: &RecordId, count: usize) -> Vec<ContentRecord> {
        let snapshot = self.records().await;
        let others: Vec<&ContentRecord> = snapshot.iter().filter(|record| &record.id != id).collect();
        let mut rng = rand::thread_rng();
        others
            .choose_multiple(&mut rng, count)
            .map(|record| (*record).clone())
            .collect()
    }

    /// Distinct niche labels in list order.
    pub async fn niches(&self) -> Vec<String> {
        let snapshot = self.records().await;
        let mut seen = HashSet::new();
        snapshot
            .iter()
            .map(|record| record.subject.niche.clone())
            .filter(|niche| seen.insert(niche.clone()))
            .collect()
    }

    /// Swap `record` into the snapshot, at the head or in its current place.
    async fn replace(&self, record: ContentRecord, to_front: bool) {
        let mut guard = self.snapshot.write().await;
        let mut records: Vec<ContentRecord> = Vec::with_capacity(guard.len() + 1);
        let position = guard.iter().position(|existing| existing.id == record.id);

        match (position, to_front) {
            (Some(index), false) => {
                records.extend(guard.iter().cloned());
                records[index] = record;
            }
            _ => {
                records.push(record.clone());
                records.extend(guard.iter().filter(|existing| existing.id != record.id).cloned());
            }
        }

        *guard = Arc::new(records);
    }
}
