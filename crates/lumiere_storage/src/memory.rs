//! In-memory record store.

use async_trait::async_trait;
use lumiere_core::{ContentRecord, RecordId, sort_newest_first};
use lumiere_error::StorageError;
use lumiere_interface::ContentStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Local store keeping records in a HashMap behind an RwLock.
///
/// All data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    records: Arc<RwLock<HashMap<RecordId, ContentRecord>>>,
}

impl InMemoryContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn is_remote(&self) -> bool {
        false
    }

    async fn list(&self) -> Result<Vec<ContentRecord>, StorageError> {
        let mut records: Vec<ContentRecord> = self.records.read().await.values().cloned().collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn upsert(&self, record: &ContentRecord) -> Result<ContentRecord, StorageError> {
        let stored = record.clone().draft();
        self.records
            .write()
            .await
            .insert(stored.id.clone(), stored.clone());
        tracing::debug!(id = %stored.id, "Stored record in memory");
        Ok(stored)
    }

    async fn remove(&self, id: &RecordId) -> Result<(), StorageError> {
        self.records.write().await.remove(id);
        Ok(())
    }
}
