//! Filesystem record store.
//!
//! One pretty-printed `{id}.json` per record under a base directory. Reads go
//! through [`normalize_legacy`], so files written by older revisions still load.

use async_trait::async_trait;
use lumiere_core::{ContentRecord, RecordId, normalize_legacy, sort_newest_first};
use lumiere_error::{StorageError, StorageErrorKind};
use lumiere_interface::ContentStore;
use std::path::{Path, PathBuf};

/// Local key-value store of JSON files.
///
/// Writes go to a temp file first and are renamed into place, so a crash never
/// leaves a half-written record behind.
#[derive(Debug, Clone)]
pub struct FileSystemContentStore {
    base_path: PathBuf,
}

impl FileSystemContentStore {
    /// Create a store rooted at `base_path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::Io(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Opened filesystem record store");
        Ok(Self { base_path })
    }

    /// Directory holding the record files.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// File backing `id`.
    ///
    /// # Errors
    ///
    /// Rejects ids that could escape the base directory.
    pub fn record_path(&self, id: &RecordId) -> Result<PathBuf, StorageError> {
        let valid = !id.as_str().is_empty()
            && id
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::new(StorageErrorKind::InvalidConfig(format!(
                "record id '{}' is not a valid file name",
                id
            ))));
        }
        Ok(self.base_path.join(format!("{}.json", id)))
    }

    async fn read_record(path: &Path) -> Result<ContentRecord, StorageError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Io(format!("{}: {}", path.display(), e)))
        })?;
        let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        normalize_legacy(&value).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(format!(
                "{}: {}",
                path.display(),
                e.message
            )))
        })
    }
}

#[async_trait]
impl ContentStore for FileSystemContentStore {
    fn name(&self) -> &'static str {
        "filesystem"
    }

    fn is_remote(&self) -> bool {
        false
    }

    #[tracing::instrument(skip(self), fields(path = %self.base_path.display()))]
    async fn list(&self) -> Result<Vec<ContentRecord>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::Io(format!(
                    "{}: {}",
                    self.base_path.display(),
                    e
                ))));
            }
        };

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            StorageError::new(StorageErrorKind::Io(format!(
                "{}: {}",
                self.base_path.display(),
                e
            )))
        })? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match Self::read_record(&path).await {
                Ok(record) => records.push(record.draft()),
                Err(e) => tracing::warn!(path = %path.display(), error = %e.kind, "Skipping unreadable record"),
            }
        }

        sort_newest_first(&mut records);
        tracing::debug!(count = records.len(), "Listed records");
        Ok(records)
    }

    #[tracing::instrument(skip(self, record), fields(id = %record.id))]
    async fn upsert(&self, record: &ContentRecord) -> Result<ContentRecord, StorageError> {
        let path = self.record_path(&record.id)?;
        let stored = record.clone().draft();
        let bytes = serde_json::to_vec_pretty(&stored).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(e.to_string()))
        })?;

        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Io(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Io(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(path = %path.display(), size = bytes.len(), "Stored record");
        Ok(stored)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn remove(&self, id: &RecordId) -> Result<(), StorageError> {
        let path = self.record_path(id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Removed record");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::new(StorageErrorKind::Io(format!(
                "{}: {}",
                path.display(),
                e
            )))),
        }
    }
}
