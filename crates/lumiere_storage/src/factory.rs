//! Builds the configured stores.

use crate::{
    DocumentStore, FileSystemContentStore, GitContentStore, InMemoryContentStore, MediaTranscoder,
    WebhookRelayStore,
};
use lumiere_error::{StorageError, StorageErrorKind};
use lumiere_interface::ContentStore;
use lumiere_rate_limit::{BackendKind, StorageConfig};
use std::sync::Arc;
use std::time::Duration;

const REMOTE_TIMEOUT: Duration = Duration::from_secs(120);

/// A local draft store and, when configured, a remote publishing store.
#[derive(Clone)]
pub struct StoreSet {
    /// Local cache holding drafts
    pub local: Arc<dyn ContentStore>,
    /// Publishing target
    pub remote: Option<Arc<dyn ContentStore>>,
}

fn missing(section: &str) -> StorageError {
    StorageError::new(StorageErrorKind::InvalidConfig(format!(
        "[storage.{}] table is required for this backend",
        section
    )))
}

/// Open the stores described by `config`.
///
/// The memory backend keeps drafts in memory; every other backend keeps them
/// on disk under `local_path`.
///
/// # Errors
///
/// Returns an error when the local directory cannot be created, a backend table
/// is missing, or an HTTP client cannot be built.
#[tracing::instrument(skip(config), fields(backend = %config.backend))]
pub fn open_stores(config: &StorageConfig) -> Result<StoreSet, StorageError> {
    let local: Arc<dyn ContentStore> = match config.backend {
        BackendKind::Memory => Arc::new(InMemoryContentStore::new()),
        _ => Arc::new(FileSystemContentStore::new(config.local_path())?),
    };

    let transcoder = MediaTranscoder::new(config.jpeg_quality);
    let remote: Option<Arc<dyn ContentStore>> = match config.backend {
        BackendKind::Filesystem | BackendKind::Memory => None,
        BackendKind::Webhook => {
            let webhook = config.webhook.as_ref().ok_or_else(|| missing("webhook"))?;
            Some(Arc::new(WebhookRelayStore::new(
                webhook.url.clone(),
                transcoder,
                REMOTE_TIMEOUT,
            )?))
        }
        BackendKind::Document => {
            let document = config.document.as_ref().ok_or_else(|| missing("document"))?;
            Some(Arc::new(DocumentStore::new(
                document.url.clone(),
                document.api_key.clone(),
                document.table.clone(),
                document.bucket.clone(),
                transcoder,
                REMOTE_TIMEOUT,
            )?))
        }
        BackendKind::Git => {
            let git = config.git.as_ref().ok_or_else(|| missing("git"))?;
            Some(Arc::new(GitContentStore::new(
                git.api_base.clone(),
                git.owner.clone(),
                git.repo.clone(),
                git.branch.clone(),
                git.directory.clone(),
                git.token.clone(),
                transcoder,
                REMOTE_TIMEOUT,
            )?))
        }
    };

    tracing::info!(
        local = local.name(),
        remote = remote.as_ref().map(|store| store.name()).unwrap_or("none"),
        "Opened stores"
    );
    Ok(StoreSet { local, remote })
}
