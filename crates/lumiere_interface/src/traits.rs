//! Trait definitions for generation endpoints and persistence adapters.

use async_trait::async_trait;
use lumiere_core::{ContentRecord, GeneratedPayload, GenerationRequest, RecordId};
use lumiere_error::{GenerationError, StorageError};

/// One call against an external generation endpoint.
///
/// Implementations perform exactly one request per `generate` call; retry and
/// pacing belong to the rate-limited wrapper.
#[async_trait]
pub trait GenerationDriver: Send + Sync {
    /// Issue the request and return its payload.
    ///
    /// Capacity signals must surface as `GenerationErrorKind::Capacity` so the
    /// caller can tell them apart from refusals.
    async fn generate(&self, req: &GenerationRequest) -> Result<GeneratedPayload, GenerationError>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier for text requests.
    fn model_name(&self) -> &str;
}

/// Durable storage for content records.
///
/// Every backend, local or remote, satisfies the same capability set.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Backend name for logs (e.g., "filesystem", "webhook").
    fn name(&self) -> &'static str;

    /// Whether a successful upsert means the record is published.
    fn is_remote(&self) -> bool;

    /// Every known record, newest first.
    ///
    /// A missing collection is an empty list, not an error.
    async fn list(&self) -> Result<Vec<ContentRecord>, StorageError>;

    /// Store or replace a whole record.
    ///
    /// The returned copy's publication state reflects this backend's durability:
    /// `Published` for remote backends, `Draft` for local ones. On failure the
    /// caller's copy is untouched.
    async fn upsert(&self, record: &ContentRecord) -> Result<ContentRecord, StorageError>;

    /// Remove a record. Removing an unknown id succeeds.
    async fn remove(&self, id: &RecordId) -> Result<(), StorageError>;
}
