//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Local filesystem failure
    #[display("I/O failure: {}", _0)]
    Io(String),
    /// Remote backend answered with a failure status
    #[display("HTTP {} from storage backend: {}", status, message)]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body or transport message
        message: String,
    },
    /// Record could not be serialized or deserialized
    #[display("Serialization failure: {}", _0)]
    Serialization(String),
    /// Media reached the backend but the record metadata did not
    #[display("Partial write for record {}: {} media assets uploaded, metadata missing", id, uploaded.len())]
    PartialWrite {
        /// Record id
        id: String,
        /// URLs of media that were uploaded before the failure
        uploaded: Vec<String>,
    },
    /// Record not held by this store
    #[display("Record not found: {}", _0)]
    NotFound(String),
    /// Invalid storage configuration
    #[display("Invalid configuration: {}", _0)]
    InvalidConfig(String),
    /// Storage backend is unavailable
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
    /// Inline media could not be transcoded
    #[display("Media transcode failure: {}", _0)]
    Transcode(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use lumiere_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("1700000000000".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True when media was uploaded but the record itself was never written.
    ///
    /// Readers must treat such a record as not yet published.
    pub fn is_partial_write(&self) -> bool {
        matches!(self.kind, StorageErrorKind::PartialWrite { .. })
    }
}
