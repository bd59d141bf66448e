//! Generation endpoint errors and retry classification.

/// Generation-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// API key not found in environment
    #[display("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    /// Quota or capacity exhaustion signalled by the endpoint
    #[display("Capacity exhausted (HTTP {}): {}", status_code, message)]
    Capacity {
        /// HTTP status code
        status_code: u16,
        /// Error message from the endpoint
        message: String,
    },
    /// The endpoint declined the request outright
    #[display("Generation rejected: {}", _0)]
    Rejected(String),
    /// Capacity errors persisted past the retry budget
    #[display("Generation exhausted after {} attempts: {}", attempts, last)]
    Exhausted {
        /// Number of calls issued, first attempt included
        attempts: usize,
        /// Message of the last capacity error
        last: String,
    },
    /// The endpoint answered without a usable payload
    #[display("Empty payload: {}", _0)]
    EmptyPayload(String),
    /// Transport failure before any response arrived
    #[display("HTTP transport error: {}", _0)]
    Http(String),
    /// Response body could not be decoded
    #[display("Decode error: {}", _0)]
    Decode(String),
}

impl GenerationErrorKind {
    /// Whether this is a quota/capacity signal worth a cooldown and retry.
    pub fn is_capacity(&self) -> bool {
        matches!(self, GenerationErrorKind::Capacity { .. })
    }

    /// Whether capacity errors outlasted the retry budget.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, GenerationErrorKind::Exhausted { .. })
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use lumiere_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use lumiere_error::{GenerationError, GenerationErrorKind, RetryableError};
///
/// let err = GenerationError::new(GenerationErrorKind::Capacity {
///     status_code: 429,
///     message: "RESOURCE_EXHAUSTED".to_string(),
/// });
/// assert!(err.is_retryable());
///
/// let err = GenerationError::new(GenerationErrorKind::Rejected("SAFETY".to_string()));
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a cooldown and retry.
    ///
    /// Only capacity signals qualify. Content-policy refusals never succeed
    /// unmodified, so they return false.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for GenerationError {
    fn is_retryable(&self) -> bool {
        self.kind.is_capacity()
    }
}
