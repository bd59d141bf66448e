//! Top-level error wrapper types.

use crate::{
    AssemblyError, ConfigError, GenerationError, JsonError, ParseError, StorageError,
};

/// Every error condition the workspace can surface.
///
/// # Examples
///
/// ```
/// use lumiere_error::{JsonError, LumiereError, LumiereErrorKind};
///
/// let err: LumiereError = JsonError::new("expected an object").into();
/// assert!(matches!(err.kind(), LumiereErrorKind::Json(_)));
/// assert!(err.to_string().contains("expected an object"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum LumiereErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Generation endpoint error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Structured-output parse failure
    #[from(ParseError)]
    Parse(ParseError),
    /// Persistence failure
    #[from(StorageError)]
    Storage(StorageError),
    /// Record build failure
    #[from(AssemblyError)]
    Assembly(AssemblyError),
}

/// Lumière error with kind discrimination.
///
/// # Examples
///
/// ```
/// use lumiere_error::{LumiereResult, ConfigError};
///
/// fn might_fail() -> LumiereResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Lumiere Error: {}", _0)]
pub struct LumiereError(Box<LumiereErrorKind>);

impl LumiereError {
    /// Create a new error from a kind.
    pub fn new(kind: LumiereErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LumiereErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to LumiereErrorKind
impl<T> From<T> for LumiereError
where
    T: Into<LumiereErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Lumière operations.
pub type LumiereResult<T> = std::result::Result<T, LumiereError>;
