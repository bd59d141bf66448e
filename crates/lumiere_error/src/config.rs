//! Invalid or unreadable configuration.

/// Configuration failed to load or broke an invariant.
///
/// # Examples
///
/// ```
/// use lumiere_error::ConfigError;
///
/// let err = ConfigError::new("cooldown_ms must exceed spacing_ms");
/// assert!(err.to_string().contains("cooldown_ms"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} ({}:{})", message, file, line)]
pub struct ConfigError {
    /// Which setting was wrong and why
    pub message: String,
    /// Line where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl ConfigError {
    /// Record `message` at the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
