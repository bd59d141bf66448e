//! Content assembly errors.

use crate::GenerationErrorKind;

/// Reasons a record build can abort.
///
/// Failures of individual gallery images never appear here; the assembler
/// skips and pads instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AssemblyErrorKind {
    /// The mandatory narrative call failed
    #[display("Narrative generation failed: {}", _0)]
    NarrativeFailed(GenerationErrorKind),
    /// The cover call failed and the abort policy is active
    #[display("Cover image generation failed: {}", _0)]
    CoverFailed(GenerationErrorKind),
    /// Subject is missing a required field
    #[display("Invalid subject: {}", _0)]
    InvalidSubject(String),
    /// The build task ended without producing a record
    #[display("Build interrupted: {}", _0)]
    Interrupted(String),
}

/// Assembly error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Assembly Error: {} at line {} in {}", kind, line, file)]
pub struct AssemblyError {
    /// The kind of error that occurred
    pub kind: AssemblyErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AssemblyError {
    /// Create a new assembly error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AssemblyErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
