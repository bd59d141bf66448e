//! Operator-supplied subject descriptions.

use serde::{Deserialize, Serialize};

/// Who a record is about.
///
/// Immutable once a record exists; the assembler reads it to build every prompt.
///
/// # Examples
///
/// ```
/// use lumiere_core::Subject;
///
/// let subject = Subject::new("Bella", "Luxury Travel", "Tall, long wavy hair");
/// assert!(subject.is_complete());
/// assert!(!Subject::new("", "Luxury Travel", "x").is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Subject {
    /// Display name
    pub name: String,
    /// Category label (the niche the content targets)
    pub niche: String,
    /// Free-text physical/contextual description, reused in every image prompt
    pub details: String,
}

impl Subject {
    /// Create a subject from its three parts.
    pub fn new(
        name: impl Into<String>,
        niche: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            niche: niche.into(),
            details: details.into(),
        }
    }

    /// All three fields carry non-blank text.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.niche, &self.details]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}
