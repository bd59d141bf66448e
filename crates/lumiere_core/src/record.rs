//! The unit of work and the unit of storage.

use crate::{MediaSet, Narrative, Subject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque record identifier, assigned once at creation.
///
/// Fresh ids are UUID v4 strings; imported records keep whatever id they carried.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Mint a new unique id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Durability of a record.
///
/// The only transition is `Draft` → `Published`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PublicationState {
    /// Only cached locally
    #[default]
    Draft,
    /// Durably confirmed by a remote adapter
    Published,
}

/// A subject, its generated narrative and its media.
///
/// Mutation is whole-record replacement; the only state change after creation is
/// [`ContentRecord::published`].
///
/// # Examples
///
/// ```
/// use lumiere_core::{ContentRecord, MediaAsset, MediaSet, Narrative, PublicationState, Subject};
///
/// let record = ContentRecord::new(
///     Subject::new("Ana Clara", "Luxury Travel", "curly hair"),
///     Narrative::default(),
///     MediaSet::with_cover(MediaAsset::Url("https://cdn.example.com/c.jpg".to_string())),
/// );
/// assert_eq!(record.publication_state, PublicationState::Draft);
/// assert_eq!(record.slug(), "ana-clara");
///
/// let published = record.clone().published();
/// assert_eq!(published.publication_state, PublicationState::Published);
/// assert_eq!(published.clone().published(), published);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Unique identifier across every adapter
    pub id: RecordId,
    /// Who the record is about
    pub subject: Subject,
    /// Generated text
    pub narrative: Narrative,
    /// Cover and gallery
    pub media: MediaSet,
    /// Local-only or remotely confirmed
    #[serde(default)]
    pub publication_state: PublicationState,
    /// Creation time, used for newest-first listing
    pub created_at: DateTime<Utc>,
}

impl ContentRecord {
    /// Create a draft with a fresh id, stamped now.
    pub fn new(subject: Subject, narrative: Narrative, media: MediaSet) -> Self {
        Self {
            id: RecordId::generate(),
            subject,
            narrative,
            media,
            publication_state: PublicationState::Draft,
            created_at: Utc::now(),
        }
    }

    /// The same record marked as remotely confirmed.
    ///
    /// Publishing a published record is a no-op.
    pub fn published(mut self) -> Self {
        self.publication_state = PublicationState::Published;
        self
    }

    /// The same record marked as local-only.
    pub fn draft(mut self) -> Self {
        self.publication_state = PublicationState::Draft;
        self
    }

    /// Whether a remote adapter has confirmed this record.
    pub fn is_published(&self) -> bool {
        self.publication_state == PublicationState::Published
    }

    /// URL-friendly form of the subject name.
    pub fn slug(&self) -> String {
        slugify(&self.subject.name)
    }
}

/// Lowercase, with each run of characters outside `[a-z0-9]` collapsed to `-`.
pub(crate) fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_gap = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    slug
}

/// Newest first, ties broken by id so ordering is stable.
pub fn sort_newest_first(records: &mut [ContentRecord]) {
    records.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_runs() {
        assert_eq!(slugify("Luna  Del-Rey!"), "luna-del-rey-");
        assert_eq!(slugify("Bella"), "bella");
        assert_eq!(slugify("Zoë 2"), "zo-2");
    }

    #[test]
    fn state_round_trips_as_lowercase() {
        let json = serde_json::to_string(&PublicationState::Published).unwrap();
        assert_eq!(json, "\"published\"");
        assert_eq!(
            "draft".parse::<PublicationState>().unwrap(),
            PublicationState::Draft
        );
    }
}
