//! Normalization of records written by earlier storage revisions.
//!
//! Two historic shapes exist besides the current one:
//! - nested camelCase: `content.{title,intro,bodyParagraphs,...}`, `coverImage`, `images`,
//!   `physicalDescription`, `isRemote`
//! - flat snake_case: `title`, `body` (paragraphs joined by blank lines), `cover_url`,
//!   `gallery_urls`, `physical_description`, `is_remote`

use crate::{
    ContentRecord, Faq, MediaAsset, MediaSet, Narrative, PublicationState, RecordId, Subject,
};
use chrono::{DateTime, TimeZone, Utc};
use lumiere_error::JsonError;
use serde_json::Value;
use tracing::{debug, instrument};

/// Read a record in any known shape.
///
/// The current serialization is tried first. Otherwise the legacy field names are
/// mapped, preferring nested `content.*` values over flat ones.
///
/// # Errors
///
/// Returns a `JsonError` when the value is not an object or has no `name`.
///
/// # Examples
///
/// ```
/// use lumiere_core::{normalize_legacy, PublicationState};
/// use serde_json::json;
///
/// let record = normalize_legacy(&json!({
///     "id": "1717171717171",
///     "name": "Bella",
///     "niche": "Luxury Travel",
///     "coverImage": "https://cdn.example.com/bella.jpg",
///     "images": ["https://cdn.example.com/1.jpg"],
///     "isRemote": true,
///     "content": { "title": "Bella", "bodyParagraphs": ["one", "two"] }
/// })).unwrap();
///
/// assert_eq!(record.id.as_str(), "1717171717171");
/// assert_eq!(record.narrative.body_paragraphs, vec!["one", "two"]);
/// assert_eq!(record.publication_state, PublicationState::Published);
/// ```
#[instrument(skip(value))]
pub fn normalize_legacy(value: &Value) -> Result<ContentRecord, JsonError> {
    if let Ok(record) = serde_json::from_value::<ContentRecord>(value.clone()) {
        return Ok(record);
    }

    let object = value
        .as_object()
        .ok_or_else(|| JsonError::new("record is not a JSON object"))?;
    let content = object.get("content").and_then(Value::as_object);

    let field = |nested: &str, flat: &str| -> Option<&Value> {
        content
            .and_then(|c| c.get(nested))
            .or_else(|| object.get(flat))
            .or_else(|| object.get(nested))
    };
    let text = |nested: &str, flat: &str| -> String {
        field(nested, flat)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| JsonError::new("invalid record: missing name"))?
        .to_string();

    let id = match object.get("id") {
        Some(Value::String(id)) if !id.is_empty() => RecordId::from(id.as_str()),
        Some(Value::Number(n)) => RecordId::from(n.to_string()),
        _ => RecordId::generate(),
    };

    let subject = Subject {
        name,
        niche: text("niche", "niche"),
        details: text("physicalDescription", "physical_description"),
    };

    let narrative = Narrative {
        title: text("title", "title"),
        tagline: text("tagline", "tagline"),
        intro: text("intro", "intro"),
        body_paragraphs: body_paragraphs(field("bodyParagraphs", "body")),
        keywords: string_list(field("keywords", "keywords")),
        expert_verdict: text("expertVerdict", "expert_verdict"),
        insider_secret: text("insiderSecret", "insider_secret"),
        faqs: field("faqs", "faqs")
            .and_then(|faqs| serde_json::from_value::<Vec<Faq>>(faqs.clone()).ok())
            .unwrap_or_default(),
    };

    let cover_src = object
        .get("coverImage")
        .or_else(|| object.get("cover_url"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    let gallery = string_list(object.get("images").or_else(|| object.get("gallery_urls")))
        .iter()
        .map(|src| MediaAsset::from_src(src))
        .collect();
    let media = MediaSet {
        cover: MediaAsset::from_src(cover_src),
        gallery,
    };

    let remote = object
        .get("isRemote")
        .or_else(|| object.get("is_remote"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let publication_state = if remote {
        PublicationState::Published
    } else {
        PublicationState::Draft
    };

    let created_at = object
        .get("created_at")
        .or_else(|| object.get("createdAt"))
        .and_then(Value::as_str)
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map(|ts| ts.with_timezone(&Utc))
        .or_else(|| timestamp_id(&id))
        .unwrap_or_else(Utc::now);

    debug!(id = %id, "Normalized legacy record");
    Ok(ContentRecord {
        id,
        subject,
        narrative,
        media,
        publication_state,
        created_at,
    })
}

/// Paragraphs from either an array or a single string split on blank lines.
fn body_paragraphs(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(body)) => body
            .replace("\r\n", "\n")
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect(),
        other => string_list(other),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Older revisions used `Date.now()` milliseconds as the id.
fn timestamp_id(id: &RecordId) -> Option<DateTime<Utc>> {
    let millis: i64 = id.as_str().parse().ok()?;
    // Anything before 2001 is not a millisecond timestamp.
    if millis < 1_000_000_000_000 {
        return None;
    }
    Utc.timestamp_millis_opt(millis).single()
}
