//! Generated narrative text.

use serde::{Deserialize, Serialize};

/// One question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Faq {
    /// The question
    #[serde(default)]
    pub question: String,
    /// The answer
    #[serde(default)]
    pub answer: String,
}

/// The text fields produced by one structured-output call.
///
/// Field names on the wire are camelCase, matching the schema the model is asked
/// to fill. Every field defaults so a partial response still deserializes.
///
/// # Examples
///
/// ```
/// use lumiere_core::Narrative;
///
/// let narrative: Narrative = serde_json::from_str(r#"{"title": "Bella", "bodyParagraphs": ["a", "b"]}"#).unwrap();
/// assert_eq!(narrative.title, "Bella");
/// assert_eq!(narrative.body_paragraphs.len(), 2);
/// assert!(narrative.faqs.is_empty());
/// assert!(!narrative.is_empty());
/// assert!(lumiere_core::Narrative::default().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Narrative {
    /// Headline
    pub title: String,
    /// Short tagline
    pub tagline: String,
    /// Introduction
    pub intro: String,
    /// Ordered body sections
    pub body_paragraphs: Vec<String>,
    /// Topical tags
    pub keywords: Vec<String>,
    /// Closing remarks
    pub expert_verdict: String,
    /// Highlighted tip shown in a call-out box
    pub insider_secret: String,
    /// Question/answer list
    pub faqs: Vec<Faq>,
}

impl Narrative {
    /// True when nothing was generated (the parse-failure shell).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
