//! Request and payload types for the generation endpoint.

use crate::MediaAsset;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// What a generation call should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationKind {
    /// Text, optionally constrained to JSON output
    Text {
        /// Ask the endpoint for `application/json`
        structured: bool,
    },
    /// A single image
    Image,
}

/// A fully formed generation request.
///
/// # Examples
///
/// ```
/// use lumiere_core::{GenerationKind, GenerationRequest};
///
/// let request = GenerationRequest::builder()
///     .prompt("Portrait, soft light")
///     .kind(GenerationKind::Image)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.prompt(), "Portrait, soft light");
/// assert!(request.model().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GenerationRequest {
    /// Prompt text
    prompt: String,
    /// Output modality
    kind: GenerationKind,
    /// Model override; the driver's default applies when `None`
    #[builder(default)]
    model: Option<String>,
}

impl GenerationRequest {
    /// Start building a request.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// Structured (JSON) text request.
    pub fn json(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            kind: GenerationKind::Text { structured: true },
            model: None,
        }
    }

    /// Free-form text request.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            kind: GenerationKind::Text { structured: false },
            model: None,
        }
    }

    /// Image request.
    pub fn image(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            kind: GenerationKind::Image,
            model: None,
        }
    }

    /// Same request against a specific model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// What the endpoint returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneratedPayload {
    /// Text blob
    Text(String),
    /// Inline image
    Image(MediaAsset),
}

impl GeneratedPayload {
    /// Text content, if this is a text payload.
    pub fn into_text(self) -> Option<String> {
        match self {
            GeneratedPayload::Text(text) => Some(text),
            GeneratedPayload::Image(_) => None,
        }
    }

    /// Image asset, if this is an image payload.
    pub fn into_image(self) -> Option<MediaAsset> {
        match self {
            GeneratedPayload::Image(asset) => Some(asset),
            GeneratedPayload::Text(_) => None,
        }
    }
}
