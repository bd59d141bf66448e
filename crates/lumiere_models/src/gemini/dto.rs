//! Gemini `generateContent` data transfer objects.

use derive_getters::Getters;
use lumiere_core::{GenerationKind, GenerationRequest};
use serde::{Deserialize, Serialize};

/// Base64 payload attached to a part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiInlineData {
    /// MIME type, e.g. `image/png`
    mime_type: String,
    /// Base64-encoded bytes
    data: String,
}

/// One segment of a message: text or inline data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPart {
    /// Text segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Binary segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData>,
}

impl GeminiPart {
    /// Text-only part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

/// A single conversational turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GeminiContent {
    /// Speaker role; absent on some responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    /// Message parts
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

/// Output constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    /// Forces JSON output when `application/json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    /// Requested output modalities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation, a single user turn here
    contents: Vec<GeminiContent>,
    /// Output constraints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

impl From<&GenerationRequest> for GeminiRequest {
    fn from(request: &GenerationRequest) -> Self {
        let generation_config = match request.kind() {
            GenerationKind::Text { structured: true } => Some(GeminiGenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_modalities: None,
            }),
            GenerationKind::Text { structured: false } => None,
            GenerationKind::Image => Some(GeminiGenerationConfig {
                response_mime_type: None,
                response_modalities: Some(vec!["IMAGE".to_string()]),
            }),
        };

        Self {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart::from_text(request.prompt().clone())],
            }],
            generation_config,
        }
    }
}

/// A candidate answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// Candidate content, missing when blocked
    #[serde(default)]
    content: Option<GeminiContent>,
    /// Why generation stopped
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Feedback on the prompt itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPromptFeedback {
    /// Set when the prompt was blocked outright
    #[serde(default)]
    block_reason: Option<String>,
}

/// Successful response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Candidate answers, first one used
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    /// Prompt feedback
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

impl GeminiResponse {
    /// Parts of the first candidate.
    pub fn parts(&self) -> &[GeminiPart] {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }
}

/// Error details inside an error envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GeminiErrorBody {
    /// HTTP-equivalent code
    #[serde(default)]
    code: Option<u16>,
    /// Human-readable message
    #[serde(default)]
    message: String,
    /// Canonical status, e.g. `RESOURCE_EXHAUSTED`
    #[serde(default)]
    status: Option<String>,
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GeminiErrorEnvelope {
    /// Error details
    error: GeminiErrorBody,
}
