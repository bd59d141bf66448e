//! Gemini REST driver.

mod client;
mod dto;

pub use client::GeminiClient;
pub use dto::{
    GeminiCandidate, GeminiContent, GeminiErrorBody, GeminiErrorEnvelope, GeminiGenerationConfig,
    GeminiInlineData, GeminiPart, GeminiPromptFeedback, GeminiRequest, GeminiResponse,
};
