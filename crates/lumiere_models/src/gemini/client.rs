use crate::{GeminiErrorEnvelope, GeminiRequest, GeminiResponse};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lumiere_core::{GeneratedPayload, GenerationKind, GenerationRequest, MediaAsset};
use lumiere_error::{GenerationError, GenerationErrorKind};
use lumiere_interface::GenerationDriver;
use lumiere_rate_limit::GenerationConfig;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, instrument, warn};

/// Finish or block reasons that mean the content was refused.
const REFUSAL_REASONS: &[&str] = &[
    "SAFETY",
    "PROHIBITED_CONTENT",
    "IMAGE_SAFETY",
    "IMAGE_PROHIBITED_CONTENT",
    "BLOCKLIST",
    "SPII",
    "RECITATION",
];

/// Canonical statuses that signal quota or capacity pressure.
const CAPACITY_STATUSES: &[&str] = &["RESOURCE_EXHAUSTED", "UNAVAILABLE"];

/// Gemini REST client for text and image generation.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_base: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    /// Creates a client from an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationErrorKind::Http`] if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        config: &GenerationConfig,
    ) -> Result<Self, GenerationError> {
        debug!(
            text_model = %config.text_model,
            image_model = %config.image_model,
            "Creating new Gemini client"
        );

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Http(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    /// Creates a client reading `GEMINI_API_KEY` from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationErrorKind::MissingApiKey`] if the variable is unset or empty.
    pub fn from_env(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::MissingApiKey))?;
        Self::new(api_key, config)
    }

    /// Model a request will run against.
    pub fn model_for<'a>(&'a self, request: &'a GenerationRequest) -> &'a str {
        match (request.model(), request.kind()) {
            (Some(model), _) => model,
            (None, GenerationKind::Image) => &self.image_model,
            (None, GenerationKind::Text { .. }) => &self.text_model,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }

    /// Sends a raw request to the Gemini API.
    #[instrument(skip(self, request))]
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GeminiRequest,
    ) -> Result<GeminiResponse, GenerationError> {
        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(self.endpoint(model))
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Gemini API");
                GenerationError::new(GenerationErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let kind = classify_failure(status, &body);
            if kind.is_capacity() {
                warn!(status = %status, "Gemini API reported capacity exhaustion");
            } else {
                error!(status = %status, body = %body, "Gemini API returned error");
            }
            return Err(GenerationError::new(kind));
        }

        response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Gemini response");
            GenerationError::new(GenerationErrorKind::Decode(format!(
                "Failed to parse response: {}",
                e
            )))
        })
    }
}

/// Maps a non-2xx response onto capacity or rejection.
pub(crate) fn classify_failure(status: StatusCode, body: &str) -> GenerationErrorKind {
    let envelope: Option<GeminiErrorEnvelope> = serde_json::from_str(body).ok();
    let (message, canonical) = match &envelope {
        Some(envelope) => (
            envelope.error().message().clone(),
            envelope.error().status().clone(),
        ),
        None => (body.to_string(), None),
    };

    let capacity_status = canonical
        .as_deref()
        .is_some_and(|canonical| CAPACITY_STATUSES.contains(&canonical));

    if status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::SERVICE_UNAVAILABLE
        || capacity_status
    {
        GenerationErrorKind::Capacity {
            status_code: status.as_u16(),
            message: canonical.unwrap_or(message),
        }
    } else {
        GenerationErrorKind::Rejected(format!("HTTP {}: {}", status.as_u16(), message))
    }
}

/// Turns a 2xx body into a payload of the requested kind.
pub(crate) fn interpret_response(
    kind: &GenerationKind,
    response: &GeminiResponse,
) -> Result<GeneratedPayload, GenerationErrorKind> {
    if let Some(reason) = response
        .prompt_feedback()
        .as_ref()
        .and_then(|feedback| feedback.block_reason().clone())
    {
        return Err(GenerationErrorKind::Rejected(format!(
            "prompt blocked: {}",
            reason
        )));
    }

    let finish_reason = response
        .candidates()
        .first()
        .and_then(|candidate| candidate.finish_reason().clone());
    if let Some(reason) = finish_reason
        .as_deref()
        .filter(|reason| REFUSAL_REASONS.contains(reason))
    {
        return Err(GenerationErrorKind::Rejected(format!(
            "finish reason: {}",
            reason
        )));
    }

    match kind {
        GenerationKind::Image => {
            let inline = response
                .parts()
                .iter()
                .find_map(|part| part.inline_data().as_ref())
                .ok_or_else(|| {
                    GenerationErrorKind::EmptyPayload(format!(
                        "no inline image in response (finish reason: {})",
                        finish_reason.as_deref().unwrap_or("none")
                    ))
                })?;
            let data = STANDARD.decode(inline.data()).map_err(|e| {
                GenerationErrorKind::Decode(format!("Invalid base64 image data: {}", e))
            })?;
            Ok(GeneratedPayload::Image(MediaAsset::inline(
                inline.mime_type().clone(),
                data,
            )))
        }
        GenerationKind::Text { .. } => {
            let text: String = response
                .parts()
                .iter()
                .filter_map(|part| part.text().as_deref())
                .collect();
            if text.trim().is_empty() {
                Err(GenerationErrorKind::EmptyPayload(
                    "no text in response".to_string(),
                ))
            } else {
                Ok(GeneratedPayload::Text(text))
            }
        }
    }
}

#[async_trait::async_trait]
impl GenerationDriver for GeminiClient {
    #[instrument(skip(self, request), fields(kind = ?request.kind()))]
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedPayload, GenerationError> {
        let model = self.model_for(request);
        debug!(model, "Generating with Gemini");

        let response = self
            .generate_content(model, &GeminiRequest::from(request))
            .await?;
        interpret_response(request.kind(), &response).map_err(GenerationError::new)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.text_model
    }
}
