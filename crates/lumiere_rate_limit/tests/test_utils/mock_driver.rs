//! Scripted generation driver.

use async_trait::async_trait;
use lumiere_core::{GeneratedPayload, GenerationRequest, MediaAsset};
use lumiere_error::{GenerationError, GenerationErrorKind};
use lumiere_interface::GenerationDriver;
use std::sync::{Arc, Mutex};

/// A single scripted response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    Image,
    Error(GenerationErrorKind),
}

/// Driver replaying a script; the last entry repeats once the script runs out.
pub struct MockDriver {
    script: Vec<MockResponse>,
    call_count: Arc<Mutex<usize>>,
}

impl MockDriver {
    pub fn new_sequence(script: Vec<MockResponse>) -> Self {
        Self {
            script,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new_sequence(vec![MockResponse::Text(text.into())])
    }

    pub fn new_error(kind: GenerationErrorKind) -> Self {
        Self::new_sequence(vec![MockResponse::Error(kind)])
    }

    /// Fail `fail_count` times, then succeed with `text`.
    pub fn new_fail_then_succeed(
        fail_count: usize,
        kind: GenerationErrorKind,
        text: impl Into<String>,
    ) -> Self {
        let mut script = vec![MockResponse::Error(kind); fail_count];
        script.push(MockResponse::Text(text.into()));
        Self::new_sequence(script)
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl GenerationDriver for MockDriver {
    async fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GeneratedPayload, GenerationError> {
        let index = {
            let mut count = self.call_count.lock().unwrap();
            let index = *count;
            *count += 1;
            index
        };

        let response = self
            .script
            .get(index)
            .or_else(|| self.script.last())
            .cloned()
            .expect("mock script must not be empty");

        match response {
            MockResponse::Text(text) => Ok(GeneratedPayload::Text(text)),
            MockResponse::Image => Ok(GeneratedPayload::Image(MediaAsset::inline(
                "image/png",
                vec![0x89, b'P', b'N', b'G'],
            ))),
            MockResponse::Error(kind) => Err(GenerationError::new(kind)),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

pub fn capacity() -> GenerationErrorKind {
    GenerationErrorKind::Capacity {
        status_code: 429,
        message: "RESOURCE_EXHAUSTED".to_string(),
    }
}

pub fn rejected() -> GenerationErrorKind {
    GenerationErrorKind::Rejected("SAFETY".to_string())
}
