//! Scripted generation driver that records every request.

use async_trait::async_trait;
use lumiere_core::{GeneratedPayload, GenerationRequest, MediaAsset};
use lumiere_error::{GenerationError, GenerationErrorKind};
use lumiere_interface::GenerationDriver;
use lumiere_rate_limit::{RateLimitedGenerator, RetryPolicy};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A single scripted response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    /// Inline PNG whose single data byte is the tag
    Image(u8),
    Error(GenerationErrorKind),
}

/// Driver replaying a script; the last entry repeats once the script runs out.
pub struct MockDriver {
    script: Vec<MockResponse>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockDriver {
    pub fn new_sequence(script: Vec<MockResponse>) -> Self {
        Self {
            script,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn image(tag: u8) -> MediaAsset {
        MediaAsset::inline("image/png", vec![tag])
    }
}

#[async_trait]
impl GenerationDriver for MockDriver {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedPayload, GenerationError> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };

        let response = self
            .script
            .get(index)
            .or_else(|| self.script.last())
            .cloned()
            .expect("mock script must not be empty");

        match response {
            MockResponse::Text(text) => Ok(GeneratedPayload::Text(text)),
            MockResponse::Image(tag) => Ok(GeneratedPayload::Image(Self::image(tag))),
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

/// Wrap a script in a generator that never waits.
pub fn generator(script: Vec<MockResponse>) -> Arc<RateLimitedGenerator<MockDriver>> {
    Arc::new(RateLimitedGenerator::new(
        MockDriver::new_sequence(script),
        RetryPolicy {
            max_retries: 0,
            cooldown: Duration::from_millis(1),
            spacing: Duration::ZERO,
        },
    ))
}

pub fn rejected() -> GenerationErrorKind {
    GenerationErrorKind::Rejected("SAFETY".to_string())
}
