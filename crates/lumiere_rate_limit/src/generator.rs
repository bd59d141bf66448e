//! Retrying, spaced wrapper around a [`GenerationDriver`].

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use lumiere_core::{GeneratedPayload, GenerationRequest, MediaAsset};
use lumiere_error::{GenerationError, GenerationErrorKind, RetryableError};
use lumiere_interface::GenerationDriver;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_retry2::{Retry, RetryError, strategy::FixedInterval};
use tracing::{debug, error, instrument, warn};

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// How hard to push against a capacity-limited endpoint.
///
/// `cooldown` must exceed `spacing`, otherwise a retry would land inside the
/// same quota window that just rejected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: usize,
    /// Wait before each retry
    pub cooldown: Duration,
    /// Minimum gap between consecutive calls
    pub spacing: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            cooldown: Duration::from_secs(10),
            spacing: Duration::from_secs(2),
        }
    }
}

/// Generation driver wrapped with inter-call spacing and capacity retries.
///
/// Capacity errors trigger a cooldown and retry up to `max_retries` times, then
/// surface as [`GenerationErrorKind::Exhausted`]. Any other failure surfaces as
/// [`GenerationErrorKind::Rejected`] without retrying.
///
/// # Example
///
/// ```rust,ignore
/// let generator = RateLimitedGenerator::new(GeminiClient::from_env()?, RetryPolicy::default());
/// let json = generator.generate_text("Describe the city", true).await?;
/// ```
pub struct RateLimitedGenerator<D> {
    driver: D,
    policy: RetryPolicy,
    throttle: Option<DirectLimiter>,
    calls: AtomicUsize,
}

impl<D: GenerationDriver> RateLimitedGenerator<D> {
    /// Wrap a driver. A zero `spacing` disables the throttle.
    pub fn new(driver: D, policy: RetryPolicy) -> Self {
        let throttle = Quota::with_period(policy.spacing).map(RateLimiter::direct);
        Self {
            driver,
            policy,
            throttle,
            calls: AtomicUsize::new(0),
        }
    }

    /// The wrapped driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Active retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Underlying calls issued so far, retries included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Issue a request, spacing and retrying as the policy dictates.
    ///
    /// # Errors
    ///
    /// - [`GenerationErrorKind::Exhausted`] when capacity errors persist past
    ///   `max_retries` retries.
    /// - [`GenerationErrorKind::Rejected`] on the first non-capacity failure.
    #[instrument(
        skip(self, request),
        fields(
            provider = self.driver.provider_name(),
            kind = ?request.kind(),
            prompt_len = request.prompt().len(),
        )
    )]
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedPayload, GenerationError> {
        let strategy = FixedInterval::new(self.policy.cooldown).take(self.policy.max_retries);
        let attempts = AtomicUsize::new(0);
        let attempts_ref = &attempts;

        let result = Retry::spawn(strategy, || async move {
            let attempt = attempts_ref.fetch_add(1, Ordering::Relaxed) + 1;
            self.pace().await;
            self.calls.fetch_add(1, Ordering::Relaxed);
            debug!(attempt, "Issuing generation call");

            match self.driver.generate(request).await {
                Ok(payload) => Ok(payload),
                Err(e) if e.is_retryable() => {
                    warn!(
                        attempt,
                        cooldown_ms = self.policy.cooldown.as_millis() as u64,
                        error = %e.kind,
                        "Capacity exhausted, cooling down before retry"
                    );
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => Err(RetryError::Permanent(e)),
            }
        })
        .await;

        result.map_err(|e| {
            let attempts = attempts.load(Ordering::Relaxed);
            match e.kind {
                GenerationErrorKind::Capacity { message, .. } => {
                    error!(attempts, "Generation exhausted: capacity never recovered");
                    GenerationError::new(GenerationErrorKind::Exhausted {
                        attempts,
                        last: message,
                    })
                }
                GenerationErrorKind::Rejected(reason) => {
                    error!(%reason, "Generation rejected");
                    GenerationError::new(GenerationErrorKind::Rejected(reason))
                }
                other => {
                    error!(error = %other, "Generation rejected");
                    GenerationError::new(GenerationErrorKind::Rejected(other.to_string()))
                }
            }
        })
    }

    /// Text generation, JSON-constrained when `structured`.
    ///
    /// # Errors
    ///
    /// As [`generate`](Self::generate); an image answer is an
    /// [`GenerationErrorKind::EmptyPayload`].
    pub async fn generate_text(
        &self,
        prompt: impl Into<String>,
        structured: bool,
    ) -> Result<String, GenerationError> {
        let request = if structured {
            GenerationRequest::json(prompt)
        } else {
            GenerationRequest::text(prompt)
        };
        self.generate(&request).await?.into_text().ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::EmptyPayload(
                "expected text, endpoint returned an image".to_string(),
            ))
        })
    }

    /// Image generation.
    ///
    /// # Errors
    ///
    /// As [`generate`](Self::generate); a text answer is an
    /// [`GenerationErrorKind::EmptyPayload`].
    pub async fn generate_image(
        &self,
        prompt: impl Into<String>,
    ) -> Result<MediaAsset, GenerationError> {
        self.generate(&GenerationRequest::image(prompt))
            .await?
            .into_image()
            .ok_or_else(|| {
                GenerationError::new(GenerationErrorKind::EmptyPayload(
                    "expected an image, endpoint returned text".to_string(),
                ))
            })
    }

    async fn pace(&self) {
        if let Some(throttle) = &self.throttle {
            throttle.until_ready().await;
        }
    }
}
