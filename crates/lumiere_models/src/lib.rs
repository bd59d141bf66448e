//! Generation endpoint drivers for Lumière.
//!
//! Each driver implements [`lumiere_interface::GenerationDriver`] so it can be
//! wrapped by [`lumiere_rate_limit::RateLimitedGenerator`].
//!
//! ```no_run
//! use lumiere_models::GeminiClient;
//! use lumiere_rate_limit::{LumiereConfig, RateLimitedGenerator};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LumiereConfig::load()?;
//! let client = GeminiClient::from_env(&config.generation)?;
//! let generator = RateLimitedGenerator::new(client, config.generation.retry_policy());
//! let json = generator.generate_text("List three colors as JSON", true).await?;
//! # Ok(())
//! # }
//! ```

mod gemini;

pub use gemini::{
    GeminiCandidate, GeminiClient, GeminiContent, GeminiErrorBody, GeminiErrorEnvelope,
    GeminiGenerationConfig, GeminiInlineData, GeminiPart, GeminiPromptFeedback, GeminiRequest,
    GeminiResponse,
};
