//! Lumière - AI editorial profile generator
//!
//! Lumière turns a short subject description (name, niche, physical details) into a
//! complete editorial profile: SEO-oriented narrative text, a cover image and a
//! gallery, generated through a rate-limited text and image endpoint and stored
//! through pluggable persistence backends.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lumiere::{
//!     ContentAssembler, ContentCatalog, GeminiClient, InMemoryContentStore, LumiereConfig,
//!     ProgressReporter, RateLimitedGenerator, Subject,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LumiereConfig::load()?;
//!     let client = GeminiClient::from_env(&config.generation)?;
//!     let generator = Arc::new(RateLimitedGenerator::new(client, config.generation.retry_policy()));
//!     let assembler = ContentAssembler::new(generator, config.assembly.clone());
//!
//!     let catalog = ContentCatalog::new(Arc::new(InMemoryContentStore::new()), None);
//!     let subject = Subject::new("Bella", "Luxury Travel", "Tall, long wavy hair");
//!     let record = catalog.build(&assembler, subject, &ProgressReporter::silent()).await?;
//!     println!("{}", record.narrative.title);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `lumiere_error` - Error types
//! - `lumiere_core` - Records, media and generation request types
//! - `lumiere_interface` - `GenerationDriver` and `ContentStore` traits
//! - `lumiere_rate_limit` - Configuration and the rate-limited generator
//! - `lumiere_models` - Gemini REST driver
//! - `lumiere_narrative` - Record assembly and persona generation
//! - `lumiere_storage` - Persistence backends and the record catalog
//!
//! This crate re-exports everything for convenience.

mod logging;

pub use logging::{LogFormat, init_logging};

pub use lumiere_core::*;
pub use lumiere_error::*;
pub use lumiere_interface::*;
pub use lumiere_models::*;
pub use lumiere_narrative::{
    ContentAssembler, PersonaGenerator, PersonaTraits, ProgressReporter, ScenarioPool,
    extract_json, parse_json,
};
pub use lumiere_rate_limit::*;
pub use lumiere_storage::*;
