//! Configuration, retry and pacing for generation calls.
//!
//! The generation endpoint enforces a steady-state rate limit and a burst quota.
//! [`RateLimitedGenerator`] answers both: a minimum spacing between consecutive
//! calls keeps under the steady-state limit, and a cooldown-and-retry loop absorbs
//! transient quota exhaustion.

mod config;
mod generator;

pub use config::{
    AssemblyConfig, BackendKind, CoverPolicy, DocumentConfig, GenerationConfig, GitConfig,
    LumiereConfig, StorageConfig, WebhookConfig,
};
pub use generator::{RateLimitedGenerator, RetryPolicy};
