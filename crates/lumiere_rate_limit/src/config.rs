//! Configuration structures for generation, assembly and storage.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from lumiere.toml)
//! - User overrides (~/.config/lumiere/lumiere.toml, then ./lumiere.toml)
//! - Environment overrides (`LUMIERE__GENERATION__MAX_RETRIES=3`)

use crate::RetryPolicy;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use lumiere_error::{ConfigError, LumiereError, LumiereResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../lumiere.toml");

/// Upper bound on gallery images per record.
const MAX_GALLERY: usize = 8;

/// Generation endpoint and retry settings.
///
/// ```toml
/// [generation]
/// text_model = "gemini-2.5-flash"
/// max_retries = 2
/// cooldown_ms = 10000
/// spacing_ms = 2000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Model used for narrative and persona calls
    pub text_model: String,
    /// Model used for cover and gallery calls
    pub image_model: String,
    /// Base URL of the REST endpoint
    pub api_base: String,
    /// Retries after the first attempt when capacity is exhausted
    pub max_retries: usize,
    /// Wait before each retry, in milliseconds
    pub cooldown_ms: u64,
    /// Minimum gap between consecutive calls, in milliseconds
    pub spacing_ms: u64,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            max_retries: 2,
            cooldown_ms: 10_000,
            spacing_ms: 2_000,
            request_timeout_secs: 120,
        }
    }
}

impl GenerationConfig {
    /// Retry policy described by this section.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            cooldown: Duration::from_millis(self.cooldown_ms),
            spacing: Duration::from_millis(self.spacing_ms),
        }
    }

    /// HTTP timeout for a single request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// What the assembler does when the cover image cannot be generated.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CoverPolicy {
    /// Substitute the configured fallback URL
    #[default]
    Fallback,
    /// Fail the whole build
    Abort,
}

/// Content assembly settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Gallery images per record, clamped to 1..=8
    pub gallery_target: usize,
    /// Cover failure handling
    pub cover_policy: CoverPolicy,
    /// Cover used under [`CoverPolicy::Fallback`]
    pub fallback_cover_url: String,
    /// Language the narrative is written in
    pub language: String,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            gallery_target: MAX_GALLERY,
            cover_policy: CoverPolicy::Fallback,
            fallback_cover_url:
                "https://images.unsplash.com/photo-1534528741775-53994a69daeb?w=1080&q=80"
                    .to_string(),
            language: "pt-BR".to_string(),
        }
    }
}

impl AssemblyConfig {
    /// Gallery size after clamping.
    pub fn gallery_target(&self) -> usize {
        self.gallery_target.clamp(1, MAX_GALLERY)
    }
}

/// Which persistence adapter the catalog publishes through.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BackendKind {
    /// Local directory only, nothing is published
    #[default]
    Filesystem,
    /// Process memory only
    Memory,
    /// Automation webhook relay
    Webhook,
    /// PostgREST document database with object storage
    Document,
    /// Git hosting contents API
    Git,
}

/// Webhook relay settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WebhookConfig {
    /// Endpoint receiving upsert and delete envelopes
    pub url: String,
}

/// Document database settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DocumentConfig {
    /// Project base URL
    pub url: String,
    /// Service key sent as `apikey` and bearer token
    #[serde(default)]
    pub api_key: Option<String>,
    /// Table holding records
    #[serde(default = "default_table")]
    pub table: String,
    /// Object storage bucket for media
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

fn default_table() -> String {
    "content".to_string()
}

fn default_bucket() -> String {
    "media".to_string()
}

/// Git contents API settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GitConfig {
    /// API root, e.g. `https://api.github.com`
    #[serde(default = "default_git_api")]
    pub api_base: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch commits land on
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Directory holding one JSON file per record
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Access token
    #[serde(default)]
    pub token: Option<String>,
}

fn default_git_api() -> String {
    "https://api.github.com".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_directory() -> String {
    "content".to_string()
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Active remote backend
    pub backend: BackendKind,
    /// Directory of the local record cache
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
    /// JPEG quality for uploaded media, 1..=100
    pub jpeg_quality: u8,
    /// Settings for [`BackendKind::Webhook`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<WebhookConfig>,
    /// Settings for [`BackendKind::Document`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentConfig>,
    /// Settings for [`BackendKind::Git`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git: Option<GitConfig>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Filesystem,
            local_path: None,
            jpeg_quality: 80,
            webhook: None,
            document: None,
            git: None,
        }
    }
}

impl StorageConfig {
    /// Local cache directory, defaulting under the user data directory.
    pub fn local_path(&self) -> PathBuf {
        match &self.local_path {
            Some(path) => path.clone(),
            None => dirs::data_dir()
                .map(|dir| dir.join("lumiere").join("records"))
                .unwrap_or_else(|| PathBuf::from("records")),
        }
    }
}

/// Top-level Lumière configuration.
///
/// Loads from TOML with a precedence system, later sources winning:
/// 1. Bundled defaults (lumiere.toml shipped with the library)
/// 2. `~/.config/lumiere/lumiere.toml`
/// 3. `./lumiere.toml`
/// 4. `LUMIERE__`-prefixed environment variables
///
/// # Example
///
/// ```no_run
/// use lumiere_rate_limit::LumiereConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = LumiereConfig::load()?;
/// println!("Retries: {}", config.generation.max_retries);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct LumiereConfig {
    /// Generation endpoint and retry settings
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Assembly settings
    #[serde(default)]
    pub assembly: AssemblyConfig,
    /// Persistence settings
    #[serde(default)]
    pub storage: StorageConfig,
}

impl LumiereConfig {
    /// Load bundled defaults overlaid with a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> LumiereResult<Self> {
        debug!("Loading configuration from file");

        let builder = Self::defaults().add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// Load configuration with precedence: env > current dir > home dir > bundled.
    ///
    /// User config files are optional and silently skipped if absent.
    #[instrument]
    pub fn load() -> LumiereResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/lumiere/lumiere.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("lumiere").required(false));

        builder = builder.add_source(
            Environment::with_prefix("LUMIERE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> LumiereResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                LumiereError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                LumiereError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the cooldown does not exceed the spacing,
    /// or the JPEG quality is outside 1..=100.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let generation = &self.generation;
        if generation.cooldown_ms <= generation.spacing_ms {
            return Err(ConfigError::new(format!(
                "cooldown_ms ({}) must exceed spacing_ms ({})",
                generation.cooldown_ms, generation.spacing_ms
            )));
        }

        if !(1..=100).contains(&self.storage.jpeg_quality) {
            return Err(ConfigError::new(format!(
                "jpeg_quality must be within 1..=100, got {}",
                self.storage.jpeg_quality
            )));
        }

        let missing = match self.storage.backend {
            BackendKind::Webhook => self.storage.webhook.is_none(),
            BackendKind::Document => self.storage.document.is_none(),
            BackendKind::Git => self.storage.git.is_none(),
            BackendKind::Filesystem | BackendKind::Memory => false,
        };
        if missing {
            return Err(ConfigError::new(format!(
                "storage backend '{}' selected without a [storage.{}] table",
                self.storage.backend, self.storage.backend
            )));
        }

        Ok(())
    }
}
