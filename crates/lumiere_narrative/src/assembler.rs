//! Builds a complete record from a subject: narrative, cover, then gallery.

use crate::{ProgressReporter, ScenarioPool, parse_json, prompts};
use lumiere_core::{ContentRecord, MediaAsset, MediaSet, Narrative, Subject};
use lumiere_error::{AssemblyError, AssemblyErrorKind};
use lumiere_interface::GenerationDriver;
use lumiere_rate_limit::{AssemblyConfig, CoverPolicy, RateLimitedGenerator};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Orchestrates the generation calls for one record.
///
/// Calls run strictly in sequence: narrative text, cover image, then one image per
/// sampled gallery scene. The narrative call is mandatory. Gallery failures are
/// skipped and the gallery padded with cover copies, so every record carries
/// exactly `gallery_target + 1` media assets.
pub struct ContentAssembler<D> {
    generator: Arc<RateLimitedGenerator<D>>,
    config: AssemblyConfig,
    scenarios: ScenarioPool,
}

impl<D: GenerationDriver> ContentAssembler<D> {
    /// Assembler over a shared generator with the default scenario pool.
    pub fn new(generator: Arc<RateLimitedGenerator<D>>, config: AssemblyConfig) -> Self {
        Self {
            generator,
            config,
            scenarios: ScenarioPool::default(),
        }
    }

    /// Replace the scenario pool.
    pub fn with_scenarios(mut self, scenarios: ScenarioPool) -> Self {
        self.scenarios = scenarios;
        self
    }

    /// The shared generator.
    pub fn generator(&self) -> &Arc<RateLimitedGenerator<D>> {
        &self.generator
    }

    /// Active assembly settings.
    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// Build a draft record for `subject`.
    ///
    /// # Errors
    ///
    /// - [`AssemblyErrorKind::InvalidSubject`] if a subject field is blank.
    /// - [`AssemblyErrorKind::NarrativeFailed`] if the narrative call fails.
    /// - [`AssemblyErrorKind::CoverFailed`] if the cover call fails under
    ///   [`CoverPolicy::Abort`].
    #[instrument(skip(self, subject, progress), fields(name = %subject.name, niche = %subject.niche))]
    pub async fn build(
        &self,
        subject: Subject,
        progress: &ProgressReporter,
    ) -> Result<ContentRecord, AssemblyError> {
        if !subject.is_complete() {
            progress.report("Error: fill in name, niche and details.");
            return Err(AssemblyError::new(AssemblyErrorKind::InvalidSubject(
                "name, niche and details are all required".to_string(),
            )));
        }

        let target = self.config.gallery_target();
        let scenes = {
            let mut rng = rand::thread_rng();
            self.scenarios.sample(target, &mut rng)
        };

        progress.report("Starting photo session...");
        let narrative = self.narrative(&subject, progress).await?;

        progress.report("Shooting cover...");
        let cover = self.cover(&subject, progress).await?;

        progress.report(format!(
            "Producing editorial ({} scenes from a pool of {})...",
            scenes.len(),
            self.scenarios.len()
        ));
        let mut media = MediaSet::with_cover(cover);
        for (index, scene) in scenes.iter().enumerate() {
            match self
                .generator
                .generate_image(prompts::gallery_prompt(&subject, scene))
                .await
            {
                Ok(asset) => {
                    media.gallery.push(asset);
                    progress.report(format!("Photo {}/{} generated.", media.len(), target + 1));
                }
                Err(e) => {
                    warn!(scene = index, error = %e.kind, "Skipping gallery image");
                    progress.report(format!("Photo skipped: {}", e.kind));
                }
            }
        }

        let generated = media.gallery.len();
        media.pad_gallery(target);
        if generated < target {
            debug!(generated, target, "Padded gallery with cover copies");
        }

        let record = ContentRecord::new(subject, narrative, media);
        info!(id = %record.id, media = record.media.len(), "Record assembled");
        progress.report("Done! Profile created.");
        Ok(record)
    }

    async fn narrative(
        &self,
        subject: &Subject,
        progress: &ProgressReporter,
    ) -> Result<Narrative, AssemblyError> {
        progress.report("Writing SEO-optimized content...");
        let prompt = prompts::narrative_prompt(subject, &self.config.language);
        let text = self
            .generator
            .generate_text(prompt, true)
            .await
            .map_err(|e| {
                progress.report(format!("Narrative failed: {}", e.kind));
                AssemblyError::new(AssemblyErrorKind::NarrativeFailed(e.kind))
            })?;

        let mut narrative = parse_json::<Narrative>(&text).unwrap_or_else(|e| {
            warn!(error = %e.message, "Narrative unreadable, continuing with empty text");
            progress.report("Narrative unreadable, continuing with empty text.");
            Narrative::default()
        });

        if narrative.tagline.trim().is_empty() {
            narrative.tagline = format!("A musa de {}", subject.niche);
        }
        if narrative.title.trim().is_empty() {
            narrative.title = subject.name.clone();
        }
        Ok(narrative)
    }

    async fn cover(
        &self,
        subject: &Subject,
        progress: &ProgressReporter,
    ) -> Result<MediaAsset, AssemblyError> {
        match self
            .generator
            .generate_image(prompts::cover_prompt(subject))
            .await
        {
            Ok(cover) => Ok(cover),
            Err(e) => match self.config.cover_policy {
                CoverPolicy::Fallback => {
                    warn!(error = %e.kind, "Cover failed, using fallback image");
                    progress.report(format!("Cover failed ({}), using fallback image.", e.kind));
                    Ok(MediaAsset::Url(self.config.fallback_cover_url.clone()))
                }
                CoverPolicy::Abort => {
                    progress.report(format!("Cover failed: {}", e.kind));
                    Err(AssemblyError::new(AssemblyErrorKind::CoverFailed(e.kind)))
                }
            },
        }
    }
}
