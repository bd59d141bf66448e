//! End-to-end flow through the re-exported API with a scripted driver.

use async_trait::async_trait;
use lumiere::{
    AssemblyConfig, ContentAssembler, ContentCatalog, CoverPolicy, GeneratedPayload,
    GenerationDriver, GenerationError, GenerationErrorKind, GenerationKind, GenerationRequest,
    InMemoryContentStore, LumiereConfig, MediaAsset, ProgressReporter, RateLimitedGenerator,
    RetryPolicy, Subject,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Answers text calls with a narrative and refuses every second image.
#[derive(Default)]
struct AlternatingDriver {
    images: AtomicUsize,
}

#[async_trait]
impl GenerationDriver for AlternatingDriver {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedPayload, GenerationError> {
        match request.kind() {
            GenerationKind::Text { .. } => Ok(GeneratedPayload::Text(
                "```json\n{\"title\": \"Bella abroad\", \"bodyParagraphs\": [\"One.\"]}\n```"
                    .to_string(),
            )),
            GenerationKind::Image => {
                let n = self.images.fetch_add(1, Ordering::SeqCst);
                if n % 2 == 1 {
                    Err(GenerationError::new(GenerationErrorKind::Rejected(
                        "finish reason: IMAGE_SAFETY".to_string(),
                    )))
                } else {
                    Ok(GeneratedPayload::Image(MediaAsset::inline(
                        "image/png",
                        vec![n as u8],
                    )))
                }
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "alternating"
    }

    fn model_name(&self) -> &str {
        "alternating-1"
    }
}

#[tokio::test]
async fn test_build_and_list_through_facade() -> anyhow::Result<()> {
    let generator = Arc::new(RateLimitedGenerator::new(
        AlternatingDriver::default(),
        RetryPolicy {
            max_retries: 0,
            cooldown: Duration::from_millis(1),
            spacing: Duration::ZERO,
        },
    ));
    let assembler = ContentAssembler::new(
        generator.clone(),
        AssemblyConfig {
            gallery_target: 4,
            cover_policy: CoverPolicy::Abort,
            ..AssemblyConfig::default()
        },
    );
    let catalog = ContentCatalog::new(Arc::new(InMemoryContentStore::new()), None);

    let record = catalog
        .build(
            &assembler,
            Subject::new("Bella", "Luxury Travel", "Short dark hair"),
            &ProgressReporter::silent(),
        )
        .await?;

    // text, cover and four gallery calls; two gallery calls refused
    assert_eq!(generator.calls(), 6);
    assert_eq!(record.narrative.title, "Bella abroad");
    assert_eq!(record.narrative.tagline, "A musa de Luxury Travel");
    assert_eq!(record.media.len(), 5);
    assert_eq!(record.media.gallery[2], record.media.cover);
    assert_eq!(record.media.gallery[3], record.media.cover);

    assert_eq!(catalog.records().await.len(), 1);
    assert_eq!(catalog.niches().await, vec!["Luxury Travel"]);
    Ok(())
}

#[test]
fn test_bundled_configuration_is_valid() -> anyhow::Result<()> {
    let config = LumiereConfig::default();
    config.validate()?;
    assert_eq!(config.assembly.gallery_target(), 8);
    Ok(())
}
