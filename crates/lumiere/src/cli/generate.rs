//! Generation command handlers.

use super::open_catalog;
use lumiere::{
    AssemblyError, AssemblyErrorKind, ContentAssembler, GeminiClient, LumiereConfig,
    LumiereResult, PersonaGenerator, ProgressReporter, RateLimitedGenerator, Subject,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Print progress lines until every reporter is dropped.
fn progress_printer() -> (ProgressReporter, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let printer = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            eprintln!("{}", line);
        }
    });
    (ProgressReporter::new(tx), printer)
}

fn generator(config: &LumiereConfig) -> LumiereResult<Arc<RateLimitedGenerator<GeminiClient>>> {
    let client = GeminiClient::from_env(&config.generation)?;
    Ok(Arc::new(RateLimitedGenerator::new(
        client,
        config.generation.retry_policy(),
    )))
}

/// Build a record for the given subject, save it, and optionally publish it.
#[tracing::instrument(skip(config, details))]
pub async fn generate_record(
    config: &LumiereConfig,
    name: String,
    niche: String,
    details: String,
    publish: bool,
) -> LumiereResult<()> {
    let catalog = open_catalog(config).await?;
    let assembler = Arc::new(ContentAssembler::new(
        generator(config)?,
        config.assembly.clone(),
    ));

    let (progress, printer) = progress_printer();
    let build = catalog.spawn_build(assembler, Subject::new(name, niche, details), progress);
    let outcome = build.await;
    let _ = printer.await;

    let record = outcome.map_err(|e| {
        AssemblyError::new(AssemblyErrorKind::Interrupted(e.to_string()))
    })??;

    println!("{}", record.id);
    eprintln!(
        "Saved '{}' ({} media, slug {})",
        record.narrative.title,
        record.media.len(),
        record.slug()
    );

    if publish {
        let published = catalog.publish(&record.id).await?;
        eprintln!("Published {} ({})", published.id, published.publication_state);
    }

    Ok(())
}

/// Draw a random subject and print it as JSON.
pub async fn random_persona(config: &LumiereConfig) -> LumiereResult<()> {
    let personas = PersonaGenerator::new(generator(config)?);

    let (progress, printer) = progress_printer();
    let subject = personas.random_subject(&progress).await;
    drop(progress);
    let _ = printer.await;

    let json = serde_json::to_string_pretty(&subject)
        .map_err(|e| lumiere::JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
