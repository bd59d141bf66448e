//! Record catalog command handlers.

use super::commands::{OutputFormat, RecordCommands};
use lumiere::{
    ContentCatalog, ContentRecord, JsonError, LumiereConfig, LumiereResult, RecordId,
    StorageError, StorageErrorKind, open_stores,
};
use serde_json::Value;
use std::path::Path;

/// Open the configured stores and load the catalog from them.
pub async fn open_catalog(config: &LumiereConfig) -> LumiereResult<ContentCatalog> {
    let stores = open_stores(&config.storage)?;
    let catalog = ContentCatalog::new(stores.local, stores.remote);
    catalog.load().await?;
    Ok(catalog)
}

/// Handle record catalog commands.
pub async fn handle_record_command(
    config: &LumiereConfig,
    command: RecordCommands,
) -> LumiereResult<()> {
    let catalog = open_catalog(config).await?;

    match command {
        RecordCommands::List { format } => list_records(&catalog, format).await,
        RecordCommands::Show { id } => show_record(&catalog, &RecordId::from(id)).await,
        RecordCommands::Related { id, count } => {
            let related = catalog.related(&RecordId::from(id), count).await;
            print_summaries(&related);
            Ok(())
        }
        RecordCommands::Niches => {
            for niche in catalog.niches().await {
                println!("{}", niche);
            }
            Ok(())
        }
        RecordCommands::Publish { id } => {
            let published = catalog.publish(&RecordId::from(id)).await?;
            println!("{}\t{}", published.id, published.publication_state);
            Ok(())
        }
        RecordCommands::Delete { id } => {
            catalog.delete(&RecordId::from(id)).await?;
            Ok(())
        }
        RecordCommands::Import { file } => import_file(&catalog, &file).await,
    }
}

async fn list_records(catalog: &ContentCatalog, format: OutputFormat) -> LumiereResult<()> {
    let records = catalog.records().await;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(records.as_slice())
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            print_summaries(&records);
            println!("Total: {} records", records.len());
        }
    }

    Ok(())
}

fn print_summaries(records: &[ContentRecord]) {
    println!(
        "{:<38} {:<10} {:<17} {:<20} {}",
        "Id", "State", "Created", "Name", "Niche"
    );
    println!("{:-<100}", "");
    for record in records {
        println!(
            "{:<38} {:<10} {:<17} {:<20} {}",
            record.id,
            record.publication_state,
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.subject.name,
            record.subject.niche
        );
    }
}

async fn show_record(catalog: &ContentCatalog, id: &RecordId) -> LumiereResult<()> {
    let record = catalog
        .get(id)
        .await
        .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(id.to_string())))?;

    let json =
        serde_json::to_string_pretty(&record).map_err(|e| JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

async fn import_file(catalog: &ContentCatalog, file: &Path) -> LumiereResult<()> {
    let text = tokio::fs::read_to_string(file).await.map_err(|e| {
        StorageError::new(StorageErrorKind::Io(format!("{}: {}", file.display(), e)))
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|e| JsonError::new(e.to_string()))?;

    let entries = match value {
        Value::Array(entries) => entries,
        single => vec![single],
    };

    for entry in &entries {
        let record = catalog.import(entry).await?;
        println!("{}\t{}", record.id, record.subject.name);
    }
    tracing::info!(count = entries.len(), "Import finished");
    Ok(())
}
