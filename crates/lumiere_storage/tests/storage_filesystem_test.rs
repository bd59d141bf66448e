//! Filesystem and in-memory record stores.

mod test_utils;

use lumiere_core::{PublicationState, RecordId};
use lumiere_interface::ContentStore;
use lumiere_storage::{FileSystemContentStore, InMemoryContentStore};
use tempfile::TempDir;
use test_utils::sample_record;

#[tokio::test]
async fn test_round_trip_lists_newest_first() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = FileSystemContentStore::new(dir.path())?;

    let older = sample_record("Ana", "Wine", 30);
    let newer = sample_record("Bella", "Travel", 1);
    store.upsert(&older).await?;
    store.upsert(&newer).await?;

    let listed = store.list().await?;
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, newer.id);
    assert_eq!(listed[1], older);
    Ok(())
}

#[tokio::test]
async fn test_upsert_overwrites_and_returns_draft() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = FileSystemContentStore::new(dir.path())?;

    let mut record = sample_record("Ana", "Wine", 0).published();
    let stored = store.upsert(&record).await?;
    assert_eq!(stored.publication_state, PublicationState::Draft);

    record.narrative.intro = "Updated".to_string();
    store.upsert(&record).await?;

    let listed = store.list().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].narrative.intro, "Updated");
    assert!(!listed[0].is_published());
    assert!(!dir.path().join(format!("{}.json.tmp", record.id)).exists());
    Ok(())
}

#[tokio::test]
async fn test_remove_is_idempotent() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = FileSystemContentStore::new(dir.path())?;
    let record = sample_record("Ana", "Wine", 0);
    store.upsert(&record).await?;

    store.remove(&record.id).await?;
    store.remove(&record.id).await?;
    store.remove(&RecordId::from("never-existed")).await?;

    assert!(store.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_missing_directory_lists_empty() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("records");
    let store = FileSystemContentStore::new(&path)?;
    std::fs::remove_dir(&path)?;

    assert!(store.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_legacy_files_load_and_junk_is_skipped() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(
        dir.path().join("1717171717171.json"),
        r#"{
            "id": "1717171717171",
            "name": "Carla",
            "niche": "Fitness",
            "title": "Carla",
            "body": "First.\n\nSecond.",
            "cover_url": "https://cdn.example.com/carla.jpg",
            "gallery_urls": ["https://cdn.example.com/carla-1.jpg"],
            "is_remote": true
        }"#,
    )?;
    std::fs::write(dir.path().join("broken.json"), "{ not json")?;
    std::fs::write(dir.path().join("notes.txt"), "ignored")?;

    let store = FileSystemContentStore::new(dir.path())?;
    let listed = store.list().await?;

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].subject.name, "Carla");
    assert_eq!(listed[0].narrative.body_paragraphs, vec!["First.", "Second."]);
    assert_eq!(listed[0].publication_state, PublicationState::Draft);
    Ok(())
}

#[tokio::test]
async fn test_path_escaping_ids_are_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = FileSystemContentStore::new(dir.path())?;
    let mut record = sample_record("Ana", "Wine", 0);
    record.id = RecordId::from("../escape");

    assert!(store.upsert(&record).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_memory_store_behaves_like_a_local_store() -> anyhow::Result<()> {
    let store = InMemoryContentStore::new();
    let first = sample_record("Ana", "Wine", 10);
    let second = sample_record("Bella", "Travel", 0);
    assert_ne!(first.id, second.id);

    store.upsert(&first.clone().published()).await?;
    store.upsert(&second).await?;

    let listed = store.list().await?;
    assert_eq!(listed[0].id, second.id);
    assert!(listed.iter().all(|record| !record.is_published()));

    store.remove(&first.id).await?;
    store.remove(&first.id).await?;
    assert_eq!(store.len().await, 1);
    Ok(())
}
