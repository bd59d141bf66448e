//! Tests for reading records written by earlier storage revisions.

use lumiere_core::{
    ContentRecord, MediaAsset, MediaSet, Narrative, PublicationState, Subject, normalize_legacy,
};
use serde_json::json;

#[test]
fn test_flat_snake_case_shape() -> anyhow::Result<()> {
    let value = json!({
        "id": "1718000000000",
        "slug": "luna",
        "name": "Luna",
        "niche": "Crypto",
        "tagline": "A musa de Crypto",
        "physical_description": "short bob, freckles",
        "is_remote": false,
        "title": "Luna",
        "intro": "Hook",
        "body": "First paragraph.\n\nSecond paragraph.\n",
        "expert_verdict": "Verdict",
        "insider_secret": "Secret",
        "cover_url": "https://cdn.example.com/luna.jpg",
        "gallery_urls": ["https://cdn.example.com/1.jpg", "https://cdn.example.com/2.jpg"],
        "keywords": ["defi", "staking"],
        "faqs": [{"question": "Q?", "answer": "A."}]
    });

    let record = normalize_legacy(&value)?;

    assert_eq!(record.subject.name, "Luna");
    assert_eq!(record.subject.details, "short bob, freckles");
    assert_eq!(
        record.narrative.body_paragraphs,
        vec!["First paragraph.", "Second paragraph."]
    );
    assert_eq!(record.narrative.keywords, vec!["defi", "staking"]);
    assert_eq!(record.narrative.faqs.len(), 1);
    assert_eq!(record.narrative.expert_verdict, "Verdict");
    assert_eq!(record.media.gallery.len(), 2);
    assert_eq!(record.publication_state, PublicationState::Draft);
    assert_eq!(record.created_at.timestamp_millis(), 1_718_000_000_000);
    Ok(())
}

#[test]
fn test_flat_body_keeps_line_breaks_inside_paragraphs() -> anyhow::Result<()> {
    let value = json!({
        "name": "Luna",
        "body": "Line one\ncontinues.\n\nSecond paragraph."
    });

    let record = normalize_legacy(&value)?;

    assert_eq!(
        record.narrative.body_paragraphs,
        vec!["Line one\ncontinues.", "Second paragraph."]
    );
    Ok(())
}

#[test]
fn test_nested_content_wins_over_flat_fields() -> anyhow::Result<()> {
    let value = json!({
        "name": "Bella",
        "title": "flat title",
        "content": { "title": "nested title", "expertVerdict": "nested verdict" }
    });

    let record = normalize_legacy(&value)?;

    assert_eq!(record.narrative.title, "nested title");
    assert_eq!(record.narrative.expert_verdict, "nested verdict");
    assert!(!record.id.as_str().is_empty());
    Ok(())
}

#[test]
fn test_inline_cover_is_decoded() -> anyhow::Result<()> {
    let value = json!({
        "name": "Bella",
        "coverImage": "data:image/png;base64,iVBORw0KGgo=",
    });

    let record = normalize_legacy(&value)?;

    assert!(record.media.cover.is_inline());
    Ok(())
}

#[test]
fn test_missing_name_is_rejected() {
    let err = normalize_legacy(&json!({"niche": "Luxury"})).unwrap_err();
    assert!(err.message.contains("missing name"));

    assert!(normalize_legacy(&json!(["not", "an", "object"])).is_err());
}

#[test]
fn test_current_shape_round_trips() -> anyhow::Result<()> {
    let mut media = MediaSet::with_cover(MediaAsset::inline("image/jpeg", vec![1, 2, 3]));
    media.pad_gallery(3);
    let record = ContentRecord::new(
        Subject::new("Bella", "Luxury Travel", "tall"),
        Narrative {
            title: "Bella".to_string(),
            body_paragraphs: vec!["p1".to_string()],
            ..Default::default()
        },
        media,
    );

    let value = serde_json::to_value(&record)?;
    let restored = normalize_legacy(&value)?;

    assert_eq!(restored, record);
    Ok(())
}
