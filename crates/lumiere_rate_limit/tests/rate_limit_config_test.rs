//! Tests for the configuration system.

use lumiere_rate_limit::{BackendKind, CoverPolicy, LumiereConfig};
use std::io::Write;
use std::str::FromStr;
use std::time::Duration;

#[test]
fn test_load_bundled_defaults() {
    let config = LumiereConfig::load().unwrap();

    assert_eq!(config.generation.text_model, "gemini-2.5-flash");
    assert_eq!(config.generation.max_retries, 2);
    assert!(config.generation.cooldown_ms > config.generation.spacing_ms);
    assert_eq!(config.assembly.cover_policy, CoverPolicy::Fallback);
    assert_eq!(config.assembly.gallery_target(), 8);
    assert_eq!(config.storage.jpeg_quality, 80);
}

#[test]
fn test_retry_policy_from_generation_section() {
    let config = LumiereConfig::default();
    let policy = config.generation.retry_policy();

    assert_eq!(policy.max_retries, 2);
    assert_eq!(policy.cooldown, Duration::from_secs(10));
    assert_eq!(policy.spacing, Duration::from_secs(2));
}

#[test]
fn test_partial_file_overlays_defaults() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(
        file,
        r#"
[generation]
max_retries = 4

[assembly]
gallery_target = 3
cover_policy = "abort"
"#
    )?;

    let config = LumiereConfig::from_file(file.path())?;

    assert_eq!(config.generation.max_retries, 4);
    assert_eq!(config.generation.cooldown_ms, 10_000);
    assert_eq!(config.assembly.gallery_target(), 3);
    assert_eq!(config.assembly.cover_policy, CoverPolicy::Abort);
    assert_eq!(config.assembly.language, "pt-BR");
    Ok(())
}

#[test]
fn test_cooldown_must_exceed_spacing() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "[generation]\ncooldown_ms = 1000\nspacing_ms = 1000")?;

    let err = LumiereConfig::from_file(file.path()).unwrap_err();

    assert!(err.to_string().contains("cooldown_ms"));
    Ok(())
}

#[test]
fn test_remote_backend_requires_table() {
    let mut config = LumiereConfig::default();
    config.storage.backend = BackendKind::Git;

    let err = config.validate().unwrap_err();

    assert!(err.message.contains("[storage.git]"));
}

#[test]
fn test_gallery_target_is_clamped() {
    let mut config = LumiereConfig::default();

    config.assembly.gallery_target = 0;
    assert_eq!(config.assembly.gallery_target(), 1);

    config.assembly.gallery_target = 40;
    assert_eq!(config.assembly.gallery_target(), 8);
}

#[test]
fn test_enum_labels_parse() {
    assert_eq!(CoverPolicy::from_str("abort").unwrap(), CoverPolicy::Abort);
    assert_eq!(BackendKind::from_str("document").unwrap(), BackendKind::Document);
    assert_eq!(BackendKind::Webhook.to_string(), "webhook");
}
