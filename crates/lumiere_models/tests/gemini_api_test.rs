//! Live calls against the Gemini API. Run with `--features api`.

#![cfg(feature = "api")]

use lumiere_interface::GenerationDriver;
use lumiere_models::GeminiClient;
use lumiere_rate_limit::{LumiereConfig, RateLimitedGenerator};

#[tokio::test]
async fn test_live_structured_text() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = LumiereConfig::load()?;
    let client = GeminiClient::from_env(&config.generation)?;
    assert_eq!(client.provider_name(), "gemini");

    let generator = RateLimitedGenerator::new(client, config.generation.retry_policy());
    let text = generator
        .generate_text(r#"Return {"color": "<any color>"} as JSON."#, true)
        .await?;

    let value: serde_json::Value = serde_json::from_str(&text)?;
    assert!(value.get("color").is_some());
    Ok(())
}
