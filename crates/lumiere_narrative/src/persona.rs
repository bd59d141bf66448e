//! Random subject generation.

use crate::{ProgressReporter, parse_json, prompts};
use lumiere_core::Subject;
use lumiere_interface::GenerationDriver;
use lumiere_rate_limit::RateLimitedGenerator;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{instrument, warn};

const ETHNICITIES: &[&str] = &[
    "Brazilian Mixed",
    "Japanese",
    "Afro-Brazilian",
    "Scandinavian",
    "Italian",
    "Korean",
    "Colombian",
    "Russian",
    "Latina",
    "Middle Eastern",
];
const BODY_TYPES: &[&str] = &["Slim", "Curvy", "Athletic", "Tall & Slender", "Petite", "Fit"];
const VIBES: &[&str] = &[
    "Tattooed Alternative",
    "Elegant Old Money",
    "Beach Lifestyle",
    "High-Fashion Edgy",
    "Fitness Enthusiast",
    "Boho Chic",
    "Minimalist",
    "Streetwear",
    "Cyberpunk",
    "Vintage",
];
const FACIAL_FEATURES: &[&str] = &[
    "Freckles",
    "Mole on cheek",
    "Sharp jawline",
    "Dimples",
    "Glasses",
    "Heterochromia",
    "Gap teeth",
    "Natural look",
    "Nose piercing",
    "Blue eyes",
    "Green eyes",
];
const HAIR_STYLES: &[&str] = &[
    "Long wavy",
    "Short bob",
    "Pixie cut",
    "Messy bun",
    "Straight sleek",
    "Braids",
    "Ponytail",
    "Bangs",
];

const FALLBACK_NAME: &str = "Bella";
const FALLBACK_NICHE: &str = "Luxury Travel";

/// Randomly drawn physical traits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaTraits {
    /// Age in years, 19..=28
    pub age: u8,
    /// Ethnicity label
    pub ethnicity: &'static str,
    /// Body type label
    pub body_type: &'static str,
    /// Hair style label
    pub hair: &'static str,
    /// Distinctive facial feature
    pub feature: &'static str,
    /// Overall style
    pub vibe: &'static str,
}

impl PersonaTraits {
    /// Draw one value per trait list.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            age: rng.gen_range(19..=28),
            ethnicity: pick(ETHNICITIES, rng),
            body_type: pick(BODY_TYPES, rng),
            hair: pick(HAIR_STYLES, rng),
            feature: pick(FACIAL_FEATURES, rng),
            vibe: pick(VIBES, rng),
        }
    }

    /// Physical description reused in every image prompt.
    pub fn describe(&self) -> String {
        format!(
            "Adult woman, {} years old. Ethnicity: {}. Body type: {}. Hair: {}. Distinctive feature: {}. Style: {}. Confident, photogenic model.",
            self.age, self.ethnicity, self.body_type, self.hair, self.feature, self.vibe
        )
    }
}

fn pick<R: Rng + ?Sized>(list: &[&'static str], rng: &mut R) -> &'static str {
    list.choose(rng).copied().unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct PersonaReply {
    #[serde(default)]
    name: String,
    #[serde(default)]
    niche: String,
}

/// Fills in a random subject, naming it through the text endpoint.
pub struct PersonaGenerator<D> {
    generator: Arc<RateLimitedGenerator<D>>,
}

impl<D: GenerationDriver> PersonaGenerator<D> {
    /// Generator over a shared rate-limited driver.
    pub fn new(generator: Arc<RateLimitedGenerator<D>>) -> Self {
        Self { generator }
    }

    /// Draw random traits and ask the endpoint for a fitting name and niche.
    ///
    /// Never fails: when the call or its parsing fails the subject falls back
    /// to a default name and niche, keeping the drawn description.
    #[instrument(skip(self, progress))]
    pub async fn random_subject(&self, progress: &ProgressReporter) -> Subject {
        progress.report("Activating persona generator...");
        let traits = {
            let mut rng = rand::thread_rng();
            PersonaTraits::random(&mut rng)
        };
        let details = traits.describe();

        let reply = self
            .generator
            .generate_text(prompts::persona_prompt(traits.vibe, &details), true)
            .await
            .map_err(|e| e.kind.to_string())
            .and_then(|text| parse_json::<PersonaReply>(&text).map_err(|e| e.message));

        match reply {
            Ok(reply) if !reply.name.trim().is_empty() && !reply.niche.trim().is_empty() => {
                progress.report(format!(
                    "Persona: {} | {} | {}",
                    reply.name, traits.ethnicity, traits.feature
                ));
                Subject::new(reply.name, reply.niche, details)
            }
            Ok(_) => {
                warn!("Persona reply missing name or niche, using defaults");
                progress.report("AI busy, using default data.");
                Subject::new(FALLBACK_NAME, FALLBACK_NICHE, details)
            }
            Err(reason) => {
                warn!(%reason, "Persona generation failed, using defaults");
                progress.report("AI busy, using default data.");
                Subject::new(FALLBACK_NAME, FALLBACK_NICHE, details)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_traits_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let traits = PersonaTraits::random(&mut rng);
            assert!((19..=28).contains(&traits.age));
            assert!(VIBES.contains(&traits.vibe));
        }
    }

    #[test]
    fn test_description_mentions_every_trait() {
        let mut rng = StdRng::seed_from_u64(1);
        let traits = PersonaTraits::random(&mut rng);
        let description = traits.describe();
        for part in [traits.ethnicity, traits.body_type, traits.hair, traits.feature, traits.vibe] {
            assert!(description.contains(part));
        }
    }
}
