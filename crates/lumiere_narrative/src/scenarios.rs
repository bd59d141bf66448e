//! Pool of gallery scene descriptions.

use rand::Rng;
use rand::seq::SliceRandom;

const DEFAULT_SCENARIOS: &[&str] = &[
    "Morning light by a large window, reading a book with a cup of coffee, relaxed smile",
    "Walking through a cobblestone old town at golden hour, light linen outfit, candid shot",
    "Rooftop terrace at dusk, city skyline in the background, elegant evening wear",
    "Browsing a vibrant open-air market, colorful produce, natural candid laughter",
    "Modern gym, athletic wear, mid-workout with focused expression, mirror reflection",
    "Luxury hotel lobby, tailored blazer, checking in with a leather travel bag",
    "Seaside promenade, wind in the hair, casual summer dress, sunset backlight",
    "Cozy cafe corner, laptop open, taking notes, warm ambient lighting",
    "Art gallery opening, contemplating a large painting, chic monochrome outfit",
    "Mountain viewpoint after a hike, outdoor jacket, panoramic valley behind",
    "Tennis court, classic white sportswear, holding a racket, bright daylight",
    "Home kitchen, preparing a fresh salad, oversized knit sweater, morning vibes",
    "Vintage convertible on a coastal road, sunglasses, scarf, cinematic framing",
    "Bookstore aisle, pulling a book from the shelf, soft focus background",
    "Yacht deck on calm water, nautical striped top, bright midday sun",
    "Fitting room mirror, trying on a tailored coat, boutique interior",
];

/// Scenes the assembler samples from, one gallery image per scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioPool {
    scenarios: Vec<String>,
}

impl Default for ScenarioPool {
    fn default() -> Self {
        Self::new(DEFAULT_SCENARIOS.iter().map(|s| s.to_string()))
    }
}

impl ScenarioPool {
    /// Pool over the given scenes.
    pub fn new(scenarios: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            scenarios: scenarios.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of scenes available.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Draw up to `n` distinct scenes in random order.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumiere_narrative::ScenarioPool;
    ///
    /// let pool = ScenarioPool::new(["a", "b", "c"]);
    /// let picked = pool.sample(5, &mut rand::thread_rng());
    /// assert_eq!(picked.len(), 3);
    /// ```
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<String> {
        self.scenarios
            .choose_multiple(rng, n.min(self.scenarios.len()))
            .cloned()
            .collect()
    }
}
