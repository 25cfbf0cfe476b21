//! Randomized combinations built around a high-affinity core item.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::domain::context::Context;
use crate::domain::garment::{Category, Occasion};
use crate::domain::outfit::{CandidateOutfit, CandidateSource, OutfitItem};
use crate::taxonomy::{ColorModel, KeywordText, WeatherBand};

use super::classify::CategorizedWardrobe;
use super::is_compatible_extension;

pub const MAX_CREATIVE_ITEMS: usize = 4;
const MIN_CREATIVE_ITEMS: usize = 2;

const FAVORITE_BONUS: f64 = 30.0;
const OCCASION_MATCH_BONUS: f64 = 20.0;
const VERSATILE_BONUS: f64 = 10.0;
const SEASON_MATCH_BONUS: f64 = 15.0;
const WEATHER_MATERIAL_BONUS: f64 = 15.0;
const FAVORITE_COLOR_BONUS: f64 = 10.0;
const PREFERRED_BRAND_BONUS: f64 = 10.0;

/// Where creative-branch randomness comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "seed", rename_all = "snake_case")]
pub enum RandomnessMode {
    /// Skip the creative branch entirely.
    Disabled,
    /// Reproducible draws from a fixed seed.
    Seeded(u64),
    /// Fresh OS entropy on every request.
    Entropy,
}

impl RandomnessMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    pub fn rng(&self) -> Option<StdRng> {
        match self {
            Self::Disabled => None,
            Self::Seeded(seed) => Some(StdRng::seed_from_u64(*seed)),
            Self::Entropy => Some(StdRng::from_entropy()),
        }
    }

    /// Seed for deterministic naming; entropy and disabled modes use 0.
    pub fn naming_seed(&self) -> u64 {
        match self {
            Self::Seeded(seed) => *seed,
            Self::Disabled | Self::Entropy => 0,
        }
    }
}

impl fmt::Display for RandomnessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("disabled"),
            Self::Seeded(seed) => write!(f, "seeded({seed})"),
            Self::Entropy => f.write_str("entropy"),
        }
    }
}

impl FromStr for RandomnessMode {
    type Err = String;

    /// Accepts `disabled`, `entropy`, `seeded` (the default seed), or `seeded:<u64>`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "disabled" | "off" | "none" => Ok(Self::Disabled),
            "entropy" | "random" => Ok(Self::Entropy),
            "seeded" => Ok(Self::Seeded(super::DEFAULT_SEED)),
            other => match other.strip_prefix("seeded:") {
                Some(seed) => seed
                    .trim()
                    .parse::<u64>()
                    .map(Self::Seeded)
                    .map_err(|_| format!("invalid seed `{seed}` in randomness mode")),
                None => Err(format!(
                    "unsupported randomness mode `{value}`; expected disabled, entropy, or seeded:<n>"
                )),
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CreativeSettings {
    pub attempts: usize,
    pub retry_budget: usize,
}

/// Affinity of one item to the request, used to pick the core item.
pub fn core_item_score(
    item: &OutfitItem,
    context: &Context,
    band: Option<&WeatherBand>,
    colors: &ColorModel,
) -> f64 {
    let garment = &item.garment;
    let mut score = 0.0;

    if garment.favorite {
        score += FAVORITE_BONUS;
    }

    match (context.occasion, garment.occasion) {
        (Some(requested), Some(own)) if own == requested => score += OCCASION_MATCH_BONUS,
        (Some(_), Some(Occasion::Versatile)) => score += VERSATILE_BONUS,
        _ => {}
    }

    if let Some(season) = context.season {
        if garment.suits_season(season) {
            score += SEASON_MATCH_BONUS;
        }
    }

    if let (Some(band), Some(material)) = (band, garment.material.as_deref()) {
        if KeywordText::new(material).contains_any(band.preferred_materials) {
            score += WEATHER_MATERIAL_BONUS;
        }
    }

    if let Some(color) = garment.color.as_deref().and_then(|raw| colors.normalize(raw)) {
        let favorite = context
            .preferences
            .favorite_colors
            .iter()
            .any(|favorite| colors.normalize(favorite) == Some(color));
        if favorite {
            score += FAVORITE_COLOR_BONUS;
        }
    }

    if garment.brand.as_deref().map(|brand| context.preferences.prefers_brand(brand)).unwrap_or(false) {
        score += PREFERRED_BRAND_BONUS;
    }

    score
}

/// Best-scoring item; the earliest item wins ties.
pub fn select_core_item<'a>(
    wardrobe: &'a CategorizedWardrobe,
    context: &Context,
    band: Option<&WeatherBand>,
    colors: &ColorModel,
) -> Option<&'a OutfitItem> {
    let mut best: Option<(&OutfitItem, f64)> = None;
    for item in wardrobe.iter() {
        let score = core_item_score(item, context, band, colors);
        if best.map(|(_, top)| score > top).unwrap_or(true) {
            best = Some((item, score));
        }
    }
    best.map(|(item, _)| item)
}

/// Each attempt starts from the core item and draws random compatible items
/// from unused buckets. Attempts that end with fewer than two items are dropped.
pub fn creative_candidates(
    core: &OutfitItem,
    wardrobe: &CategorizedWardrobe,
    settings: CreativeSettings,
    rng: &mut StdRng,
) -> Vec<CandidateOutfit> {
    let mut candidates = Vec::new();

    for attempt in 0..settings.attempts {
        let mut items = vec![core.clone()];
        let mut used: BTreeSet<Category> = BTreeSet::from([core.category]);
        let mut failures = 0;

        while items.len() < MAX_CREATIVE_ITEMS && failures < settings.retry_budget {
            let open: Vec<Category> = wardrobe.categories().filter(|category| !used.contains(category)).collect();
            let Some(category) = open.choose(rng).copied() else {
                break;
            };
            let Some(pick) = wardrobe.bucket(category).choose(rng) else {
                break;
            };

            if is_compatible_extension(&items, pick) {
                items.push(pick.clone());
                used.insert(category);
            } else {
                failures += 1;
            }
        }

        if items.len() >= MIN_CREATIVE_ITEMS {
            candidates.push(CandidateOutfit::assemble(items, CandidateSource::Creative { attempt }));
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{
        core_item_score, creative_candidates, select_core_item, CreativeSettings, RandomnessMode,
        MAX_CREATIVE_ITEMS,
    };
    use crate::domain::context::{Context, UserPreferences};
    use crate::domain::garment::{Garment, Occasion};
    use crate::generator::classify::{classify_all, CategorizedWardrobe};
    use crate::taxonomy::ColorModel;

    fn wardrobe() -> CategorizedWardrobe {
        CategorizedWardrobe::from_items(classify_all(&[
            Garment::new("t1", "Oxford shirt", "tops").with_occasion(Occasion::Work),
            Garment::new("t2", "Graphic tee", "tops").with_color("red").favorite(),
            Garment::new("b1", "Chinos", "bottoms"),
            Garment::new("b2", "Jeans", "bottoms").with_occasion(Occasion::Casual),
            Garment::new("f1", "White sneakers", "shoes"),
            Garment::new("a1", "Leather belt", "accessories"),
        ]))
    }

    #[test]
    fn randomness_mode_parses_and_displays() {
        assert_eq!("disabled".parse::<RandomnessMode>(), Ok(RandomnessMode::Disabled));
        assert_eq!("entropy".parse::<RandomnessMode>(), Ok(RandomnessMode::Entropy));
        assert_eq!("seeded:7".parse::<RandomnessMode>(), Ok(RandomnessMode::Seeded(7)));
        assert_eq!("seeded".parse::<RandomnessMode>(), Ok(RandomnessMode::Seeded(42)));
        assert!("seeded:x".parse::<RandomnessMode>().is_err());
        assert_eq!(RandomnessMode::Seeded(7).to_string(), "seeded(7)");
        assert!(RandomnessMode::Disabled.rng().is_none());
        assert!(!RandomnessMode::Disabled.is_enabled());
    }

    #[test]
    fn core_item_prefers_favorites_and_matching_colors() {
        let colors = ColorModel::standard();
        let wardrobe = wardrobe();
        let context = Context::new().with_preferences(UserPreferences {
            favorite_colors: vec!["Red".to_owned()],
            ..UserPreferences::default()
        });

        let core = select_core_item(&wardrobe, &context, None, &colors).expect("core item");
        assert_eq!(core.garment.id.0, "t2");
        assert_eq!(core_item_score(core, &context, None, &colors), 40.0);
    }

    #[test]
    fn seeded_attempts_are_reproducible_and_bounded() {
        let colors = ColorModel::standard();
        let wardrobe = wardrobe();
        let context = Context::new();
        let core = select_core_item(&wardrobe, &context, None, &colors).expect("core item");
        let settings = CreativeSettings { attempts: 3, retry_budget: 12 };

        let first = creative_candidates(core, &wardrobe, settings, &mut StdRng::seed_from_u64(42));
        let second = creative_candidates(core, &wardrobe, settings, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
        assert!(!first.is_empty());
        for candidate in &first {
            assert!(candidate.len() >= 2 && candidate.len() <= MAX_CREATIVE_ITEMS);
            assert!(candidate.items.iter().any(|item| item.garment.id == core.garment.id));
        }
    }

    #[test]
    fn lone_item_produces_no_creative_candidates() {
        let colors = ColorModel::standard();
        let wardrobe = CategorizedWardrobe::from_items(classify_all(&[Garment::new("t", "Tee", "tops")]));
        let core = select_core_item(&wardrobe, &Context::new(), None, &colors).expect("core item");
        let settings = CreativeSettings { attempts: 3, retry_budget: 12 };
        assert!(creative_candidates(core, &wardrobe, settings, &mut StdRng::seed_from_u64(1)).is_empty());
    }
}
