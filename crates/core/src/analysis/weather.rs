//! Weather suitability: band selection plus five bounded factors.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::context::WeatherSnapshot;
use crate::domain::garment::Category;
use crate::domain::outfit::{clamp_score, CandidateOutfit, OutfitItem, ScoringFactor};
use crate::taxonomy::{KeywordText, MaterialProfile, WeatherBand, WeatherBandKind, WeatherTaxonomy};

pub const NEUTRAL_WEATHER_SCORE: f64 = 50.0;

const MISSING_LAYER_PENALTY: f64 = 8.0;
const ALL_LAYERS_BONUS: f64 = 15.0;
const LAYER_COUNT_MATCH: f64 = 5.0;
const LAYER_COUNT_MISMATCH: f64 = 5.0;
const COVERAGE_BOUND: f64 = 10.0;

const RAIN_THRESHOLD: f64 = 50.0;
const WIND_THRESHOLD_KMH: f64 = 30.0;
const UV_THRESHOLD: f64 = 6.0;

const RAIN_GEAR: &[&str] = &["waterproof", "rain", "raincoat", "water resistant", "gore tex", "rain boot"];
const WIND_GEAR: &[&str] = &["windbreaker", "jacket", "coat", "shell", "parka", "anorak"];
const SUN_GEAR: &[&str] = &["hat", "cap", "long sleeve", "sun", "sunglasses", "upf"];

const SKIMPY_TOPS: &[&str] = &["tank", "crop top", "camisole", "tube top", "halter"];
const LONG_SLEEVE_TOPS: &[&str] = &["long sleeve", "sweater", "jumper", "turtleneck", "sweatshirt"];
const SHORT_BOTTOMS: &[&str] = &["shorts", "mini skirt", "mini"];
const MID_BOTTOMS: &[&str] = &["skirt", "culotte", "capri"];
const LONG_OUTERWEAR: &[&str] = &["parka", "trench", "overcoat", "long coat", "duster"];

/// First match wins; footwear not listed defaults to a closed shoe.
const EXTREMITY_RULES: &[(&str, f64)] = &[
    ("glove", 25.0),
    ("mitten", 25.0),
    ("boot", 35.0),
    ("sandal", 5.0),
    ("flip flop", 5.0),
    ("slide", 5.0),
    ("hat", 15.0),
    ("beanie", 15.0),
    ("cap", 15.0),
    ("scarf", 15.0),
    ("sock", 10.0),
];
const DEFAULT_FOOTWEAR_COVERAGE: f64 = 25.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoverageEstimate {
    pub body: f64,
    pub extremities: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherFit {
    pub score: f64,
    pub band: Option<WeatherBandKind>,
    pub factors: Vec<ScoringFactor>,
    pub coverage: CoverageEstimate,
}

#[derive(Debug, Clone)]
pub struct WeatherMatcher {
    taxonomy: Arc<WeatherTaxonomy>,
}

impl WeatherMatcher {
    pub fn new(taxonomy: Arc<WeatherTaxonomy>) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &WeatherTaxonomy {
        &self.taxonomy
    }

    pub fn evaluate(&self, candidate: &CandidateOutfit, weather: Option<&WeatherSnapshot>) -> WeatherFit {
        let coverage = estimate_coverage(&candidate.items);
        let Some(weather) = weather else {
            return WeatherFit {
                score: NEUTRAL_WEATHER_SCORE,
                band: None,
                factors: vec![ScoringFactor::new(
                    "weather_unavailable",
                    0.0,
                    "No weather data; scored as weather-agnostic",
                )],
                coverage,
            };
        };

        let band = self.taxonomy.band_for(weather.temperature_c);
        let mut factors = vec![
            self.temperature_factor(&candidate.items, weather.temperature_c),
            material_preference_factor(&candidate.items, band),
            layering_factor(candidate, band),
        ];
        factors.extend(coverage_factors(coverage, band));
        factors.extend(special_condition_factors(&candidate.items, weather));

        let score = NEUTRAL_WEATHER_SCORE + factors.iter().map(|factor| factor.impact).sum::<f64>();
        WeatherFit { score: clamp_score(score), band: Some(band.kind), factors, coverage }
    }

    /// Temperature-material fit impact in [-20, +20]; 0 when no material resolves.
    pub fn temperature_fit(&self, items: &[OutfitItem], temperature_c: f64) -> f64 {
        let profiles: Vec<&MaterialProfile> = items
            .iter()
            .filter_map(|item| item.garment.material.as_deref())
            .filter_map(|material| self.taxonomy.material_for(material))
            .collect();
        if profiles.is_empty() {
            return 0.0;
        }

        let fitting = profiles.iter().filter(|profile| profile.suits(temperature_c)).count();
        40.0 * fitting as f64 / profiles.len() as f64 - 20.0
    }

    fn temperature_factor(&self, items: &[OutfitItem], temperature_c: f64) -> ScoringFactor {
        let impact = self.temperature_fit(items, temperature_c);
        let description = if impact == 0.0 {
            format!("materials are neutral at {temperature_c:.0}°C")
        } else if impact > 0.0 {
            format!("most materials suit {temperature_c:.0}°C")
        } else {
            format!("several materials are out of range at {temperature_c:.0}°C")
        };
        ScoringFactor::new("temperature_fit", impact, description)
    }
}

fn material_text(item: &OutfitItem) -> Option<KeywordText> {
    item.garment.material.as_deref().map(KeywordText::new)
}

fn material_preference_factor(items: &[OutfitItem], band: &WeatherBand) -> ScoringFactor {
    if items.is_empty() {
        return ScoringFactor::new("material_preference", 0.0, "no garments to assess");
    }

    let texts: Vec<KeywordText> = items.iter().filter_map(material_text).collect();
    let preferred = texts.iter().filter(|text| text.contains_any(band.preferred_materials)).count();
    let avoided = texts.iter().filter(|text| text.contains_any(band.avoided_materials)).count();
    let total = items.len() as f64;

    let impact = 20.0 * preferred as f64 / total - 15.0 * avoided as f64 / total;
    ScoringFactor::new(
        "material_preference",
        impact,
        format!("{preferred} preferred and {avoided} avoided material(s) for {} weather", band.kind),
    )
}

fn layering_factor(candidate: &CandidateOutfit, band: &WeatherBand) -> ScoringFactor {
    let missing: Vec<&str> = band
        .required_layers
        .iter()
        .filter(|layer| !candidate.layers.has(layer.slot()))
        .map(|layer| layer.as_str())
        .collect();

    let mut impact = if missing.is_empty() {
        ALL_LAYERS_BONUS
    } else {
        -(MISSING_LAYER_PENALTY * missing.len() as f64)
    };

    let torso = candidate.layers.torso_layer_count();
    let required = band.required_layers.len();
    if torso == required {
        impact += LAYER_COUNT_MATCH;
    } else if torso.abs_diff(required) >= 2 {
        impact -= LAYER_COUNT_MISMATCH;
    }

    let description = if missing.is_empty() {
        format!("{torso} torso layer(s) cover the {} band", band.kind)
    } else {
        format!("missing {} layer for {} weather", missing.join(" and "), band.kind)
    };
    ScoringFactor::new("layering", impact, description)
}

fn coverage_factors(coverage: CoverageEstimate, band: &WeatherBand) -> [ScoringFactor; 2] {
    let impact = |estimate: f64, target: f64| {
        (COVERAGE_BOUND - (estimate - target).abs() / 5.0).clamp(-COVERAGE_BOUND, COVERAGE_BOUND)
    };

    [
        ScoringFactor::new(
            "body_coverage",
            impact(coverage.body, band.body_coverage),
            format!("body coverage {:.0} against target {:.0}", coverage.body, band.body_coverage),
        ),
        ScoringFactor::new(
            "extremity_coverage",
            impact(coverage.extremities, band.extremity_coverage),
            format!(
                "extremity coverage {:.0} against target {:.0}",
                coverage.extremities, band.extremity_coverage
            ),
        ),
    ]
}

fn special_condition_factors(items: &[OutfitItem], weather: &WeatherSnapshot) -> Vec<ScoringFactor> {
    let texts: Vec<KeywordText> =
        items.iter().map(|item| KeywordText::new(&item.garment.descriptive_text())).collect();
    let has_any = |keywords: &[&str]| texts.iter().any(|text| text.contains_any(keywords));

    let mut factors = Vec::new();
    if weather.precipitation_chance >= RAIN_THRESHOLD {
        let covered = has_any(RAIN_GEAR);
        factors.push(ScoringFactor::new(
            "rain_protection",
            if covered { 10.0 } else { -10.0 },
            if covered { "rain-ready piece included" } else { "rain likely and nothing waterproof" },
        ));
    }
    if weather.wind_speed_kmh >= WIND_THRESHOLD_KMH {
        let covered = has_any(WIND_GEAR);
        factors.push(ScoringFactor::new(
            "wind_protection",
            if covered { 5.0 } else { -5.0 },
            if covered { "a shell layer blocks the wind" } else { "windy with no jacket or shell" },
        ));
    }
    if weather.uv_index >= UV_THRESHOLD {
        let covered = has_any(SUN_GEAR);
        factors.push(ScoringFactor::new(
            "sun_protection",
            if covered { 5.0 } else { -5.0 },
            if covered { "sun protection included" } else { "strong UV and no hat or sleeves" },
        ));
    }
    factors
}

pub fn estimate_coverage(items: &[OutfitItem]) -> CoverageEstimate {
    let mut body: f64 = 0.0;
    let mut extremities: f64 = 0.0;
    for item in items {
        let text = KeywordText::new(&item.garment.classification_text());
        body += body_increment(item.category, &text);
        extremities += extremity_increment(item.category, &text);
    }
    CoverageEstimate { body: body.min(100.0), extremities: extremities.min(100.0) }
}

fn body_increment(category: Category, text: &KeywordText) -> f64 {
    match category {
        Category::Top if text.contains_any(SKIMPY_TOPS) => 20.0,
        Category::Top if text.contains_any(LONG_SLEEVE_TOPS) => 45.0,
        Category::Top => 35.0,
        Category::Bottom if text.contains_any(SHORT_BOTTOMS) => 15.0,
        Category::Bottom if text.contains_any(MID_BOTTOMS) => 25.0,
        Category::Bottom => 35.0,
        Category::Layering => 15.0,
        Category::Outerwear if text.contains_any(LONG_OUTERWEAR) => 30.0,
        Category::Outerwear => 20.0,
        Category::Base => 10.0,
        Category::Footwear | Category::Accessory => 0.0,
    }
}

fn extremity_increment(category: Category, text: &KeywordText) -> f64 {
    if !matches!(category, Category::Footwear | Category::Accessory) {
        return 0.0;
    }
    let matched = EXTREMITY_RULES.iter().find(|(keyword, _)| text.contains(keyword)).map(|(_, amount)| *amount);
    match (category, matched) {
        (_, Some(amount)) => amount,
        (Category::Footwear, None) => DEFAULT_FOOTWEAR_COVERAGE,
        _ => 0.0,
    }
}
