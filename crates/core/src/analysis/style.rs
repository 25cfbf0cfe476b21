//! Archetype classification and style consistency.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::outfit::{clamp_score, OutfitItem, ScoringFactor};
use crate::taxonomy::style::DEFAULT_FORMALITY;
use crate::taxonomy::{Archetype, BrandTier, ColorModel, KeywordText, StyleArchetype, StyleTaxonomy};

const CATEGORY_PREFERRED: f64 = 80.0;
const CATEGORY_AVOIDED: f64 = 20.0;
const COLOR_IN_PALETTE: f64 = 85.0;
const COLOR_OFF_PALETTE: f64 = 40.0;
const UNKNOWN_ALIGNMENT: f64 = 50.0;
const SECONDARY_THRESHOLD: f64 = 0.7;

const EXPERIMENTAL_KEYWORDS: &[&str] = &[
    "bold",
    "experimental",
    "avant garde",
    "statement",
    "asymmetric",
    "deconstructed",
    "sculptural",
    "neon",
    "metallic",
];
const UNCONVENTIONAL_COLORS: &[&str] = &["fuchsia", "lime", "turquoise", "coral", "mustard", "lavender"];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyWeights {
    pub confidence: f64,
    pub brand_homogeneity: f64,
    pub palette_adherence: f64,
    pub category_overlap: f64,
}

pub const DEFAULT_CONSISTENCY_WEIGHTS: ConsistencyWeights = ConsistencyWeights {
    confidence: 0.40,
    brand_homogeneity: 0.20,
    palette_adherence: 0.25,
    category_overlap: 0.15,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    pub primary: Archetype,
    pub primary_score: f64,
    pub secondary: Option<Archetype>,
    pub secondary_score: Option<f64>,
    pub confidence: f64,
    /// Aggregate per archetype, in `Archetype::ALL` order.
    pub archetype_scores: Vec<(Archetype, f64)>,
    pub experimentalness: f64,
    pub formality: f64,
    pub colorfulness: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleConsistency {
    pub score: f64,
    pub factors: Vec<ScoringFactor>,
}

#[derive(Debug, Clone)]
pub struct StyleAnalyzer {
    taxonomy: Arc<StyleTaxonomy>,
    colors: Arc<ColorModel>,
}

impl StyleAnalyzer {
    pub fn new(taxonomy: Arc<StyleTaxonomy>, colors: Arc<ColorModel>) -> Self {
        Self { taxonomy, colors }
    }

    pub fn classify(&self, items: &[OutfitItem]) -> StyleProfile {
        let archetype_scores: Vec<(Archetype, f64)> = self
            .taxonomy
            .archetypes()
            .map(|definition| (definition.archetype, self.archetype_score(definition, items)))
            .collect();

        let mut primary = (Archetype::ALL[0], f64::MIN);
        for (archetype, score) in &archetype_scores {
            if *score > primary.1 {
                primary = (*archetype, *score);
            }
        }

        let mut runner_up: Option<(Archetype, f64)> = None;
        for (archetype, score) in &archetype_scores {
            if *archetype == primary.0 {
                continue;
            }
            if runner_up.map(|(_, best)| *score > best).unwrap_or(true) {
                runner_up = Some((*archetype, *score));
            }
        }
        let secondary = runner_up.filter(|(_, score)| *score >= primary.1 * SECONDARY_THRESHOLD);

        let mean = archetype_scores.iter().map(|(_, score)| score).sum::<f64>()
            / archetype_scores.len().max(1) as f64;

        StyleProfile {
            primary: primary.0,
            primary_score: primary.1,
            secondary: secondary.map(|(archetype, _)| archetype),
            secondary_score: secondary.map(|(_, score)| score),
            confidence: clamp_score(50.0 + (primary.1 - mean)),
            archetype_scores,
            experimentalness: self.experimentalness(items),
            formality: self.formality(items),
            colorfulness: self.colorfulness(items),
        }
    }

    pub fn consistency(&self, items: &[OutfitItem], profile: &StyleProfile) -> StyleConsistency {
        let weights = DEFAULT_CONSISTENCY_WEIGHTS;
        let primary = self.taxonomy.archetype(profile.primary);

        let brand = self.brand_homogeneity(items);
        let palette = self.palette_adherence(items, primary);
        let overlap = category_overlap(items, primary);

        let factors = vec![
            ScoringFactor::new(
                "style_confidence",
                weights.confidence * profile.confidence,
                format!("{} reads with {:.0}% confidence", profile.primary, profile.confidence),
            ),
            ScoringFactor::new(
                "brand_homogeneity",
                weights.brand_homogeneity * brand,
                format!("brand tiers agree at {brand:.0}%"),
            ),
            ScoringFactor::new(
                "palette_adherence",
                weights.palette_adherence * palette,
                format!("{palette:.0}% of colors sit in the {} palette", profile.primary),
            ),
            ScoringFactor::new(
                "category_overlap",
                weights.category_overlap * overlap,
                format!("{overlap:.0}% of pieces are typical {} pieces", profile.primary),
            ),
        ];

        let score = factors.iter().map(|factor| factor.impact).sum::<f64>();
        StyleConsistency { score: clamp_score(score), factors }
    }

    fn archetype_score(&self, definition: &StyleArchetype, items: &[OutfitItem]) -> f64 {
        let mut weighted = 0.0;
        let mut total_weight = 0.0;
        for item in items {
            let weight = self.taxonomy.category_weight(item.category);
            weighted += weight * self.garment_score(definition, item);
            total_weight += weight;
        }

        if total_weight == 0.0 {
            UNKNOWN_ALIGNMENT
        } else {
            weighted / total_weight
        }
    }

    fn garment_score(&self, definition: &StyleArchetype, item: &OutfitItem) -> f64 {
        let text = KeywordText::new(&item.garment.classification_text());
        let category = if text.contains_any(definition.preferred_categories) {
            CATEGORY_PREFERRED
        } else if text.contains_any(definition.avoided_categories) {
            CATEGORY_AVOIDED
        } else {
            UNKNOWN_ALIGNMENT
        };

        let color = match self.garment_color(item) {
            Some(name) if definition.palette_contains(name) => COLOR_IN_PALETTE,
            Some(_) => COLOR_OFF_PALETTE,
            None => UNKNOWN_ALIGNMENT,
        };

        let brand = self
            .brand_tier(item)
            .map(|tier| definition.brand_bonus(tier))
            .unwrap_or(UNKNOWN_ALIGNMENT);

        0.5 * category + 0.3 * color + 0.2 * brand
    }

    fn garment_color(&self, item: &OutfitItem) -> Option<&'static str> {
        item.garment.color.as_deref().and_then(|raw| self.colors.normalize(raw))
    }

    fn brand_tier(&self, item: &OutfitItem) -> Option<BrandTier> {
        item.garment.brand.as_deref().and_then(|brand| self.taxonomy.brand_tier(brand))
    }

    fn experimentalness(&self, items: &[OutfitItem]) -> f64 {
        if items.is_empty() {
            return 0.0;
        }

        let hits: usize = items
            .iter()
            .map(|item| {
                let text = KeywordText::new(&item.garment.descriptive_text());
                let color_hit = self
                    .garment_color(item)
                    .map(|name| usize::from(UNCONVENTIONAL_COLORS.contains(&name)))
                    .unwrap_or(0);
                text.count_matches(EXPERIMENTAL_KEYWORDS) + color_hit
            })
            .sum();

        clamp_score(hits as f64 / items.len() as f64 * 50.0)
    }

    fn formality(&self, items: &[OutfitItem]) -> f64 {
        let mut weighted = 0.0;
        let mut total_weight = 0.0;
        for item in items {
            let text = KeywordText::new(&item.garment.classification_text());
            let formality = self
                .taxonomy
                .formality_keywords()
                .iter()
                .find(|(keyword, _)| text.contains(keyword))
                .map(|(_, score)| *score)
                .unwrap_or(DEFAULT_FORMALITY);
            let weight = self.taxonomy.category_weight(item.category);
            weighted += weight * formality;
            total_weight += weight;
        }

        if total_weight == 0.0 {
            DEFAULT_FORMALITY
        } else {
            weighted / total_weight
        }
    }

    fn colorfulness(&self, items: &[OutfitItem]) -> f64 {
        if items.is_empty() {
            return 0.0;
        }
        let colorful = items
            .iter()
            .filter(|item| self.garment_color(item).map(|name| !self.colors.is_neutral(name)).unwrap_or(false))
            .count();
        colorful as f64 / items.len() as f64 * 100.0
    }

    fn brand_homogeneity(&self, items: &[OutfitItem]) -> f64 {
        let mut counts: HashMap<BrandTier, usize> = HashMap::new();
        for tier in items.iter().filter_map(|item| self.brand_tier(item)) {
            *counts.entry(tier).or_default() += 1;
        }

        let total: usize = counts.values().sum();
        match counts.values().max() {
            Some(most_common) if total > 0 => *most_common as f64 / total as f64 * 100.0,
            _ => UNKNOWN_ALIGNMENT,
        }
    }

    fn palette_adherence(&self, items: &[OutfitItem], primary: &StyleArchetype) -> f64 {
        let colors: Vec<&'static str> = items.iter().filter_map(|item| self.garment_color(item)).collect();
        if colors.is_empty() {
            return UNKNOWN_ALIGNMENT;
        }
        let inside = colors.iter().filter(|name| primary.palette_contains(name)).count();
        inside as f64 / colors.len() as f64 * 100.0
    }
}

fn category_overlap(items: &[OutfitItem], primary: &StyleArchetype) -> f64 {
    if items.is_empty() {
        return UNKNOWN_ALIGNMENT;
    }
    let overlapping = items
        .iter()
        .filter(|item| {
            KeywordText::new(&item.garment.classification_text()).contains_any(primary.preferred_categories)
        })
        .count();
    overlapping as f64 / items.len() as f64 * 100.0
}
