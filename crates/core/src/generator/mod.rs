//! Candidate outfit generation: classify, filter, combine.
//!
//! Templates are built independently (in parallel when enabled) and merged in
//! template order, so the result never depends on worker scheduling.

pub mod classify;
pub mod creative;
pub mod filter;
pub mod templates;

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::domain::context::Context;
use crate::domain::garment::{Category, Garment, GarmentId};
use crate::domain::outfit::{CandidateOutfit, CandidateSource, OutfitItem};
use crate::taxonomy::{ColorModel, WeatherTaxonomy};

pub use classify::{classify, classify_all, CategorizedWardrobe};
pub use creative::{CreativeSettings, RandomnessMode};
pub use filter::{apply_hard_filters, Exclusion, ExclusionReason};
pub use templates::{applicable_templates, OutfitTemplate, TemplateGate, TEMPLATES};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_MAX_CANDIDATES: usize = 20;
pub const DEFAULT_PER_BUCKET_TRIES: usize = 3;
pub const DEFAULT_TEMPLATE_CAP: usize = 6;
pub const DEFAULT_CREATIVE_CANDIDATES: usize = 3;
pub const DEFAULT_CREATIVE_RETRY_BUDGET: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_candidates: usize,
    pub per_bucket_tries: usize,
    pub template_cap: usize,
    pub creative_candidates: usize,
    pub creative_retry_budget: usize,
    pub randomness: RandomnessMode,
    pub parallel: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            per_bucket_tries: DEFAULT_PER_BUCKET_TRIES,
            template_cap: DEFAULT_TEMPLATE_CAP,
            creative_candidates: DEFAULT_CREATIVE_CANDIDATES,
            creative_retry_budget: DEFAULT_CREATIVE_RETRY_BUDGET,
            randomness: RandomnessMode::Seeded(DEFAULT_SEED),
            parallel: true,
        }
    }
}

impl GenerationSettings {
    pub fn with_randomness(mut self, randomness: RandomnessMode) -> Self {
        self.randomness = randomness;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationOutcome {
    pub candidates: Vec<CandidateOutfit>,
    pub excluded: Vec<Exclusion>,
    /// Garments that entered classification.
    pub considered: usize,
}

#[derive(Debug, Clone)]
pub struct CombinationGenerator {
    colors: Arc<ColorModel>,
    weather: Arc<WeatherTaxonomy>,
    settings: GenerationSettings,
}

impl CombinationGenerator {
    pub fn new(colors: Arc<ColorModel>, weather: Arc<WeatherTaxonomy>, settings: GenerationSettings) -> Self {
        Self { colors, weather, settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn generate(&self, garments: &[Garment], context: &Context) -> GenerationOutcome {
        let (kept, excluded) = apply_hard_filters(classify_all(garments), context);
        debug!(
            event_name = "engine.generate.filtered",
            considered = garments.len(),
            kept = kept.len(),
            excluded = excluded.len(),
            "hard filters applied"
        );
        let wardrobe = CategorizedWardrobe::from_items(kept);

        let templates = applicable_templates(context);
        let per_template: Vec<Vec<CandidateOutfit>> = if self.settings.parallel {
            templates.par_iter().map(|template| self.build_template(template, &wardrobe)).collect()
        } else {
            templates.iter().map(|template| self.build_template(template, &wardrobe)).collect()
        };

        let mut seen: HashSet<BTreeSet<GarmentId>> = HashSet::new();
        let mut candidates: Vec<CandidateOutfit> = per_template
            .into_iter()
            .flatten()
            .filter(|candidate| seen.insert(candidate.garment_key()))
            .collect();

        if let Some(mut rng) = self.settings.randomness.rng() {
            candidates.truncate(self.settings.max_candidates.saturating_sub(self.settings.creative_candidates));
            let band = context.temperature().map(|temperature| self.weather.band_for(temperature));
            if let Some(core) = creative::select_core_item(&wardrobe, context, band, &self.colors) {
                let settings = CreativeSettings {
                    attempts: self.settings.creative_candidates,
                    retry_budget: self.settings.creative_retry_budget,
                };
                candidates.extend(
                    creative::creative_candidates(core, &wardrobe, settings, &mut rng)
                        .into_iter()
                        .filter(|candidate| seen.insert(candidate.garment_key())),
                );
            }
        }

        let required = &context.constraints.required_categories;
        candidates.retain(|candidate| required.iter().all(|category| candidate.has_category(*category)));
        candidates.truncate(self.settings.max_candidates);

        GenerationOutcome { candidates, excluded, considered: garments.len() }
    }

    fn build_template(&self, template: &OutfitTemplate, wardrobe: &CategorizedWardrobe) -> Vec<CandidateOutfit> {
        if template.required.iter().any(|category| wardrobe.bucket(*category).is_empty()) {
            return Vec::new();
        }

        let slots = template.slots();
        let mut results = Vec::new();
        let mut current = Vec::with_capacity(slots.len());
        self.extend_slot(template, wardrobe, &slots, 0, &mut current, &mut results);
        results
    }

    fn extend_slot(
        &self,
        template: &OutfitTemplate,
        wardrobe: &CategorizedWardrobe,
        slots: &[(Category, bool)],
        index: usize,
        current: &mut Vec<OutfitItem>,
        results: &mut Vec<CandidateOutfit>,
    ) {
        if results.len() >= self.settings.template_cap {
            return;
        }
        let Some((category, required)) = slots.get(index).copied() else {
            if !current.is_empty() {
                let source = CandidateSource::Template { name: template.name.to_owned() };
                results.push(CandidateOutfit::assemble(current.clone(), source));
            }
            return;
        };

        for item in wardrobe.bucket(category).iter().take(self.settings.per_bucket_tries) {
            if results.len() >= self.settings.template_cap {
                return;
            }
            if !is_compatible_extension(current, item) {
                continue;
            }
            current.push(item.clone());
            self.extend_slot(template, wardrobe, slots, index + 1, current, results);
            current.pop();
        }

        if !required {
            self.extend_slot(template, wardrobe, slots, index + 1, current, results);
        }
    }
}

/// An item may join a partial outfit when it is new, does not duplicate a
/// single-slot category, and its occasion pairs with every occasion present.
pub(crate) fn is_compatible_extension(current: &[OutfitItem], candidate: &OutfitItem) -> bool {
    if current.iter().any(|item| item.garment.id == candidate.garment.id) {
        return false;
    }
    if !candidate.category.allows_duplicates() && current.iter().any(|item| item.category == candidate.category) {
        return false;
    }
    match candidate.garment.occasion {
        Some(occasion) => current
            .iter()
            .filter_map(|item| item.garment.occasion)
            .all(|other| occasion.compatible_with(other)),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::{CombinationGenerator, GenerationSettings, RandomnessMode};
    use crate::domain::context::{Context, HardConstraints};
    use crate::domain::garment::{Category, Garment, Occasion};
    use crate::domain::outfit::CandidateSource;
    use crate::taxonomy::{ColorModel, WeatherTaxonomy};

    fn generator(settings: GenerationSettings) -> CombinationGenerator {
        CombinationGenerator::new(Arc::new(ColorModel::standard()), Arc::new(WeatherTaxonomy::standard()), settings)
    }

    fn wardrobe() -> Vec<Garment> {
        vec![
            Garment::new("t1", "White tee", "tops").with_color("white"),
            Garment::new("t2", "Oxford shirt", "tops").with_color("sky blue").with_occasion(Occasion::Work),
            Garment::new("t3", "Striped top", "tops").with_color("navy"),
            Garment::new("t4", "Silk blouse", "tops").with_color("ivory").with_occasion(Occasion::Formal),
            Garment::new("b1", "Jeans", "bottoms").with_color("denim"),
            Garment::new("b2", "Chinos", "bottoms").with_color("khaki"),
            Garment::new("b3", "Gym shorts", "bottoms").with_color("black").with_occasion(Occasion::Sport),
            Garment::new("l1", "Grey cardigan", "layering").with_color("gray"),
            Garment::new("o1", "Wool coat", "outerwear").with_color("camel").with_material("wool"),
            Garment::new("f1", "White sneakers", "shoes").with_color("white"),
            Garment::new("f2", "Loafers", "shoes").with_color("brown"),
            Garment::new("a1", "Leather belt", "accessories").with_color("brown"),
        ]
    }

    #[test]
    fn candidates_never_repeat_single_slot_categories() {
        let outcome = generator(GenerationSettings::default()).generate(&wardrobe(), &Context::new().with_temperature(10.0));
        assert!(!outcome.candidates.is_empty());
        for candidate in &outcome.candidates {
            for category in Category::ALL.into_iter().filter(|category| !category.allows_duplicates()) {
                assert!(candidate.categories().filter(|own| *own == category).count() <= 1);
            }
        }
    }

    #[test]
    fn candidates_are_unique_and_capped() {
        let settings = GenerationSettings::default();
        let outcome = generator(settings).generate(&wardrobe(), &Context::new().with_temperature(10.0));
        assert!(outcome.candidates.len() <= settings.max_candidates);
        let keys: HashSet<_> = outcome.candidates.iter().map(|candidate| candidate.garment_key()).collect();
        assert_eq!(keys.len(), outcome.candidates.len());
    }

    #[test]
    fn incompatible_occasions_never_share_a_candidate() {
        let outcome = generator(GenerationSettings::default()).generate(&wardrobe(), &Context::new());
        for candidate in &outcome.candidates {
            let occasions: Vec<Occasion> = candidate.garments().filter_map(|garment| garment.occasion).collect();
            for (i, left) in occasions.iter().enumerate() {
                for right in &occasions[i + 1..] {
                    assert!(left.compatible_with(*right), "{left} with {right}");
                }
            }
        }
    }

    #[test]
    fn parallel_and_sequential_generation_agree() {
        let context = Context::new().with_temperature(12.0).with_occasion(Occasion::Work);
        let parallel = generator(GenerationSettings::default()).generate(&wardrobe(), &context);
        let sequential = generator(GenerationSettings::default().with_parallel(false)).generate(&wardrobe(), &context);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn disabled_randomness_skips_creative_branch() {
        let settings = GenerationSettings::default().with_randomness(RandomnessMode::Disabled);
        let outcome = generator(settings).generate(&wardrobe(), &Context::new());
        assert!(!outcome.candidates.is_empty());
        assert!(outcome
            .candidates
            .iter()
            .all(|candidate| matches!(candidate.source, CandidateSource::Template { .. })));
    }

    #[test]
    fn required_categories_filter_candidates() {
        let context = Context::new().with_constraints(HardConstraints {
            required_categories: vec![Category::Accessory],
            ..HardConstraints::default()
        });
        let outcome = generator(GenerationSettings::default()).generate(&wardrobe(), &context);
        assert!(!outcome.candidates.is_empty());
        assert!(outcome.candidates.iter().all(|candidate| candidate.has_category(Category::Accessory)));
    }

    #[test]
    fn empty_required_bucket_yields_no_template_candidates() {
        let garments = vec![Garment::new("t", "Tee", "tops")];
        let settings = GenerationSettings::default().with_randomness(RandomnessMode::Disabled);
        let outcome = generator(settings).generate(&garments, &Context::new());
        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.considered, 1);
    }
}
