//! Enrichment of the winning outfit: naming, tips, insights, and confidence.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::types::{
    AlternativeSummary, ConfidenceLevel, ConfidenceReport, ScoredCandidate, SubScores, TemperatureRange,
};
use crate::analysis::{ColorHarmonyAnalyzer, ContrastTier};
use crate::domain::context::{Context, TimeOfDay};
use crate::domain::garment::{Category, Occasion};
use crate::domain::outfit::{CandidateOutfit, LayerSlot};
use crate::taxonomy::{KeywordText, Taxonomy, WeatherBandKind};

/// Garments not worn for this many days are called out as rediscoveries.
pub const STALE_AFTER_DAYS: i64 = 30;
const LOW_SCORE: f64 = 60.0;
const MAX_TIPS: usize = 5;

const WARM_MATERIALS: &[&str] = &["wool", "down", "fleece", "cashmere", "thermal", "flannel", "tweed", "sherpa"];
const COOL_MATERIALS: &[&str] = &["linen", "mesh", "bamboo", "chambray", "silk", "seersucker"];
const BASE_RANGE: TemperatureRange = TemperatureRange { min_c: 15.0, max_c: 25.0 };

fn occasion_phrases(occasion: Option<Occasion>) -> &'static [&'static str] {
    match occasion {
        Some(Occasion::Casual) => &["Easygoing Edit", "Weekend Ease", "Off-Duty Mix"],
        Some(Occasion::Work) => &["Boardroom Ready", "Desk-to-Meeting", "Sharp Workday"],
        Some(Occasion::Formal) => &["Black-Tie Poise", "Evening Formal", "Grand Occasion"],
        Some(Occasion::Party) => &["Night-Out Spark", "Party Statement", "After-Dark Edit"],
        Some(Occasion::Date) => &["Date-Night Charm", "Dinner for Two", "Romantic Pairing"],
        Some(Occasion::Sport) => &["Active Motion", "Training Day", "Game-Ready Kit"],
        Some(Occasion::Outdoor) => &["Trail-Ready Layers", "Open-Air Explorer", "Fresh-Air Edit"],
        Some(Occasion::Lounge) => &["Slow-Day Comfort", "Homebody Edit", "Soft Landing"],
        Some(Occasion::Versatile) | None => &["Everyday Signature", "Go-Anywhere Mix", "Daily Uniform"],
    }
}

fn time_phrases(time_of_day: Option<TimeOfDay>) -> &'static [&'static str] {
    match time_of_day {
        Some(TimeOfDay::Morning) => &["Sunrise", "Early", "Morning"],
        Some(TimeOfDay::Afternoon) => &["Midday", "Afternoon", "Sunlit"],
        Some(TimeOfDay::Evening) => &["Twilight", "Evening", "Dusk"],
        Some(TimeOfDay::Night) => &["Midnight", "Late-Night", "Moonlit"],
        None => &["All-Day", "Anytime", "Signature"],
    }
}

#[derive(Debug, Clone)]
pub struct OutfitExplainer {
    taxonomy: Taxonomy,
    colors: ColorHarmonyAnalyzer,
}

impl OutfitExplainer {
    pub fn new(taxonomy: Taxonomy) -> Self {
        let colors = ColorHarmonyAnalyzer::new(taxonomy.colors.clone());
        Self { taxonomy, colors }
    }

    /// Deterministic for a given seed and garment set.
    pub fn name(&self, candidate: &CandidateOutfit, context: &Context, seed: u64) -> String {
        let mut rng = StdRng::seed_from_u64(seed ^ (candidate.id.as_u128() as u64));
        let time = time_phrases(context.time_of_day).choose(&mut rng).copied().unwrap_or("Signature");
        let occasion = occasion_phrases(context.occasion).choose(&mut rng).copied().unwrap_or("Edit");
        format!("{time} {occasion}")
    }

    pub fn layering_strategy(&self, candidate: &CandidateOutfit) -> String {
        self.taxonomy.weather.layering_strategy(candidate.layers.torso_layer_count()).to_owned()
    }

    pub fn styling_tips(&self, scored: &ScoredCandidate, context: &Context) -> Vec<String> {
        let candidate = &scored.candidate;
        let analysis = &scored.analysis;
        let palette = &analysis.color.palette;
        let mut tips = Vec::new();

        if analysis.color.has_factor("complementary") {
            tips.push("The complementary pairing is the focal point; keep accessories neutral.".to_owned());
        } else if palette.accents.is_empty() && !palette.neutrals.is_empty() {
            tips.push("An all-neutral palette reads polished; add texture or one accent accessory for depth.".to_owned());
        } else if palette.accents.len() >= 3 {
            tips.push("Let one accent color lead and keep the others to smaller pieces.".to_owned());
        }

        if palette.contrast == ContrastTier::High {
            tips.push("High contrast draws the eye; keep silhouettes simple.".to_owned());
        }

        if !candidate.has_category(Category::Footwear) {
            let color = palette.dominant.as_deref().unwrap_or("a neutral tone");
            tips.push(format!("Finish with footwear that echoes {color}."));
        }

        if !candidate.layers.has(LayerSlot::Accessories)
            && matches!(context.occasion, Some(Occasion::Formal | Occasion::Party | Occasion::Date))
        {
            tips.push("A refined accessory would complete the look.".to_owned());
        }

        if context.occasion == Some(Occasion::Formal) && analysis.style.formality < 50.0 {
            tips.push("The pieces read relaxed for a formal setting; a tailored layer would elevate them.".to_owned());
        }

        match analysis.weather.band {
            Some(WeatherBandKind::Freezing | WeatherBandKind::Cold) => {
                tips.push("Layer thin to thick so the outer shell closes cleanly over the middle layer.".to_owned())
            }
            Some(WeatherBandKind::Warm | WeatherBandKind::Hot) => {
                tips.push("Favor looser fits to keep air moving.".to_owned())
            }
            _ => {}
        }

        if context.weather.as_ref().map(|weather| weather.precipitation_chance >= 50.0).unwrap_or(false) {
            tips.push("Rain is likely; choose water-resistant footwear.".to_owned());
        }

        if tips.is_empty() {
            tips.push(format!("Keep the {} mood consistent down to the accessories.", analysis.style.primary));
        }
        tips.truncate(MAX_TIPS);
        tips
    }

    /// Comfortable range shifted by warm or cool materials and by layers.
    pub fn weather_range(&self, candidate: &CandidateOutfit) -> TemperatureRange {
        let mut range = BASE_RANGE;
        for material in candidate.garments().filter_map(|garment| garment.material.as_deref()) {
            let text = KeywordText::new(material);
            if text.contains_any(WARM_MATERIALS) {
                range.min_c -= 5.0;
                range.max_c -= 3.0;
            } else if text.contains_any(COOL_MATERIALS) {
                range.min_c += 3.0;
                range.max_c += 5.0;
            }
        }
        if candidate.has_category(Category::Outerwear) {
            range.min_c -= 8.0;
        }
        if candidate.has_category(Category::Layering) {
            range.min_c -= 4.0;
        }
        if range.max_c - range.min_c < 5.0 {
            range.max_c = range.min_c + 5.0;
        }
        range
    }

    pub fn insights(&self, scored: &ScoredCandidate, context: &Context) -> Vec<String> {
        let candidate = &scored.candidate;
        let preferences = &context.preferences;
        let mut insights = Vec::new();

        let favorites: Vec<&str> =
            candidate.garments().filter(|garment| garment.favorite).map(|garment| garment.name.as_str()).collect();
        if !favorites.is_empty() {
            insights.push(format!("Features your favorite {}.", favorites.join(" and ")));
        }

        let favorite_colors: Vec<&'static str> =
            preferences.favorite_colors.iter().filter_map(|raw| self.taxonomy.colors.normalize(raw)).collect();
        let used: Vec<&String> =
            scored.analysis.color.colors.iter().filter(|name| favorite_colors.iter().any(|fav| *fav == name.as_str())).collect();
        if let Some(color) = used.first() {
            insights.push(format!("Uses {color}, one of your favorite colors."));
        }

        let brands: Vec<&str> = candidate
            .garments()
            .filter_map(|garment| garment.brand.as_deref())
            .filter(|brand| preferences.prefers_brand(brand))
            .collect();
        if !brands.is_empty() {
            insights.push(format!("Includes pieces from {}, a brand you prefer.", brands.join(", ")));
        }

        let primary = scored.analysis.style.primary;
        match preferences.style_hint {
            Some(hint) if hint == primary => insights.push(format!("Matches your {hint} style.")),
            Some(hint) => insights.push(format!(
                "Leans {primary} rather than your usual {hint}, a chance to experiment."
            )),
            None => {}
        }

        if let Some(as_of) = context.as_of {
            for garment in candidate.garments() {
                if let Some(last_worn) = garment.last_worn {
                    let days = (as_of - last_worn).num_days();
                    if days >= STALE_AFTER_DAYS {
                        insights.push(format!("Brings back {}, unworn for {days} days.", garment.name));
                    }
                }
            }
        }

        let active = preferences
            .lifestyle
            .iter()
            .any(|entry| KeywordText::new(entry).contains_any(&["active", "commute", "commuter", "walking"]));
        if active && scored.scores.comfort >= 70.0 {
            insights.push("Comfortable enough for an active day on your feet.".to_owned());
        }

        insights
    }

    pub fn improvements(&self, scored: &ScoredCandidate, context: &Context) -> Vec<String> {
        let scores = &scored.scores;
        let analysis = &scored.analysis;
        let mut improvements = Vec::new();

        if scores.color_harmony < LOW_SCORE {
            let suggestions = self.colors.suggest(&analysis.color.colors);
            improvements.push(format!(
                "Color harmony is low; try swapping a piece for {}.",
                suggestions.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
            ));
        }

        if scores.style < LOW_SCORE {
            match analysis.style.secondary {
                Some(secondary) => improvements.push(format!(
                    "The look splits between {} and {secondary}; lean into one direction.",
                    analysis.style.primary
                )),
                None => {
                    let definition = self.taxonomy.styles.archetype(analysis.style.primary);
                    let cues = definition.keywords.iter().take(3).copied().collect::<Vec<_>>().join(", ");
                    let materials = definition.preferred_materials.iter().take(2).copied().collect::<Vec<_>>().join(" or ");
                    improvements.push(format!(
                        "Pick pieces that read {}: think {cues} in {materials}.",
                        analysis.style.primary
                    ))
                }
            }
        }

        if scores.weather < LOW_SCORE {
            let weakest = analysis
                .weather
                .factors
                .iter()
                .filter(|factor| factor.impact < 0.0)
                .min_by(|a, b| a.impact.partial_cmp(&b.impact).unwrap_or(std::cmp::Ordering::Equal));
            match weakest {
                Some(factor) => improvements.push(format!("Weather fit suffers: {}.", factor.description)),
                None => improvements.push("Adjust layers for the forecast.".to_owned()),
            }
        }

        if scores.occasion < LOW_SCORE {
            if let Some(occasion) = context.occasion {
                improvements.push(format!("Some pieces lean away from {occasion}; swap them for {occasion} staples."));
            }
        }

        if scores.comfort < 50.0 {
            improvements.push("Trade a restrictive piece for something with stretch or a relaxed cut.".to_owned());
        }

        improvements
    }

    pub fn confidence(&self, scored: &ScoredCandidate, context: &Context, candidates_evaluated: usize) -> ConfidenceReport {
        let candidate = &scored.candidate;

        let data_quality = if candidate.is_empty() {
            0.0
        } else {
            candidate
                .garments()
                .map(|garment| {
                    let color = garment.color.as_deref().and_then(|raw| self.taxonomy.colors.normalize(raw)).is_some();
                    let material = garment
                        .material
                        .as_deref()
                        .and_then(|raw| self.taxonomy.weather.material_for(raw))
                        .is_some();
                    50.0 * f64::from(u8::from(color)) + 50.0 * f64::from(u8::from(material))
                })
                .sum::<f64>()
                / candidate.len() as f64
        };

        let preferences = &context.preferences;
        let personalization = (40.0
            + 20.0 * f64::from(u8::from(!preferences.favorite_colors.is_empty()))
            + 20.0 * f64::from(u8::from(!preferences.preferred_brands.is_empty()))
            + 20.0 * f64::from(u8::from(preferences.style_hint.is_some())))
        .min(100.0);

        let seasonal_relevance = match context.season {
            Some(season) if candidate.garments().all(|garment| garment.suits_season(season)) => 90.0,
            Some(_) => 50.0,
            None => 70.0,
        };

        let score = 0.7 * scored.composite + 0.1 * (data_quality + personalization + seasonal_relevance);

        let mut notes = Vec::new();
        if context.weather.is_none() {
            notes.push("Weather data unavailable; weather fit is neutral.".to_owned());
        }
        if candidates_evaluated < 3 {
            notes.push(format!("Only {candidates_evaluated} combination(s) could be evaluated."));
        }
        if data_quality < 50.0 {
            notes.push("Many pieces lack a recognizable color or material.".to_owned());
        }
        if preferences.favorite_colors.is_empty() {
            notes.push("Personal color alignment uses a baseline without favorite colors.".to_owned());
        }
        notes.push("Trendiness is a fixed baseline, not a trend signal.".to_owned());

        ConfidenceReport {
            score,
            level: ConfidenceLevel::from_score(score),
            composite: scored.composite,
            data_quality,
            personalization,
            seasonal_relevance,
            notes,
        }
    }

    pub fn alternative(&self, runner_up: &ScoredCandidate, winner: &ScoredCandidate) -> AlternativeSummary {
        AlternativeSummary {
            outfit_id: runner_up.candidate.id,
            garment_ids: runner_up.candidate.garments().map(|garment| garment.id.clone()).collect(),
            composite_score: runner_up.composite,
            source: runner_up.candidate.source.label(),
            standout: standout(&runner_up.scores, &winner.scores),
        }
    }
}

/// Sub-score with the largest lead of `runner_up` over `winner`.
fn standout(runner_up: &SubScores, winner: &SubScores) -> Option<String> {
    [
        ("style", runner_up.style - winner.style),
        ("color harmony", runner_up.color_harmony - winner.color_harmony),
        ("weather", runner_up.weather - winner.weather),
        ("occasion", runner_up.occasion - winner.occasion),
        ("comfort", runner_up.comfort - winner.comfort),
        ("sustainability", runner_up.sustainability - winner.sustainability),
    ]
    .into_iter()
    .filter(|(_, lead)| *lead > 0.0)
    .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    .map(|(name, lead)| format!("stronger {name} (+{lead:.0})"))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{standout, OutfitExplainer, MAX_TIPS, STALE_AFTER_DAYS};
    use crate::analysis::ContrastTier;
    use crate::domain::context::{Context, TimeOfDay, UserPreferences, WeatherSnapshot};
    use crate::domain::garment::{Category, Garment, Occasion, Season};
    use crate::domain::outfit::{CandidateOutfit, CandidateSource, OutfitItem, ScoringFactor};
    use crate::recommendation::types::{ConfidenceLevel, ScoredCandidate, SubScores};
    use crate::recommendation::OutfitEngine;
    use crate::taxonomy::{Archetype, Taxonomy, WeatherBandKind};

    fn candidate(items: Vec<(Category, Garment)>) -> CandidateOutfit {
        CandidateOutfit::assemble(
            items.into_iter().map(|(category, garment)| OutfitItem { category, garment }).collect(),
            CandidateSource::Template { name: "basic".to_owned() },
        )
    }

    fn scored(items: Vec<(Category, Garment)>, context: &Context) -> ScoredCandidate {
        OutfitEngine::new().analyze_candidate(&candidate(items), context)
    }

    fn tee_and_jeans() -> Vec<(Category, Garment)> {
        vec![
            (Category::Top, Garment::new("t", "Cotton tee", "tops").with_color("white").with_material("cotton")),
            (Category::Bottom, Garment::new("b", "Jeans", "bottoms").with_color("navy").with_material("denim")),
        ]
    }

    fn all_high(scored: &mut ScoredCandidate) {
        scored.scores = SubScores {
            style: 100.0,
            color_harmony: 100.0,
            weather: 100.0,
            occasion: 100.0,
            comfort: 100.0,
            sustainability: 100.0,
            trendiness: 60.0,
            versatility: 100.0,
        };
    }

    #[test]
    fn names_are_deterministic_for_a_seed() {
        let explainer = OutfitExplainer::new(Taxonomy::standard());
        let outfit = candidate(vec![
            (Category::Top, Garment::new("t", "Tee", "top")),
            (Category::Bottom, Garment::new("b", "Jeans", "bottom")),
        ]);
        let context = Context::new().with_occasion(Occasion::Work).with_time_of_day(TimeOfDay::Morning);

        let first = explainer.name(&outfit, &context, 42);
        assert_eq!(first, explainer.name(&outfit, &context, 42));
        let (time, rest) = first.split_once(' ').expect("two-part name");
        assert!(["Sunrise", "Early", "Morning"].contains(&time));
        assert!(["Boardroom Ready", "Desk-to-Meeting", "Sharp Workday"].contains(&rest));
    }

    #[test]
    fn weather_range_shifts_with_materials_and_layers() {
        let explainer = OutfitExplainer::new(Taxonomy::standard());
        let warm = candidate(vec![
            (Category::Top, Garment::new("t", "Sweater", "top").with_material("wool")),
            (Category::Outerwear, Garment::new("o", "Coat", "outerwear")),
        ]);
        let range = explainer.weather_range(&warm);
        assert_eq!(range.min_c, 2.0);
        assert_eq!(range.max_c, 22.0);

        let cool = candidate(vec![(Category::Top, Garment::new("t", "Shirt", "top").with_material("linen"))]);
        let range = explainer.weather_range(&cool);
        assert_eq!((range.min_c, range.max_c), (18.0, 30.0));
    }

    #[test]
    fn standout_names_largest_lead() {
        let winner = SubScores { style: 80.0, weather: 50.0, ..SubScores::default() };
        let runner_up = SubScores { style: 70.0, weather: 65.0, comfort: 5.0, ..SubScores::default() };
        assert_eq!(standout(&runner_up, &winner).as_deref(), Some("stronger weather (+15)"));
        assert_eq!(standout(&winner, &winner), None);
    }

    #[test]
    fn rain_tip_follows_precipitation_chance() {
        let explainer = OutfitExplainer::new(Taxonomy::standard());
        let wet = Context::new().with_weather(WeatherSnapshot::at(16.0).with_precipitation(70.0));
        let tips = explainer.styling_tips(&scored(tee_and_jeans(), &wet), &wet);
        assert!(tips.iter().any(|tip| tip == "Rain is likely; choose water-resistant footwear."), "{tips:?}");

        let dry = Context::new().with_weather(WeatherSnapshot::at(16.0).with_precipitation(20.0));
        let tips = explainer.styling_tips(&scored(tee_and_jeans(), &dry), &dry);
        assert!(tips.iter().all(|tip| !tip.starts_with("Rain")), "{tips:?}");
    }

    #[test]
    fn styling_tips_are_capped() {
        let explainer = OutfitExplainer::new(Taxonomy::standard());
        let context = Context::new()
            .with_occasion(Occasion::Formal)
            .with_weather(WeatherSnapshot::at(2.0).with_precipitation(90.0));
        let mut outfit = scored(tee_and_jeans(), &context);
        outfit.analysis.color.palette.accents = vec!["red".to_owned(), "green".to_owned(), "purple".to_owned()];
        outfit.analysis.color.palette.contrast = ContrastTier::High;
        outfit.analysis.style.formality = 20.0;
        outfit.analysis.weather.band = Some(WeatherBandKind::Cold);

        let tips = explainer.styling_tips(&outfit, &context);
        assert_eq!(tips.len(), MAX_TIPS);
        assert!(tips.iter().any(|tip| tip.starts_with("Finish with footwear")));
        assert!(tips.iter().all(|tip| !tip.starts_with("Rain")), "rain tip falls past the cap: {tips:?}");
    }

    #[test]
    fn staleness_counts_from_as_of_inclusive() {
        let explainer = OutfitExplainer::new(Taxonomy::standard());
        let as_of = Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).single().expect("valid instant");
        let items = vec![
            (Category::Top, Garment::new("t", "Linen shirt", "tops").with_last_worn(as_of - Duration::days(STALE_AFTER_DAYS))),
            (
                Category::Bottom,
                Garment::new("b", "Chinos", "bottoms").with_last_worn(as_of - Duration::days(STALE_AFTER_DAYS - 1)),
            ),
        ];

        let context = Context::new().with_as_of(as_of);
        let insights = explainer.insights(&scored(items.clone(), &context), &context);
        assert!(insights.contains(&"Brings back Linen shirt, unworn for 30 days.".to_owned()), "{insights:?}");
        assert!(insights.iter().all(|insight| !insight.contains("Chinos")), "{insights:?}");

        let undated = Context::new();
        let insights = explainer.insights(&scored(items, &undated), &undated);
        assert!(insights.iter().all(|insight| !insight.starts_with("Brings back")));
    }

    #[test]
    fn style_hint_insight_matches_or_invites_experiment() {
        let explainer = OutfitExplainer::new(Taxonomy::standard());
        let outfit = scored(tee_and_jeans(), &Context::new());
        let primary = outfit.analysis.style.primary;

        let matching = Context::new()
            .with_preferences(UserPreferences { style_hint: Some(primary), ..UserPreferences::default() });
        let insights = explainer.insights(&outfit, &matching);
        assert!(insights.contains(&format!("Matches your {primary} style.")), "{insights:?}");

        let other = Archetype::ALL.into_iter().find(|archetype| *archetype != primary).expect("another archetype");
        let differing =
            Context::new().with_preferences(UserPreferences { style_hint: Some(other), ..UserPreferences::default() });
        let insights = explainer.insights(&outfit, &differing);
        assert!(
            insights.contains(&format!("Leans {primary} rather than your usual {other}, a chance to experiment.")),
            "{insights:?}"
        );
    }

    #[test]
    fn preferred_brand_and_lifestyle_insights() {
        let explainer = OutfitExplainer::new(Taxonomy::standard());
        let items = vec![
            (Category::Top, Garment::new("t", "Tee", "tops").with_brand("Uniqlo")),
            (Category::Bottom, Garment::new("b", "Jeans", "bottoms").with_brand("Levi's")),
        ];
        let context = Context::new().with_preferences(UserPreferences {
            preferred_brands: vec!["uniqlo".to_owned()],
            lifestyle: vec!["daily commute".to_owned()],
            ..UserPreferences::default()
        });
        let mut outfit = scored(items, &context);

        outfit.scores.comfort = 80.0;
        let insights = explainer.insights(&outfit, &context);
        assert!(insights.contains(&"Includes pieces from Uniqlo, a brand you prefer.".to_owned()), "{insights:?}");
        assert!(insights.contains(&"Comfortable enough for an active day on your feet.".to_owned()));

        outfit.scores.comfort = 65.0;
        let insights = explainer.insights(&outfit, &context);
        assert!(insights.iter().all(|insight| !insight.starts_with("Comfortable enough")));
    }

    #[test]
    fn strong_scores_need_no_improvements() {
        let explainer = OutfitExplainer::new(Taxonomy::standard());
        let context = Context::new().with_occasion(Occasion::Work);
        let mut outfit = scored(tee_and_jeans(), &context);
        all_high(&mut outfit);
        assert!(explainer.improvements(&outfit, &context).is_empty());
    }

    #[test]
    fn each_low_score_yields_its_improvement() {
        let explainer = OutfitExplainer::new(Taxonomy::standard());
        let context = Context::new().with_occasion(Occasion::Work);
        let base = {
            let mut outfit = scored(tee_and_jeans(), &context);
            all_high(&mut outfit);
            outfit
        };

        let mut outfit = base.clone();
        outfit.scores.color_harmony = 40.0;
        let improvements = explainer.improvements(&outfit, &context);
        assert_eq!(improvements.len(), 1);
        assert!(improvements[0].starts_with("Color harmony is low; try swapping a piece for "));

        let mut outfit = base.clone();
        outfit.scores.style = 40.0;
        outfit.analysis.style.secondary = None;
        let primary = outfit.analysis.style.primary;
        let cue = Taxonomy::standard().styles.archetype(primary).keywords[0];
        let improvements = explainer.improvements(&outfit, &context);
        assert!(improvements[0].starts_with(&format!("Pick pieces that read {primary}: think {cue}")), "{improvements:?}");

        outfit.analysis.style.secondary = Some(Archetype::Edgy);
        let improvements = explainer.improvements(&outfit, &context);
        assert!(improvements[0].starts_with("The look splits between"), "{improvements:?}");

        let mut outfit = base.clone();
        outfit.scores.weather = 40.0;
        outfit.analysis.weather.factors = vec![
            ScoringFactor::new("layering", -8.0, "missing outerwear"),
            ScoringFactor::new("coverage", -3.0, "arms exposed"),
        ];
        assert_eq!(explainer.improvements(&outfit, &context), vec!["Weather fit suffers: missing outerwear.".to_owned()]);
        outfit.analysis.weather.factors.clear();
        assert_eq!(explainer.improvements(&outfit, &context), vec!["Adjust layers for the forecast.".to_owned()]);

        let mut outfit = base.clone();
        outfit.scores.occasion = 40.0;
        assert_eq!(
            explainer.improvements(&outfit, &context),
            vec!["Some pieces lean away from work; swap them for work staples.".to_owned()]
        );
        assert!(explainer.improvements(&outfit, &Context::new()).is_empty());

        let mut outfit = base;
        outfit.scores.comfort = 45.0;
        assert_eq!(
            explainer.improvements(&outfit, &context),
            vec!["Trade a restrictive piece for something with stretch or a relaxed cut.".to_owned()]
        );
    }

    #[test]
    fn confidence_blends_composite_with_data_signals() {
        let explainer = OutfitExplainer::new(Taxonomy::standard());
        let items = vec![
            (Category::Top, Garment::new("t", "Tee", "tops").with_color("navy").with_material("cotton")),
            (Category::Bottom, Garment::new("b", "Trousers", "bottoms")),
        ];
        let context = Context::new().with_season(Season::Winter).with_preferences(UserPreferences {
            favorite_colors: vec!["navy".to_owned()],
            ..UserPreferences::default()
        });
        let mut outfit = scored(items, &context);
        outfit.composite = 80.0;

        let report = explainer.confidence(&outfit, &context, 1);
        assert_eq!(report.data_quality, 50.0);
        assert_eq!(report.personalization, 60.0);
        assert_eq!(report.seasonal_relevance, 90.0);
        assert!((report.score - 76.0).abs() < 1e-9, "score {}", report.score);
        assert_eq!(report.level, ConfidenceLevel::Medium);
        assert!(report.notes.contains(&"Weather data unavailable; weather fit is neutral.".to_owned()));
        assert!(report.notes.contains(&"Only 1 combination(s) could be evaluated.".to_owned()));

        outfit.composite = 100.0;
        assert_eq!(explainer.confidence(&outfit, &context, 5).level, ConfidenceLevel::High);
        outfit.composite = 20.0;
        assert_eq!(explainer.confidence(&outfit, &context, 5).level, ConfidenceLevel::Low);

        outfit.candidate.items[1].garment.seasons = vec![Season::Summer];
        assert_eq!(explainer.confidence(&outfit, &context, 5).seasonal_relevance, 50.0);
        assert_eq!(explainer.confidence(&outfit, &Context::new(), 5).seasonal_relevance, 70.0);
    }

    #[test]
    fn confidence_level_thresholds() {
        assert_eq!(ConfidenceLevel::from_score(80.0), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(79.9), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(60.0), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(59.9), ConfidenceLevel::Low);
    }
}
