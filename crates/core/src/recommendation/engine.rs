//! Outfit engine implementation

use std::collections::HashSet;

use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::explain::OutfitExplainer;
use super::scoring::{ScoreCalculator, ScoringWeights};
use super::types::*;
use super::{EngineResult, MAX_ALTERNATIVES};
use crate::analysis::{ColorHarmonyAnalyzer, HeuristicScorer, StyleAnalyzer, WeatherMatcher};
use crate::config::AppConfig;
use crate::domain::context::Context;
use crate::domain::garment::{Garment, Season};
use crate::domain::outfit::{clamp_score, CandidateOutfit, ScoringFactor};
use crate::errors::DomainError;
use crate::generator::{classify_all, CombinationGenerator, GenerationSettings};
use crate::taxonomy::Taxonomy;

const COMPAT_COLOR_WEIGHT: f64 = 0.35;
const COMPAT_STYLE_WEIGHT: f64 = 0.35;
const COMPAT_OCCASION_WEIGHT: f64 = 0.15;
const COMPAT_SEASON_WEIGHT: f64 = 0.15;
const COMPAT_ISSUE_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineSettings {
    pub generation: GenerationSettings,
    pub weights: ScoringWeights,
}

/// Stateless across requests; the taxonomy tables are shared read-only.
#[derive(Debug, Clone)]
pub struct OutfitEngine {
    settings: EngineSettings,
    generator: CombinationGenerator,
    colors: ColorHarmonyAnalyzer,
    style: StyleAnalyzer,
    weather: WeatherMatcher,
    heuristics: HeuristicScorer,
    calculator: ScoreCalculator,
    explainer: OutfitExplainer,
}

impl OutfitEngine {
    pub fn new() -> Self {
        Self::with_settings(EngineSettings::default())
    }

    /// Weights are trusted here; `AppConfig::load` is where they are validated.
    pub fn with_settings(settings: EngineSettings) -> Self {
        let taxonomy = Taxonomy::standard();
        Self {
            settings,
            generator: CombinationGenerator::new(
                taxonomy.colors.clone(),
                taxonomy.weather.clone(),
                settings.generation,
            ),
            colors: ColorHarmonyAnalyzer::new(taxonomy.colors.clone()),
            style: StyleAnalyzer::new(taxonomy.styles.clone(), taxonomy.colors.clone()),
            weather: WeatherMatcher::new(taxonomy.weather.clone()),
            heuristics: HeuristicScorer::new(taxonomy.weather.clone()),
            calculator: ScoreCalculator::with_weights(settings.weights),
            explainer: OutfitExplainer::new(taxonomy),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_settings(EngineSettings {
            generation: config.engine.generation_settings(),
            weights: config.weights,
        })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Generate, score, and explain the best outfit for the request.
    pub fn recommend(&self, garments: &[Garment], context: &Context) -> EngineResult<RecommendedOutfit> {
        validate_request(garments, context)?;
        info!(
            event_name = "engine.recommend.started",
            garments = garments.len(),
            occasion = ?context.occasion,
            has_weather = context.weather.is_some(),
            randomness = %self.settings.generation.randomness,
            "recommendation started"
        );

        let outcome = self.generator.generate(garments, context);
        if outcome.candidates.is_empty() {
            warn!(
                event_name = "engine.recommend.no_viable_outfit",
                considered = outcome.considered,
                excluded = outcome.excluded.len(),
                "no candidate outfit could be assembled"
            );
            return Err(DomainError::NoViableOutfit {
                considered: outcome.considered,
                excluded: outcome.excluded.len(),
            });
        }

        let scored = self.score_all(&outcome.candidates, context);
        let winner = self.calculator.select_best(&scored).ok_or_else(|| {
            DomainError::InvariantViolation(format!("{} candidates scored but none selected", scored.len()))
        })?;
        let best = &scored[winner];
        debug!(
            event_name = "engine.recommend.selected",
            outfit_id = %best.candidate.id,
            composite = best.composite,
            index = winner,
            "winning candidate selected"
        );

        let alternatives = self
            .calculator
            .runner_ups(&scored, winner, MAX_ALTERNATIVES)
            .into_iter()
            .map(|index| self.explainer.alternative(&scored[index], best))
            .collect();

        let outfit = RecommendedOutfit {
            id: best.candidate.id,
            name: self.explainer.name(&best.candidate, context, self.settings.generation.randomness.naming_seed()),
            items: best.candidate.items.clone(),
            layers: best.candidate.layers.clone(),
            source: best.candidate.source.clone(),
            composite_score: best.composite,
            scores: best.scores,
            breakdown: self.calculator.breakdown(&best.scores),
            analysis: best.analysis.clone(),
            layering_strategy: self.explainer.layering_strategy(&best.candidate),
            styling_tips: self.explainer.styling_tips(best, context),
            weather_range: self.explainer.weather_range(&best.candidate),
            insights: self.explainer.insights(best, context),
            improvements: self.explainer.improvements(best, context),
            confidence: self.explainer.confidence(best, context, scored.len()),
            alternatives,
            candidates_evaluated: scored.len(),
            excluded: outcome.excluded,
        };

        info!(
            event_name = "engine.recommend.completed",
            outfit_id = %outfit.id,
            composite = outfit.composite_score,
            candidates = outfit.candidates_evaluated,
            confidence = ?outfit.confidence.level,
            "recommendation completed"
        );
        Ok(outfit)
    }

    pub fn suggest_colors<S: AsRef<str>>(&self, current_colors: &[S]) -> Vec<String> {
        self.colors.suggest(current_colors)
    }

    /// Score a caller-assembled garment set without generating alternatives.
    pub fn analyze_compatibility(&self, garments: &[Garment]) -> EngineResult<CompatibilityReport> {
        if garments.is_empty() {
            return Err(DomainError::InvalidInput("compatibility needs at least one garment".to_owned()));
        }
        validate_garments(garments)?;

        let items = classify_all(garments);
        let colors: Vec<&str> = garments.iter().filter_map(|garment| garment.color.as_deref()).collect();
        let color = self.colors.analyze(&colors, &[]);
        let profile = self.style.classify(&items);
        let consistency = self.style.consistency(&items, &profile);

        let mut issues = Vec::new();

        let mut pairs = 0usize;
        let mut clashes = 0usize;
        for (index, left) in garments.iter().enumerate() {
            for right in &garments[index + 1..] {
                pairs += 1;
                if let (Some(a), Some(b)) = (left.occasion, right.occasion) {
                    if !a.compatible_with(b) {
                        clashes += 1;
                        issues.push(format!("{} ({a}) and {} ({b}) suit different occasions", left.name, right.name));
                    }
                }
            }
        }
        let occasion_coherence =
            if pairs == 0 { 100.0 } else { 100.0 * (pairs - clashes) as f64 / pairs as f64 };

        let shared_seasons = Season::SEASONAL
            .into_iter()
            .filter(|season| garments.iter().all(|garment| garment.suits_season(*season)))
            .count();
        let season_coherence = 100.0 * shared_seasons as f64 / Season::SEASONAL.len() as f64;
        if shared_seasons == 0 {
            issues.push("No season suits every piece".to_owned());
        }

        if color.score < COMPAT_ISSUE_THRESHOLD {
            issues.push(format!("Colors clash (harmony {:.0})", color.score));
        }
        if consistency.score < COMPAT_ISSUE_THRESHOLD {
            issues.push(match profile.secondary {
                Some(secondary) => format!("Style splits between {} and {secondary}", profile.primary),
                None => format!("Pieces stray from the {} look", profile.primary),
            });
        }

        let factors = vec![
            ScoringFactor::new("color_harmony", color.score * COMPAT_COLOR_WEIGHT, format!("harmony {:.1}", color.score)),
            ScoringFactor::new(
                "style_consistency",
                consistency.score * COMPAT_STYLE_WEIGHT,
                format!("{} consistency {:.1}", profile.primary, consistency.score),
            ),
            ScoringFactor::new(
                "occasion_coherence",
                occasion_coherence * COMPAT_OCCASION_WEIGHT,
                format!("{clashes} of {pairs} pair(s) clash"),
            ),
            ScoringFactor::new(
                "season_coherence",
                season_coherence * COMPAT_SEASON_WEIGHT,
                format!("{shared_seasons} shared season(s)"),
            ),
        ];
        let overall = clamp_score(factors.iter().map(|factor| factor.impact).sum());

        Ok(CompatibilityReport {
            color_harmony: color.score,
            style_consistency: consistency.score,
            occasion_coherence,
            season_coherence,
            overall,
            primary_style: profile.primary,
            palette: color.palette,
            factors,
            issues,
        })
    }

    /// Run every analyzer over one candidate and weight the result.
    pub fn analyze_candidate(&self, candidate: &CandidateOutfit, context: &Context) -> ScoredCandidate {
        let colors = candidate.colors();
        let style = self.style.classify(&candidate.items);
        let consistency = self.style.consistency(&candidate.items, &style);
        let analysis = AnalysisBundle {
            color: self.colors.analyze(&colors, &context.preferences.favorite_colors),
            style,
            consistency,
            weather: self.weather.evaluate(candidate, context.weather.as_ref()),
            occasion: self.heuristics.occasion_fit(&candidate.items, context.occasion),
            comfort: self.heuristics.comfort(&candidate.items),
            trendiness: self.heuristics.trendiness(&candidate.items),
            sustainability: self.heuristics.sustainability(&candidate.items),
            versatility: self.heuristics.versatility(candidate),
        };
        let scores = SubScores::from_analysis(&analysis);
        let composite = self.calculator.calculate_composite(&scores);

        ScoredCandidate { candidate: candidate.clone(), analysis, scores, composite }
    }

    fn score_all(&self, candidates: &[CandidateOutfit], context: &Context) -> Vec<ScoredCandidate> {
        if self.settings.generation.parallel {
            candidates.par_iter().map(|candidate| self.analyze_candidate(candidate, context)).collect()
        } else {
            candidates.iter().map(|candidate| self.analyze_candidate(candidate, context)).collect()
        }
    }
}

impl Default for OutfitEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_request(garments: &[Garment], context: &Context) -> EngineResult<()> {
    if let Some(weather) = &context.weather {
        let readings = [
            ("temperature_c", weather.temperature_c),
            ("humidity", weather.humidity),
            ("wind_speed_kmh", weather.wind_speed_kmh),
            ("precipitation_chance", weather.precipitation_chance),
            ("uv_index", weather.uv_index),
            ("feels_like_c", weather.feels_like_c.unwrap_or(0.0)),
        ];
        if let Some((name, value)) = readings.iter().find(|(_, value)| !value.is_finite()) {
            return Err(DomainError::InvalidInput(format!("weather {name} must be finite, got {value}")));
        }
    }

    if let Some(ceiling) = context.constraints.budget_ceiling {
        if ceiling < Decimal::ZERO {
            return Err(DomainError::InvalidInput(format!("budget ceiling must not be negative, got {ceiling}")));
        }
    }

    validate_garments(garments)
}

fn validate_garments(garments: &[Garment]) -> EngineResult<()> {
    let mut seen = HashSet::with_capacity(garments.len());
    for garment in garments {
        if !seen.insert(&garment.id) {
            return Err(DomainError::InvalidInput(format!("duplicate garment id `{}`", garment.id)));
        }
        if let Some(value) = garment.value {
            if value < Decimal::ZERO {
                return Err(DomainError::InvalidInput(format!(
                    "garment `{}` has a negative value {value}",
                    garment.id
                )));
            }
        }
    }
    Ok(())
}
