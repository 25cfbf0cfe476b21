//! Types for the recommendation engine

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{
    ColorHarmonyReport, HeuristicScore, PaletteSummary, StyleConsistency, StyleProfile, WeatherFit,
};
use crate::domain::garment::GarmentId;
use crate::domain::outfit::{CandidateOutfit, CandidateSource, OutfitItem, OutfitLayers, ScoringFactor};
use crate::generator::Exclusion;
use crate::taxonomy::Archetype;

/// Every analyzer's output for one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisBundle {
    /// Color harmony, season alignment, and palette summary
    pub color: ColorHarmonyReport,
    /// Archetype classification
    pub style: StyleProfile,
    /// Style consistency against the primary archetype
    pub consistency: StyleConsistency,
    /// Weather suitability (neutral when weather is unknown)
    pub weather: WeatherFit,
    /// Fit with the requested occasion
    pub occasion: HeuristicScore,
    /// Material and cut comfort
    pub comfort: HeuristicScore,
    /// Fixed baseline
    pub trendiness: HeuristicScore,
    /// Pre-loved pieces and garment condition
    pub sustainability: HeuristicScore,
    /// Occasion and season breadth
    pub versatility: HeuristicScore,
}

/// Individual sub-scores, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SubScores {
    /// Style consistency
    pub style: f64,
    /// Color harmony
    pub color_harmony: f64,
    /// Weather fit
    pub weather: f64,
    /// Occasion fit
    pub occasion: f64,
    /// Comfort
    pub comfort: f64,
    /// Sustainability
    pub sustainability: f64,
    /// Trendiness (reported, not weighted)
    pub trendiness: f64,
    /// Versatility (reported, not weighted)
    pub versatility: f64,
}

impl SubScores {
    pub fn from_analysis(analysis: &AnalysisBundle) -> Self {
        Self {
            style: analysis.consistency.score,
            color_harmony: analysis.color.score,
            weather: analysis.weather.score,
            occasion: analysis.occasion.score,
            comfort: analysis.comfort.score,
            sustainability: analysis.sustainability.score,
            trendiness: analysis.trendiness.score,
            versatility: analysis.versatility.score,
        }
    }
}

/// A candidate after analysis and weighting
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: CandidateOutfit,
    pub analysis: AnalysisBundle,
    pub scores: SubScores,
    /// Weighted composite in [0, 100]
    pub composite: f64,
}

/// Confidence level for a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// High confidence (score >= 80)
    High,
    /// Medium confidence (score 60 - 79)
    Medium,
    /// Low confidence (below 60)
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ConfidenceLevel::High
        } else if score >= 60.0 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceReport {
    /// Blended confidence in [0, 100]
    pub score: f64,
    pub level: ConfidenceLevel,
    /// Composite score of the chosen outfit
    pub composite: f64,
    /// How much of the wardrobe data (colors, materials) was usable
    pub data_quality: f64,
    /// How much preference data informed the pick
    pub personalization: f64,
    /// Whether the outfit suits the requested season
    pub seasonal_relevance: f64,
    /// Known blind spots behind the score
    pub notes: Vec<String>,
}

/// Comfortable temperature range for an outfit, in °C
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min_c: f64,
    pub max_c: f64,
}

/// Compact view of a runner-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeSummary {
    pub outfit_id: Uuid,
    pub garment_ids: Vec<GarmentId>,
    pub composite_score: f64,
    pub source: String,
    /// Sub-score where the runner-up beats the winner, if any
    pub standout: Option<String>,
}

/// The selected outfit, fully explained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedOutfit {
    /// Deterministic id over the garment set
    pub id: Uuid,
    /// Display name
    pub name: String,
    pub items: Vec<OutfitItem>,
    pub layers: OutfitLayers,
    pub source: CandidateSource,
    /// Weighted composite in [0, 100]
    pub composite_score: f64,
    pub scores: SubScores,
    /// Weighted contribution of each sub-score to the composite
    pub breakdown: Vec<ScoringFactor>,
    pub analysis: AnalysisBundle,
    pub layering_strategy: String,
    pub styling_tips: Vec<String>,
    pub weather_range: TemperatureRange,
    pub insights: Vec<String>,
    pub improvements: Vec<String>,
    pub confidence: ConfidenceReport,
    /// Up to two runner-ups, best first
    pub alternatives: Vec<AlternativeSummary>,
    /// Candidates that reached scoring
    pub candidates_evaluated: usize,
    /// Garments removed by hard filters, with reasons
    pub excluded: Vec<Exclusion>,
}

/// Standalone compatibility check for an arbitrary garment set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub color_harmony: f64,
    pub style_consistency: f64,
    /// Share of garment pairs whose occasions can be worn together
    pub occasion_coherence: f64,
    /// Share of seasons every garment suits
    pub season_coherence: f64,
    /// Weighted overall in [0, 100]
    pub overall: f64,
    pub primary_style: Archetype,
    pub palette: PaletteSummary,
    pub factors: Vec<ScoringFactor>,
    pub issues: Vec<String>,
}
