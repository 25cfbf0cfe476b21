//! Composite scoring and winner selection

use serde::{Deserialize, Serialize};

use super::types::{ScoredCandidate, SubScores};
use crate::domain::outfit::{clamp_score, ScoringFactor};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weights for composite components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for style consistency (default: 0.25)
    pub style: f64,
    /// Weight for color harmony (default: 0.20)
    pub color_harmony: f64,
    /// Weight for weather fit (default: 0.20)
    pub weather: f64,
    /// Weight for occasion fit (default: 0.15)
    pub occasion: f64,
    /// Weight for comfort (default: 0.10)
    pub comfort: f64,
    /// Weight for sustainability (default: 0.10)
    pub sustainability: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.style + self.color_harmony + self.weather + self.occasion + self.comfort + self.sustainability
    }

    /// Weights must be finite, non-negative, and sum to 1.
    pub fn validate(&self) -> Result<(), String> {
        let named = [
            ("style", self.style),
            ("color_harmony", self.color_harmony),
            ("weather", self.weather),
            ("occasion", self.occasion),
            ("comfort", self.comfort),
            ("sustainability", self.sustainability),
        ];
        if let Some((name, value)) = named.iter().find(|(_, value)| !value.is_finite() || *value < 0.0) {
            return Err(format!("weight `{name}` must be a non-negative number, got {value}"));
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(format!("weights must sum to 1.0, got {sum:.4}"));
        }
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}

/// Score calculator for candidate outfits
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    weights: ScoringWeights,
}

impl ScoreCalculator {
    /// Create a new score calculator with default weights
    pub fn new() -> Self {
        Self { weights: ScoringWeights::default() }
    }

    /// Create with custom weights
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Convex combination of the weighted sub-scores
    pub fn calculate_composite(&self, scores: &SubScores) -> f64 {
        let total = scores.style * self.weights.style
            + scores.color_harmony * self.weights.color_harmony
            + scores.weather * self.weights.weather
            + scores.occasion * self.weights.occasion
            + scores.comfort * self.weights.comfort
            + scores.sustainability * self.weights.sustainability;

        clamp_score(total)
    }

    /// Weighted contribution of each sub-score
    pub fn breakdown(&self, scores: &SubScores) -> Vec<ScoringFactor> {
        [
            ("style", scores.style, self.weights.style),
            ("color_harmony", scores.color_harmony, self.weights.color_harmony),
            ("weather", scores.weather, self.weights.weather),
            ("occasion", scores.occasion, self.weights.occasion),
            ("comfort", scores.comfort, self.weights.comfort),
            ("sustainability", scores.sustainability, self.weights.sustainability),
        ]
        .into_iter()
        .map(|(name, score, weight)| {
            ScoringFactor::new(name, score * weight, format!("{score:.1} x {weight:.2}"))
        })
        .collect()
    }

    /// Highest composite; the lowest index wins ties.
    pub fn select_best(&self, scored: &[ScoredCandidate]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, candidate) in scored.iter().enumerate() {
            if best.map(|(_, top)| candidate.composite > top).unwrap_or(true) {
                best = Some((index, candidate.composite));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Indices of the best runner-ups, excluding the winner, best first.
    pub fn runner_ups(&self, scored: &[ScoredCandidate], winner: usize, limit: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..scored.len()).filter(|index| *index != winner).collect();
        indices.sort_by(|a, b| {
            scored[*b]
                .composite
                .partial_cmp(&scored[*a].composite)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(b))
        });
        indices.truncate(limit);
        indices
    }
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}
