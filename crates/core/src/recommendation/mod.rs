//! Outfit recommendation engine
//!
//! Scores every generated candidate across color, style, weather, occasion,
//! comfort, and sustainability, picks the best composite, and explains it.

mod engine;
mod explain;
mod scoring;
mod types;

pub use engine::{EngineSettings, OutfitEngine};
pub use explain::{OutfitExplainer, STALE_AFTER_DAYS};
pub use scoring::{ScoreCalculator, ScoringWeights};
pub use types::*;

use crate::errors::DomainError;

/// Result type for recommendation operations
pub type EngineResult<T> = Result<T, DomainError>;

/// Default scoring weights
pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    style: 0.25,
    color_harmony: 0.20,
    weather: 0.20,
    occasion: 0.15,
    comfort: 0.10,
    sustainability: 0.10,
};

/// Runner-ups reported next to the winner
pub const MAX_ALTERNATIVES: usize = 2;
