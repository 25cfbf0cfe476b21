//! Per-outfit analyzers. Each one owns `Arc` handles to the tables it reads
//! and is safe to share across rayon workers.

pub mod color;
pub mod heuristics;
pub mod style;
pub mod weather;

pub use color::{
    ColorHarmonyAnalyzer, ColorHarmonyReport, ColorTemperature, ContrastTier, PaletteSummary,
    SaturationTier, SeasonAlignment,
};
pub use heuristics::{HeuristicScore, HeuristicScorer};
pub use style::{StyleAnalyzer, StyleConsistency, StyleProfile};
pub use weather::{CoverageEstimate, WeatherFit, WeatherMatcher};
