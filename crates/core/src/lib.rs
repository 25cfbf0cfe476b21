pub mod analysis;
pub mod config;
pub mod domain;
pub mod errors;
pub mod generator;
pub mod recommendation;
pub mod taxonomy;

pub use analysis::{
    ColorHarmonyAnalyzer, ColorHarmonyReport, HeuristicScorer, StyleAnalyzer, StyleProfile,
    WeatherFit, WeatherMatcher,
};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::context::{Context, HardConstraints, TimeOfDay, UserPreferences, WeatherSnapshot};
pub use domain::garment::{Category, Condition, Garment, GarmentId, Occasion, Season};
pub use domain::outfit::{CandidateOutfit, CandidateSource, OutfitItem, OutfitLayers, ScoringFactor};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use generator::{
    CombinationGenerator, Exclusion, ExclusionReason, GenerationOutcome, GenerationSettings,
    RandomnessMode,
};
pub use recommendation::{
    CompatibilityReport, ConfidenceLevel, EngineResult, EngineSettings, OutfitEngine,
    RecommendedOutfit, ScoringWeights,
};
pub use taxonomy::{Archetype, ColorModel, StyleTaxonomy, Taxonomy, WeatherTaxonomy};
