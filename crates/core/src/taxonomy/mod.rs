//! Static domain tables: color model, style taxonomy, weather taxonomy.
//!
//! Tables are built once from `const` seeds and shared read-only through `Arc`.

pub mod color;
pub mod style;
pub mod weather;

use std::sync::Arc;

pub use color::{ColorInfo, ColorModel, Hsl};
pub use style::{Archetype, BrandTier, StyleArchetype, StyleTaxonomy};
pub use weather::{Level, LayerType, MaterialProfile, WeatherBand, WeatherBandKind, WeatherTaxonomy};

/// The three process-wide tables, bundled for wiring into analyzers.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    pub colors: Arc<ColorModel>,
    pub styles: Arc<StyleTaxonomy>,
    pub weather: Arc<WeatherTaxonomy>,
}

impl Taxonomy {
    pub fn standard() -> Self {
        Self {
            colors: Arc::new(ColorModel::standard()),
            styles: Arc::new(StyleTaxonomy::standard()),
            weather: Arc::new(WeatherTaxonomy::standard()),
        }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Lowercase, strip punctuation, collapse whitespace.
pub fn normalize_phrase(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Free text prepared for whole-word keyword matching.
///
/// Matching is on word boundaries, so "boot" matches "ankle boots" but not
/// "bootcut". Multi-word keywords match as phrases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordText(String);

impl KeywordText {
    pub fn new(raw: &str) -> Self {
        Self(format!(" {} ", normalize_phrase(raw)))
    }

    pub fn contains(&self, keyword: &str) -> bool {
        let keyword = normalize_phrase(keyword);
        if keyword.is_empty() {
            return false;
        }

        ["", "s", "es"].iter().any(|suffix| self.0.contains(&format!(" {keyword}{suffix} ")))
    }

    pub fn contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| self.contains(keyword))
    }

    pub fn first_match<'a>(&self, keywords: &[&'a str]) -> Option<&'a str> {
        keywords.iter().copied().find(|keyword| self.contains(keyword))
    }

    pub fn count_matches(&self, keywords: &[&str]) -> usize {
        keywords.iter().filter(|keyword| self.contains(keyword)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}
