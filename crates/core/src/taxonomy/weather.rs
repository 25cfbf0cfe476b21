use std::fmt;

use serde::{Deserialize, Serialize};

use super::KeywordText;
use crate::domain::outfit::LayerSlot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherBandKind {
    Freezing,
    Cold,
    Cool,
    Mild,
    Warm,
    Hot,
}

impl WeatherBandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Freezing => "freezing",
            Self::Cold => "cold",
            Self::Cool => "cool",
            Self::Mild => "mild",
            Self::Warm => "warm",
            Self::Hot => "hot",
        }
    }
}

impl fmt::Display for WeatherBandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerType {
    Base,
    Insulation,
    Outer,
}

impl LayerType {
    pub fn slot(&self) -> LayerSlot {
        match self {
            Self::Base => LayerSlot::Base,
            Self::Insulation => LayerSlot::Middle,
            Self::Outer => LayerSlot::Outer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Insulation => "insulation",
            Self::Outer => "outer",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

/// One temperature interval and the dressing rules that apply inside it.
#[derive(Debug, Clone)]
pub struct WeatherBand {
    pub kind: WeatherBandKind,
    /// Inclusive lower bound.
    pub min_c: f64,
    /// Exclusive upper bound.
    pub max_c: f64,
    pub required_layers: &'static [LayerType],
    pub preferred_materials: &'static [&'static str],
    pub avoided_materials: &'static [&'static str],
    pub body_coverage: f64,
    pub extremity_coverage: f64,
    pub breathability: Level,
    pub water_resistance: Level,
    pub wind_resistance: Level,
}

impl WeatherBand {
    pub fn contains(&self, temperature_c: f64) -> bool {
        temperature_c >= self.min_c && temperature_c < self.max_c
    }
}

#[derive(Debug, Clone)]
pub struct MaterialProfile {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub breathability: f64,
    pub insulation: f64,
    pub durability: f64,
    pub comfort: f64,
    pub min_c: f64,
    pub max_c: f64,
}

impl MaterialProfile {
    pub fn suits(&self, temperature_c: f64) -> bool {
        temperature_c >= self.min_c && temperature_c <= self.max_c
    }
}

const fn band(
    kind: WeatherBandKind,
    min_c: f64,
    max_c: f64,
    required_layers: &'static [LayerType],
    preferred_materials: &'static [&'static str],
    avoided_materials: &'static [&'static str],
    coverage: (f64, f64),
    levels: (Level, Level, Level),
) -> WeatherBand {
    WeatherBand {
        kind,
        min_c,
        max_c,
        required_layers,
        preferred_materials,
        avoided_materials,
        body_coverage: coverage.0,
        extremity_coverage: coverage.1,
        breathability: levels.0,
        water_resistance: levels.1,
        wind_resistance: levels.2,
    }
}

const BANDS: [WeatherBand; 6] = [
    band(
        WeatherBandKind::Freezing,
        f64::NEG_INFINITY,
        0.0,
        &[LayerType::Base, LayerType::Insulation, LayerType::Outer],
        &["wool", "down", "fleece", "cashmere", "thermal", "gore tex"],
        &["linen", "mesh", "silk", "rayon"],
        (95.0, 90.0),
        (Level::Low, Level::High, Level::High),
    ),
    band(
        WeatherBandKind::Cold,
        0.0,
        10.0,
        &[LayerType::Base, LayerType::Insulation, LayerType::Outer],
        &["wool", "fleece", "cashmere", "flannel", "tweed", "leather"],
        &["linen", "mesh", "rayon"],
        (90.0, 75.0),
        (Level::Low, Level::Medium, Level::High),
    ),
    band(
        WeatherBandKind::Cool,
        10.0,
        18.0,
        &[LayerType::Base, LayerType::Outer],
        &["cotton", "denim", "wool", "corduroy", "leather", "knit"],
        &["mesh", "down", "thermal"],
        (80.0, 50.0),
        (Level::Medium, Level::Medium, Level::Medium),
    ),
    band(
        WeatherBandKind::Mild,
        18.0,
        25.0,
        &[LayerType::Base],
        &["cotton", "linen", "chambray", "silk", "denim", "jersey"],
        &["down", "fleece", "thermal", "tweed"],
        (65.0, 30.0),
        (Level::High, Level::Low, Level::Low),
    ),
    band(
        WeatherBandKind::Warm,
        25.0,
        32.0,
        &[LayerType::Base],
        &["linen", "cotton", "bamboo", "chambray", "rayon"],
        &["wool", "fleece", "down", "leather", "thermal", "corduroy"],
        (50.0, 15.0),
        (Level::High, Level::Low, Level::Low),
    ),
    band(
        WeatherBandKind::Hot,
        32.0,
        f64::INFINITY,
        &[LayerType::Base],
        &["linen", "bamboo", "mesh", "cotton", "chambray"],
        &["wool", "fleece", "down", "leather", "polyester", "denim", "thermal"],
        (40.0, 10.0),
        (Level::High, Level::Low, Level::Low),
    ),
];

const MATERIALS: &[MaterialProfile] = &[
    MaterialProfile { name: "gore-tex", keywords: &["gore tex", "goretex", "waterproof membrane"], breathability: 60.0, insulation: 40.0, durability: 90.0, comfort: 60.0, min_c: -15.0, max_c: 20.0 },
    MaterialProfile { name: "down", keywords: &["down", "puffer fill"], breathability: 40.0, insulation: 95.0, durability: 60.0, comfort: 80.0, min_c: -30.0, max_c: 5.0 },
    MaterialProfile { name: "thermal", keywords: &["thermal", "heattech"], breathability: 50.0, insulation: 85.0, durability: 60.0, comfort: 75.0, min_c: -25.0, max_c: 5.0 },
    MaterialProfile { name: "cashmere", keywords: &["cashmere"], breathability: 60.0, insulation: 85.0, durability: 45.0, comfort: 95.0, min_c: -10.0, max_c: 15.0 },
    MaterialProfile { name: "merino", keywords: &["merino"], breathability: 75.0, insulation: 75.0, durability: 70.0, comfort: 85.0, min_c: -10.0, max_c: 20.0 },
    MaterialProfile { name: "fleece", keywords: &["fleece", "sherpa"], breathability: 55.0, insulation: 80.0, durability: 70.0, comfort: 85.0, min_c: -15.0, max_c: 12.0 },
    MaterialProfile { name: "flannel", keywords: &["flannel"], breathability: 55.0, insulation: 70.0, durability: 70.0, comfort: 80.0, min_c: -5.0, max_c: 12.0 },
    MaterialProfile { name: "tweed", keywords: &["tweed"], breathability: 45.0, insulation: 75.0, durability: 85.0, comfort: 55.0, min_c: -5.0, max_c: 12.0 },
    MaterialProfile { name: "wool", keywords: &["wool", "woollen", "woolen"], breathability: 60.0, insulation: 80.0, durability: 80.0, comfort: 65.0, min_c: -15.0, max_c: 15.0 },
    MaterialProfile { name: "corduroy", keywords: &["corduroy", "cord"], breathability: 50.0, insulation: 60.0, durability: 80.0, comfort: 70.0, min_c: 0.0, max_c: 15.0 },
    MaterialProfile { name: "leather", keywords: &["leather", "faux leather"], breathability: 30.0, insulation: 60.0, durability: 95.0, comfort: 55.0, min_c: -5.0, max_c: 18.0 },
    MaterialProfile { name: "suede", keywords: &["suede"], breathability: 40.0, insulation: 55.0, durability: 60.0, comfort: 65.0, min_c: 0.0, max_c: 18.0 },
    MaterialProfile { name: "denim", keywords: &["denim", "jean"], breathability: 50.0, insulation: 45.0, durability: 90.0, comfort: 60.0, min_c: 5.0, max_c: 25.0 },
    MaterialProfile { name: "linen", keywords: &["linen"], breathability: 95.0, insulation: 15.0, durability: 65.0, comfort: 80.0, min_c: 20.0, max_c: 40.0 },
    MaterialProfile { name: "silk", keywords: &["silk", "satin"], breathability: 70.0, insulation: 30.0, durability: 40.0, comfort: 85.0, min_c: 12.0, max_c: 30.0 },
    MaterialProfile { name: "bamboo", keywords: &["bamboo"], breathability: 90.0, insulation: 20.0, durability: 60.0, comfort: 90.0, min_c: 15.0, max_c: 38.0 },
    MaterialProfile { name: "mesh", keywords: &["mesh"], breathability: 98.0, insulation: 5.0, durability: 50.0, comfort: 70.0, min_c: 20.0, max_c: 40.0 },
    MaterialProfile { name: "chambray", keywords: &["chambray", "seersucker"], breathability: 85.0, insulation: 20.0, durability: 70.0, comfort: 80.0, min_c: 15.0, max_c: 35.0 },
    MaterialProfile { name: "rayon", keywords: &["rayon", "viscose", "modal", "lyocell", "tencel"], breathability: 80.0, insulation: 20.0, durability: 45.0, comfort: 85.0, min_c: 15.0, max_c: 35.0 },
    MaterialProfile { name: "spandex", keywords: &["spandex", "elastane", "lycra"], breathability: 60.0, insulation: 25.0, durability: 70.0, comfort: 80.0, min_c: 10.0, max_c: 35.0 },
    MaterialProfile { name: "nylon", keywords: &["nylon"], breathability: 40.0, insulation: 35.0, durability: 85.0, comfort: 60.0, min_c: -5.0, max_c: 30.0 },
    MaterialProfile { name: "polyester", keywords: &["polyester", "poly"], breathability: 35.0, insulation: 40.0, durability: 85.0, comfort: 55.0, min_c: 0.0, max_c: 30.0 },
    MaterialProfile { name: "canvas", keywords: &["canvas"], breathability: 55.0, insulation: 30.0, durability: 90.0, comfort: 55.0, min_c: 10.0, max_c: 30.0 },
    MaterialProfile { name: "knit", keywords: &["knit", "jersey"], breathability: 70.0, insulation: 45.0, durability: 60.0, comfort: 85.0, min_c: 5.0, max_c: 25.0 },
    MaterialProfile { name: "cotton", keywords: &["cotton", "organic cotton", "pima"], breathability: 85.0, insulation: 30.0, durability: 70.0, comfort: 85.0, min_c: 5.0, max_c: 32.0 },
];

const LAYERING_STRATEGIES: &[&str] = &[
    "No torso layers: anchor the look with a top before styling further.",
    "Single layer: one breathable piece carries the look, so fit and fabric matter most.",
    "Two layers: a base plus one topper that can come off as the day warms.",
    "Three layers: base for comfort, a middle layer for insulation, an outer shell for wind and rain.",
    "Full layering: stack thin-to-thick so each piece can be shed independently.",
];

/// Six temperature bands, material physics, and layering templates.
#[derive(Debug, Clone)]
pub struct WeatherTaxonomy {
    bands: Vec<WeatherBand>,
    materials: Vec<MaterialProfile>,
}

impl WeatherTaxonomy {
    pub fn standard() -> Self {
        Self { bands: BANDS.to_vec(), materials: MATERIALS.to_vec() }
    }

    /// Band containing the temperature. The bands partition the real line, so
    /// any finite temperature lands in exactly one.
    pub fn band_for(&self, temperature_c: f64) -> &WeatherBand {
        self.bands
            .iter()
            .find(|band| band.contains(temperature_c))
            .unwrap_or(&self.bands[self.bands.len() - 1])
    }

    pub fn bands(&self) -> &[WeatherBand] {
        &self.bands
    }

    /// First material profile (in table order) whose keywords appear in the text.
    pub fn material_for(&self, material_text: &str) -> Option<&MaterialProfile> {
        let text = KeywordText::new(material_text);
        if text.is_empty() {
            return None;
        }
        self.materials.iter().find(|profile| text.contains_any(profile.keywords))
    }

    pub fn layering_strategy(&self, torso_layers: usize) -> &'static str {
        LAYERING_STRATEGIES[torso_layers.min(LAYERING_STRATEGIES.len() - 1)]
    }
}

impl Default for WeatherTaxonomy {
    fn default() -> Self {
        Self::standard()
    }
}
