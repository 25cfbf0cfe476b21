use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::normalize_phrase;
use crate::domain::garment::Season;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    /// Degrees, 0-360.
    pub hue: f64,
    /// Percent, 0-100.
    pub saturation: f64,
    /// Percent, 0-100.
    pub lightness: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorInfo {
    pub name: &'static str,
    pub hsl: Hsl,
    pub neutral: bool,
}

#[derive(Debug, Clone, Copy)]
struct ColorSeed {
    name: &'static str,
    hue: f64,
    saturation: f64,
    lightness: f64,
    neutral: bool,
}

const fn chromatic(name: &'static str, hue: f64, saturation: f64, lightness: f64) -> ColorSeed {
    ColorSeed { name, hue, saturation, lightness, neutral: false }
}

const fn neutral(name: &'static str, hue: f64, saturation: f64, lightness: f64) -> ColorSeed {
    ColorSeed { name, hue, saturation, lightness, neutral: true }
}

const COLOR_SEEDS: &[ColorSeed] = &[
    neutral("black", 0.0, 0.0, 0.0),
    neutral("white", 0.0, 0.0, 100.0),
    neutral("ivory", 60.0, 100.0, 97.0),
    neutral("cream", 45.0, 70.0, 92.0),
    neutral("beige", 40.0, 40.0, 82.0),
    neutral("tan", 34.0, 44.0, 69.0),
    neutral("khaki", 54.0, 38.0, 70.0),
    neutral("camel", 33.0, 45.0, 55.0),
    neutral("brown", 25.0, 50.0, 30.0),
    neutral("gray", 0.0, 0.0, 50.0),
    neutral("charcoal", 0.0, 0.0, 25.0),
    neutral("navy", 240.0, 100.0, 25.0),
    neutral("denim", 215.0, 40.0, 45.0),
    chromatic("red", 0.0, 85.0, 50.0),
    chromatic("maroon", 0.0, 100.0, 25.0),
    chromatic("crimson", 348.0, 83.0, 47.0),
    chromatic("burgundy", 345.0, 100.0, 25.0),
    chromatic("pink", 340.0, 80.0, 80.0),
    chromatic("blush", 350.0, 60.0, 88.0),
    chromatic("fuchsia", 320.0, 90.0, 55.0),
    chromatic("coral", 16.0, 100.0, 66.0),
    chromatic("peach", 28.0, 100.0, 86.0),
    chromatic("orange", 30.0, 100.0, 50.0),
    chromatic("rust", 20.0, 75.0, 40.0),
    chromatic("mustard", 45.0, 80.0, 45.0),
    chromatic("gold", 51.0, 100.0, 50.0),
    chromatic("yellow", 55.0, 100.0, 60.0),
    chromatic("olive", 60.0, 100.0, 25.0),
    chromatic("lime", 80.0, 70.0, 50.0),
    chromatic("green", 120.0, 60.0, 35.0),
    chromatic("emerald", 140.0, 70.0, 40.0),
    chromatic("mint", 150.0, 60.0, 80.0),
    chromatic("turquoise", 175.0, 70.0, 55.0),
    chromatic("teal", 180.0, 100.0, 25.0),
    chromatic("sky blue", 197.0, 71.0, 73.0),
    chromatic("cobalt", 215.0, 100.0, 34.0),
    chromatic("blue", 220.0, 75.0, 50.0),
    chromatic("royal blue", 222.0, 73.0, 57.0),
    chromatic("lavender", 260.0, 60.0, 85.0),
    chromatic("purple", 285.0, 60.0, 30.0),
    chromatic("plum", 300.0, 45.0, 35.0),
];

const COLOR_ALIASES: &[(&str, &str)] = &[
    ("grey", "gray"),
    ("light blue", "sky blue"),
    ("baby blue", "sky blue"),
    ("light gray", "gray"),
    ("light grey", "gray"),
    ("dark gray", "charcoal"),
    ("dark grey", "charcoal"),
    ("dark blue", "navy"),
    ("navy blue", "navy"),
    ("off white", "ivory"),
    ("dark green", "emerald"),
    ("forest green", "emerald"),
    ("light pink", "blush"),
    ("hot pink", "fuchsia"),
    ("magenta", "fuchsia"),
    ("violet", "purple"),
    ("wine", "burgundy"),
    ("mustard yellow", "mustard"),
    ("sand", "beige"),
    ("olive green", "olive"),
    ("denim blue", "denim"),
    ("aqua", "turquoise"),
    ("scarlet", "red"),
];

const COMPLEMENTARY_PAIRS: &[(&str, &str)] = &[
    ("red", "green"),
    ("blue", "orange"),
    ("purple", "yellow"),
    ("navy", "gold"),
    ("teal", "coral"),
    ("burgundy", "emerald"),
    ("cobalt", "rust"),
    ("sky blue", "peach"),
    ("lavender", "mustard"),
    ("fuchsia", "lime"),
    ("olive", "plum"),
];

const SPRING_PALETTE: &[&str] =
    &["coral", "peach", "gold", "yellow", "turquoise", "lime", "ivory", "camel"];
const SUMMER_PALETTE: &[&str] =
    &["lavender", "sky blue", "pink", "blush", "gray", "mint", "plum", "denim"];
const AUTUMN_PALETTE: &[&str] =
    &["rust", "mustard", "olive", "brown", "burgundy", "teal", "cream", "orange", "khaki", "tan"];
const WINTER_PALETTE: &[&str] = &[
    "black",
    "white",
    "red",
    "royal blue",
    "emerald",
    "fuchsia",
    "charcoal",
    "navy",
    "purple",
    "crimson",
    "cobalt",
];

/// Neutrals proposed, in order, when a palette has none.
pub const NEUTRAL_FALLBACKS: &[&str] = &["white", "black", "gray", "beige", "navy"];

/// Closed color vocabulary with HSL data, palettes, and complementary pairs.
#[derive(Debug, Clone)]
pub struct ColorModel {
    colors: HashMap<&'static str, ColorInfo>,
    aliases: HashMap<&'static str, &'static str>,
    /// Vocabulary order, for deterministic iteration.
    order: Vec<&'static str>,
}

impl ColorModel {
    pub fn standard() -> Self {
        let colors = COLOR_SEEDS
            .iter()
            .map(|seed| {
                (
                    seed.name,
                    ColorInfo {
                        name: seed.name,
                        hsl: Hsl {
                            hue: seed.hue,
                            saturation: seed.saturation,
                            lightness: seed.lightness,
                        },
                        neutral: seed.neutral,
                    },
                )
            })
            .collect();

        Self {
            colors,
            aliases: COLOR_ALIASES.iter().copied().collect(),
            order: COLOR_SEEDS.iter().map(|seed| seed.name).collect(),
        }
    }

    /// Resolve free text to a vocabulary name. Unknown colors resolve to `None`.
    pub fn normalize(&self, raw: &str) -> Option<&'static str> {
        let key = normalize_phrase(raw);
        if let Some(canonical) = self.aliases.get(key.as_str()) {
            return Some(*canonical);
        }
        self.colors.get(key.as_str()).map(|info| info.name)
    }

    pub fn info(&self, name: &str) -> Option<&ColorInfo> {
        self.normalize(name).and_then(|canonical| self.colors.get(canonical))
    }

    pub fn is_neutral(&self, name: &str) -> bool {
        self.info(name).map(|info| info.neutral).unwrap_or(false)
    }

    pub fn are_complementary(&self, a: &str, b: &str) -> bool {
        let (Some(a), Some(b)) = (self.normalize(a), self.normalize(b)) else {
            return false;
        };
        COMPLEMENTARY_PAIRS
            .iter()
            .any(|(left, right)| (*left == a && *right == b) || (*left == b && *right == a))
    }

    pub fn complements_of(&self, name: &str) -> Vec<&'static str> {
        let Some(name) = self.normalize(name) else {
            return Vec::new();
        };
        COMPLEMENTARY_PAIRS
            .iter()
            .filter_map(|(left, right)| {
                if *left == name {
                    Some(*right)
                } else if *right == name {
                    Some(*left)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Circular hue distance in degrees, 0-180.
    pub fn hue_distance(&self, a: &ColorInfo, b: &ColorInfo) -> f64 {
        let raw = (a.hsl.hue - b.hsl.hue).abs() % 360.0;
        raw.min(360.0 - raw)
    }

    /// Chromatic colors within `max_degrees` of hue, nearest first.
    pub fn analogous_to(&self, name: &str, max_degrees: f64) -> Vec<&'static str> {
        let Some(origin) = self.info(name).copied() else {
            return Vec::new();
        };
        if origin.neutral {
            return Vec::new();
        }

        let mut nearby: Vec<(f64, &'static str)> = self
            .iter()
            .filter(|info| !info.neutral && info.name != origin.name)
            .map(|info| (self.hue_distance(&origin, info), info.name))
            .filter(|(distance, _)| *distance <= max_degrees)
            .collect();

        nearby.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        nearby.into_iter().map(|(_, name)| name).collect()
    }

    pub fn palette(&self, season: Season) -> &'static [&'static str] {
        match season {
            Season::Spring => SPRING_PALETTE,
            Season::Summer => SUMMER_PALETTE,
            Season::Autumn => AUTUMN_PALETTE,
            Season::Winter => WINTER_PALETTE,
            Season::AllSeason => &[],
        }
    }

    /// Iterate the vocabulary in its fixed order.
    pub fn iter(&self) -> impl Iterator<Item = &ColorInfo> + '_ {
        self.order.iter().filter_map(|name| self.colors.get(name))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ColorModel {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorModel, COMPLEMENTARY_PAIRS, SPRING_PALETTE};
    use crate::domain::garment::Season;

    #[test]
    fn normalizes_multi_word_variants() {
        let model = ColorModel::standard();
        assert_eq!(model.normalize("Light Blue"), Some("sky blue"));
        assert_eq!(model.normalize("light-grey"), Some("gray"));
        assert_eq!(model.normalize("NAVY"), Some("navy"));
        assert_eq!(model.normalize("chartreuse-ish"), None);
    }

    #[test]
    fn complementary_lookup_is_symmetric() {
        let model = ColorModel::standard();
        assert!(model.are_complementary("navy", "gold"));
        assert!(model.are_complementary("gold", "navy"));
        assert!(!model.are_complementary("navy", "black"));
        assert_eq!(model.complements_of("green"), vec!["red"]);
    }

    #[test]
    fn every_table_entry_resolves() {
        let model = ColorModel::standard();
        for (left, right) in COMPLEMENTARY_PAIRS {
            assert!(model.info(left).is_some(), "{left} missing");
            assert!(model.info(right).is_some(), "{right} missing");
        }
        for season in Season::SEASONAL {
            for name in model.palette(season) {
                assert!(model.info(name).is_some(), "{name} missing");
            }
        }
        assert!(SPRING_PALETTE.iter().all(|name| model.normalize(name) == Some(*name)));
    }

    #[test]
    fn hue_distance_wraps_around_the_circle() {
        let model = ColorModel::standard();
        let red = *model.info("red").expect("red");
        let crimson = *model.info("crimson").expect("crimson");
        assert!((model.hue_distance(&red, &crimson) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn analogous_colors_exclude_neutrals_and_self() {
        let model = ColorModel::standard();
        let near_red = model.analogous_to("red", 30.0);
        assert!(near_red.contains(&"crimson"));
        assert!(!near_red.contains(&"red"));
        assert!(!near_red.contains(&"black"));
        assert!(model.analogous_to("black", 30.0).is_empty());
    }
}
