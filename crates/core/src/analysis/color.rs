//! Color harmony, season alignment, and palette summaries.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::garment::Season;
use crate::domain::outfit::{clamp_score, ScoringFactor};
use crate::taxonomy::color::NEUTRAL_FALLBACKS;
use crate::taxonomy::{ColorInfo, ColorModel};

/// Score returned for zero or one distinct color.
pub const MONOCHROME_SCORE: f64 = 85.0;
/// Personal alignment when the profile carries no favorite colors.
pub const PERSONAL_BASELINE: f64 = 70.0;
/// Maximum colors returned by `suggest`.
pub const MAX_COLOR_SUGGESTIONS: usize = 5;

const BASE_SCORE: f64 = 50.0;
const COMPLEMENTARY_BONUS: f64 = 20.0;
const ANALOGOUS_STEP: f64 = 5.0;
const ANALOGOUS_CAP: f64 = 15.0;
const ANALOGOUS_MAX_DEGREES: f64 = 60.0;
const NEUTRAL_STEP: f64 = 5.0;
const NEUTRAL_CAP: f64 = 15.0;
const COMPLEXITY_STEP: f64 = 5.0;
const COMPLEXITY_FREE_COLORS: usize = 4;
const SUGGESTION_HUE_WINDOW: f64 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTemperature {
    Warm,
    Cool,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaturationTier {
    Muted,
    Moderate,
    Vivid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContrastTier {
    Low,
    Medium,
    High,
}

impl ContrastTier {
    pub fn from_spread(spread: f64) -> Self {
        if spread < 25.0 {
            Self::Low
        } else if spread < 50.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteSummary {
    pub dominant: Option<String>,
    pub accents: Vec<String>,
    pub neutrals: Vec<String>,
    pub temperature: ColorTemperature,
    pub saturation: SaturationTier,
    pub contrast: ContrastTier,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonAlignment {
    pub best: Option<Season>,
    pub score: f64,
    pub per_season: Vec<(Season, f64)>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorHarmonyReport {
    pub score: f64,
    pub factors: Vec<ScoringFactor>,
    pub season: SeasonAlignment,
    pub personal_alignment: f64,
    pub palette: PaletteSummary,
    /// Resolved vocabulary names, one per colored garment.
    pub colors: Vec<String>,
}

impl ColorHarmonyReport {
    pub fn has_factor(&self, name: &str) -> bool {
        self.factors.iter().any(|factor| factor.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct ColorHarmonyAnalyzer {
    model: Arc<ColorModel>,
}

impl ColorHarmonyAnalyzer {
    pub fn new(model: Arc<ColorModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &ColorModel {
        &self.model
    }

    /// Full color analysis for one outfit's garment colors.
    pub fn analyze<S: AsRef<str>>(&self, raw_colors: &[S], favorites: &[String]) -> ColorHarmonyReport {
        let resolved = self.resolve(raw_colors);
        let (score, factors) = self.harmony_of(&resolved);

        ColorHarmonyReport {
            score,
            factors,
            season: self.season_alignment_of(&resolved),
            personal_alignment: self.personal_alignment_of(&resolved, favorites),
            palette: self.palette_of(&resolved),
            colors: resolved.iter().map(|info| info.name.to_owned()).collect(),
        }
    }

    pub fn harmony<S: AsRef<str>>(&self, raw_colors: &[S]) -> (f64, Vec<ScoringFactor>) {
        self.harmony_of(&self.resolve(raw_colors))
    }

    pub fn season_alignment<S: AsRef<str>>(&self, raw_colors: &[S]) -> SeasonAlignment {
        self.season_alignment_of(&self.resolve(raw_colors))
    }

    pub fn palette_summary<S: AsRef<str>>(&self, raw_colors: &[S]) -> PaletteSummary {
        self.palette_of(&self.resolve(raw_colors))
    }

    /// Complementary then analogous suggestions, always proposing a neutral
    /// when the palette has none.
    pub fn suggest<S: AsRef<str>>(&self, current_colors: &[S]) -> Vec<String> {
        let current = distinct(&self.resolve(current_colors));
        if current.is_empty() {
            return NEUTRAL_FALLBACKS.iter().map(|name| (*name).to_owned()).collect();
        }

        let taken = |name: &str, out: &[&'static str]| {
            current.iter().any(|info| info.name == name) || out.iter().any(|seen| *seen == name)
        };

        let mut suggestions: Vec<&'static str> = Vec::new();
        for info in &current {
            for complement in self.model.complements_of(info.name) {
                if !taken(complement, &suggestions) {
                    suggestions.push(complement);
                }
            }
        }
        for info in &current {
            for analogous in self.model.analogous_to(info.name, SUGGESTION_HUE_WINDOW) {
                if !taken(analogous, &suggestions) {
                    suggestions.push(analogous);
                }
            }
        }
        suggestions.truncate(MAX_COLOR_SUGGESTIONS);

        let has_neutral = current.iter().any(|info| info.neutral)
            || suggestions.iter().any(|name| self.model.is_neutral(name));
        if !has_neutral {
            if let Some(fallback) =
                NEUTRAL_FALLBACKS.iter().copied().find(|name| !taken(*name, &suggestions))
            {
                if suggestions.len() >= MAX_COLOR_SUGGESTIONS {
                    suggestions.pop();
                }
                suggestions.push(fallback);
            }
        }

        suggestions.into_iter().map(str::to_owned).collect()
    }

    fn resolve<S: AsRef<str>>(&self, raw_colors: &[S]) -> Vec<ColorInfo> {
        raw_colors.iter().filter_map(|raw| self.model.info(raw.as_ref()).copied()).collect()
    }

    fn harmony_of(&self, resolved: &[ColorInfo]) -> (f64, Vec<ScoringFactor>) {
        let unique = distinct(resolved);
        if unique.len() <= 1 {
            return (
                MONOCHROME_SCORE,
                vec![ScoringFactor::new(
                    "monochromatic",
                    MONOCHROME_SCORE - BASE_SCORE,
                    "A single color is inherently harmonious",
                )],
            );
        }

        let mut score = BASE_SCORE;
        let mut factors = Vec::new();

        let complementary = unique.iter().enumerate().find_map(|(i, left)| {
            unique[i + 1..]
                .iter()
                .find(|right| self.model.are_complementary(left.name, right.name))
                .map(|right| (left.name, right.name))
        });
        if let Some((left, right)) = complementary {
            score += COMPLEMENTARY_BONUS;
            factors.push(ScoringFactor::new(
                "complementary",
                COMPLEMENTARY_BONUS,
                format!("{left} and {right} are complementary"),
            ));
        }

        let analogous_pairs = self.analogous_pairs(&unique);
        if analogous_pairs > 0 {
            let bonus = (analogous_pairs as f64 * ANALOGOUS_STEP).min(ANALOGOUS_CAP);
            score += bonus;
            factors.push(ScoringFactor::new(
                "analogous",
                bonus,
                format!("{analogous_pairs} hue-adjacent color pair(s)"),
            ));
        }

        let neutral_count = unique.iter().filter(|info| info.neutral).count();
        if neutral_count > 0 {
            let bonus = (neutral_count as f64 * NEUTRAL_STEP).min(NEUTRAL_CAP);
            score += bonus;
            factors.push(ScoringFactor::new(
                "neutral_foundation",
                bonus,
                format!("{neutral_count} neutral color(s) anchor the palette"),
            ));
        }

        let contrast = ContrastTier::from_spread(lightness_spread(&unique));
        let contrast_bonus = contrast_term(resolved.len(), contrast);
        score += contrast_bonus;
        factors.push(ScoringFactor::new(
            "contrast",
            contrast_bonus,
            format!("{contrast:?} contrast across {} item(s)", resolved.len()).to_lowercase(),
        ));

        if unique.len() > COMPLEXITY_FREE_COLORS {
            let penalty = (unique.len() - COMPLEXITY_FREE_COLORS) as f64 * COMPLEXITY_STEP;
            score -= penalty;
            factors.push(ScoringFactor::new(
                "complexity",
                -penalty,
                format!("{} distinct colors is busy", unique.len()),
            ));
        }

        (clamp_score(score), factors)
    }

    fn analogous_pairs(&self, unique: &[ColorInfo]) -> usize {
        let chromatic: Vec<&ColorInfo> = unique.iter().filter(|info| !info.neutral).collect();
        let mut pairs = 0;
        for (i, left) in chromatic.iter().enumerate() {
            for right in &chromatic[i + 1..] {
                if self.model.hue_distance(left, right) <= ANALOGOUS_MAX_DEGREES {
                    pairs += 1;
                }
            }
        }
        pairs
    }

    fn season_alignment_of(&self, resolved: &[ColorInfo]) -> SeasonAlignment {
        let per_season: Vec<(Season, f64)> = Season::SEASONAL
            .into_iter()
            .map(|season| {
                if resolved.is_empty() {
                    return (season, 0.0);
                }
                let palette = self.model.palette(season);
                let hits = resolved.iter().filter(|info| palette.contains(&info.name)).count();
                (season, hits as f64 / resolved.len() as f64 * 100.0)
            })
            .collect();

        let mut best: Option<(Season, f64)> = None;
        for (season, score) in &per_season {
            if best.map(|(_, top)| *score > top).unwrap_or(*score > 0.0) {
                best = Some((*season, *score));
            }
        }

        SeasonAlignment {
            best: best.map(|(season, _)| season),
            score: best.map(|(_, score)| score).unwrap_or(0.0),
            per_season,
        }
    }

    /// Documented stub: only the favorite-color list is consulted.
    fn personal_alignment_of(&self, resolved: &[ColorInfo], favorites: &[String]) -> f64 {
        let favorites: Vec<&'static str> =
            favorites.iter().filter_map(|raw| self.model.normalize(raw)).collect();
        if favorites.is_empty() || resolved.is_empty() {
            return PERSONAL_BASELINE;
        }

        let hits = resolved.iter().filter(|info| favorites.contains(&info.name)).count();
        clamp_score(50.0 + 50.0 * hits as f64 / resolved.len() as f64)
    }

    fn palette_of(&self, resolved: &[ColorInfo]) -> PaletteSummary {
        let unique = distinct(resolved);

        let mut dominant: Option<(&'static str, usize)> = None;
        for info in &unique {
            let count = resolved.iter().filter(|other| other.name == info.name).count();
            if dominant.map(|(_, best)| count > best).unwrap_or(true) {
                dominant = Some((info.name, count));
            }
        }

        let (neutrals, accents): (Vec<&ColorInfo>, Vec<&ColorInfo>) =
            unique.iter().partition(|info| info.neutral);

        let saturation = if accents.is_empty() {
            SaturationTier::Muted
        } else {
            let mean = accents.iter().map(|info| info.hsl.saturation).sum::<f64>() / accents.len() as f64;
            if mean < 35.0 {
                SaturationTier::Muted
            } else if mean < 70.0 {
                SaturationTier::Moderate
            } else {
                SaturationTier::Vivid
            }
        };

        PaletteSummary {
            dominant: dominant.map(|(name, _)| name.to_owned()),
            accents: accents.iter().map(|info| info.name.to_owned()).collect(),
            neutrals: neutrals.iter().map(|info| info.name.to_owned()).collect(),
            temperature: palette_temperature(&unique),
            saturation,
            contrast: ContrastTier::from_spread(lightness_spread(&unique)),
        }
    }
}

fn distinct(resolved: &[ColorInfo]) -> Vec<ColorInfo> {
    let mut unique: Vec<ColorInfo> = Vec::with_capacity(resolved.len());
    for info in resolved {
        if !unique.iter().any(|seen| seen.name == info.name) {
            unique.push(*info);
        }
    }
    unique
}

fn lightness_spread(colors: &[ColorInfo]) -> f64 {
    let max = colors.iter().map(|info| info.hsl.lightness).fold(f64::MIN, f64::max);
    let min = colors.iter().map(|info| info.hsl.lightness).fold(f64::MAX, f64::min);
    if colors.is_empty() {
        0.0
    } else {
        max - min
    }
}

fn contrast_term(item_count: usize, contrast: ContrastTier) -> f64 {
    match (item_count, contrast) {
        (0..=2, _) => 5.0,
        (3..=4, ContrastTier::Medium) => 10.0,
        (3..=4, ContrastTier::High) => 5.0,
        (3..=4, ContrastTier::Low) => 8.0,
        (_, ContrastTier::Low) => 10.0,
        (_, ContrastTier::Medium) => 5.0,
        (_, ContrastTier::High) => 0.0,
    }
}

fn hue_temperature(info: &ColorInfo) -> ColorTemperature {
    if info.neutral {
        return ColorTemperature::Neutral;
    }
    let hue = info.hsl.hue;
    if !(75.0..330.0).contains(&hue) {
        ColorTemperature::Warm
    } else if (150.0..300.0).contains(&hue) {
        ColorTemperature::Cool
    } else {
        ColorTemperature::Neutral
    }
}

/// Majority vote over chromatic colors; neutrals abstain.
fn palette_temperature(unique: &[ColorInfo]) -> ColorTemperature {
    let mut warm = 0;
    let mut cool = 0;
    let mut neutral = 0;
    for info in unique.iter().filter(|info| !info.neutral) {
        match hue_temperature(info) {
            ColorTemperature::Warm => warm += 1,
            ColorTemperature::Cool => cool += 1,
            ColorTemperature::Neutral => neutral += 1,
        }
    }

    if warm > cool && warm > neutral {
        ColorTemperature::Warm
    } else if cool > warm && cool > neutral {
        ColorTemperature::Cool
    } else {
        ColorTemperature::Neutral
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{
        ColorHarmonyAnalyzer, ColorTemperature, ContrastTier, MONOCHROME_SCORE, PERSONAL_BASELINE,
    };
    use crate::domain::garment::Season;
    use crate::taxonomy::ColorModel;

    fn analyzer() -> ColorHarmonyAnalyzer {
        ColorHarmonyAnalyzer::new(Arc::new(ColorModel::standard()))
    }

    #[test]
    fn zero_or_one_distinct_color_is_monochromatic() {
        let analyzer = analyzer();
        let empty: [&str; 0] = [];
        assert_eq!(analyzer.harmony(&empty).0, MONOCHROME_SCORE);
        assert_eq!(analyzer.harmony(&["red"]).0, MONOCHROME_SCORE);
        assert_eq!(analyzer.harmony(&["navy", "Navy Blue", "dark blue"]).0, MONOCHROME_SCORE);
        assert_eq!(analyzer.harmony(&["not-a-color", "teal"]).0, MONOCHROME_SCORE);
    }

    #[test]
    fn complementary_bonus_is_binary() {
        let analyzer = analyzer();
        let (one_pair, factors) = analyzer.harmony(&["red", "green"]);
        let complementary: Vec<_> = factors.iter().filter(|f| f.name == "complementary").collect();
        assert_eq!(complementary.len(), 1);
        assert_eq!(complementary[0].impact, 20.0);
        // red/green: base 50 + 20 + contrast 5.
        assert_eq!(one_pair, 75.0);

        let (_, two_pairs) = analyzer.harmony(&["red", "green", "blue", "orange"]);
        let bonus: f64 =
            two_pairs.iter().filter(|f| f.name == "complementary").map(|f| f.impact).sum();
        assert_eq!(bonus, 20.0);
    }

    #[test]
    fn analogous_bonus_is_capped() {
        let analyzer = analyzer();
        let (_, factors) = analyzer.harmony(&["red", "crimson", "coral", "rust"]);
        let analogous = factors.iter().find(|f| f.name == "analogous").expect("analogous factor");
        assert_eq!(analogous.impact, 15.0);

        let (_, single) = analyzer.harmony(&["red", "crimson"]);
        let analogous = single.iter().find(|f| f.name == "analogous").expect("analogous factor");
        assert_eq!(analogous.impact, 5.0);
    }

    #[test]
    fn navy_and_gold_scores_at_least_seventy() {
        let (score, factors) = analyzer().harmony(&["navy", "gold"]);
        assert!(score >= 70.0, "score was {score}");
        assert!(factors.iter().any(|f| f.name == "complementary"));
    }

    #[test]
    fn five_unrelated_colors_pay_complexity_penalty() {
        let analyzer = analyzer();
        let colors = ["maroon", "lime", "mint", "royal blue", "purple"];
        let (score, factors) = analyzer.harmony(&colors);
        assert!(!factors.iter().any(|f| f.name == "complementary"));
        assert!(!factors.iter().any(|f| f.name == "analogous"));
        assert!(!factors.iter().any(|f| f.name == "neutral_foundation"));
        assert!(score <= 45.0, "score was {score}");
    }

    #[test]
    fn season_alignment_is_full_for_single_palette_subset() {
        let alignment = analyzer().season_alignment(&["rust", "olive", "mustard"]);
        assert_eq!(alignment.best, Some(Season::Autumn));
        assert_eq!(alignment.score, 100.0);
    }

    #[test]
    fn season_alignment_of_empty_palette_has_no_best_season() {
        let empty: [&str; 0] = [];
        let alignment = analyzer().season_alignment(&empty);
        assert_eq!(alignment.best, None);
        assert_eq!(alignment.score, 0.0);
    }

    #[test]
    fn personal_alignment_uses_favorites_or_baseline() {
        let analyzer = analyzer();
        let report = analyzer.analyze(&["navy", "gold"], &[]);
        assert_eq!(report.personal_alignment, PERSONAL_BASELINE);

        let report = analyzer.analyze(&["navy", "gold"], &["Navy".to_owned()]);
        assert_eq!(report.personal_alignment, 75.0);
    }

    #[test]
    fn palette_summary_partitions_and_classifies() {
        let summary =
            analyzer().palette_summary(&["white", "navy", "sky blue", "white", "royal blue"]);
        assert_eq!(summary.dominant.as_deref(), Some("white"));
        assert_eq!(summary.neutrals, vec!["white".to_owned(), "navy".to_owned()]);
        assert_eq!(summary.accents, vec!["sky blue".to_owned(), "royal blue".to_owned()]);
        assert_eq!(summary.contrast, ContrastTier::High);
        assert_eq!(summary.temperature, ColorTemperature::Cool);
    }

    #[test]
    fn suggestions_lead_with_complements_and_add_a_neutral() {
        let suggestions = analyzer().suggest(&["red"]);
        assert_eq!(suggestions.first().map(String::as_str), Some("green"));
        assert!(suggestions.len() <= 5);
        assert!(!suggestions.contains(&"red".to_owned()));
        assert!(suggestions.contains(&"white".to_owned()));
    }

    #[test]
    fn suggestions_skip_neutral_when_palette_has_one() {
        let suggestions = analyzer().suggest(&["black", "red"]);
        assert!(!suggestions.contains(&"white".to_owned()));
        assert!(suggestions.contains(&"green".to_owned()));
    }

    #[test]
    fn empty_palette_suggests_neutrals() {
        let empty: [&str; 0] = [];
        assert_eq!(analyzer().suggest(&empty), vec!["white", "black", "gray", "beige", "navy"]);
    }
}
