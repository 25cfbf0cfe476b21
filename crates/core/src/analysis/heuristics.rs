//! Secondary sub-scores: occasion fit, comfort, trendiness, sustainability,
//! and versatility.
//!
//! Trendiness and sustainability are fixed heuristics with deterministic
//! contracts, not data-driven signals.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::garment::{Condition, Occasion, Season};
use crate::domain::outfit::{clamp_score, CandidateOutfit, OutfitItem, ScoringFactor};
use crate::taxonomy::{KeywordText, WeatherTaxonomy};

pub const NO_OCCASION_SCORE: f64 = 50.0;
pub const TRENDINESS_BASELINE: f64 = 60.0;
pub const SUSTAINABILITY_BASELINE: f64 = 60.0;
const UNKNOWN_COMFORT: f64 = 50.0;
const COMFORT_KEYWORD_BONUS: f64 = 5.0;
const RESTRICTIVE_KEYWORD_PENALTY: f64 = 8.0;
const SUSTAINABLE_STEP: f64 = 5.0;
const SUSTAINABLE_CAP: f64 = 20.0;
const GOOD_CONDITION_BONUS: f64 = 10.0;

const COMFORT_KEYWORDS: &[&str] =
    &["relaxed", "stretch", "soft", "jogger", "sneaker", "oversized", "lounge", "knit", "jersey", "elastic"];
const RESTRICTIVE_KEYWORDS: &[&str] =
    &["stiletto", "necktie", "corset", "skinny", "bodycon", "heel", "starched", "pencil skirt"];
const SUSTAINABLE_KEYWORDS: &[&str] =
    &["organic", "recycled", "vintage", "secondhand", "second hand", "upcycled", "thrifted", "deadstock"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeuristicScore {
    pub score: f64,
    pub factors: Vec<ScoringFactor>,
}

impl HeuristicScore {
    fn new(score: f64, factors: Vec<ScoringFactor>) -> Self {
        Self { score: clamp_score(score), factors }
    }
}

#[derive(Debug, Clone)]
pub struct HeuristicScorer {
    weather: Arc<WeatherTaxonomy>,
}

impl HeuristicScorer {
    pub fn new(weather: Arc<WeatherTaxonomy>) -> Self {
        Self { weather }
    }

    /// Per item: 1.0 exact, 0.5 compatible, versatile, or unknown, 0 on conflict.
    pub fn occasion_fit(&self, items: &[OutfitItem], occasion: Option<Occasion>) -> HeuristicScore {
        let Some(requested) = occasion else {
            return HeuristicScore::new(
                NO_OCCASION_SCORE,
                vec![ScoringFactor::new("occasion_unspecified", 0.0, "no occasion requested")],
            );
        };
        if items.is_empty() {
            return HeuristicScore::new(NO_OCCASION_SCORE, Vec::new());
        }

        let mut exact = 0;
        let mut conflicts = Vec::new();
        let total: f64 = items
            .iter()
            .map(|item| match item.garment.occasion {
                Some(own) if own == requested => {
                    exact += 1;
                    1.0
                }
                Some(own) if own.compatible_with(requested) => 0.5,
                Some(_) => {
                    conflicts.push(item.garment.name.clone());
                    0.0
                }
                None => 0.5,
            })
            .sum();

        let mut factors = vec![ScoringFactor::new(
            "occasion_match",
            exact as f64,
            format!("{exact} of {} piece(s) made for {requested}", items.len()),
        )];
        if !conflicts.is_empty() {
            factors.push(ScoringFactor::new(
                "occasion_conflict",
                -(conflicts.len() as f64),
                format!("{} clash with {requested}", conflicts.join(", ")),
            ));
        }

        HeuristicScore::new(total / items.len() as f64 * 100.0, factors)
    }

    pub fn comfort(&self, items: &[OutfitItem]) -> HeuristicScore {
        let comforts: Vec<f64> = items
            .iter()
            .filter_map(|item| item.garment.material.as_deref())
            .filter_map(|material| self.weather.material_for(material))
            .map(|profile| profile.comfort)
            .collect();
        let base = if comforts.is_empty() {
            UNKNOWN_COMFORT
        } else {
            comforts.iter().sum::<f64>() / comforts.len() as f64
        };

        let texts: Vec<KeywordText> =
            items.iter().map(|item| KeywordText::new(&item.garment.descriptive_text())).collect();
        let comfy = texts.iter().filter(|text| text.contains_any(COMFORT_KEYWORDS)).count();
        let restrictive = texts.iter().filter(|text| text.contains_any(RESTRICTIVE_KEYWORDS)).count();

        let mut factors =
            vec![ScoringFactor::new("material_comfort", base, format!("{} material(s) rated", comforts.len()))];
        if comfy > 0 {
            factors.push(ScoringFactor::new(
                "comfort_details",
                comfy as f64 * COMFORT_KEYWORD_BONUS,
                format!("{comfy} relaxed or stretch piece(s)"),
            ));
        }
        if restrictive > 0 {
            factors.push(ScoringFactor::new(
                "restrictive_details",
                -(restrictive as f64 * RESTRICTIVE_KEYWORD_PENALTY),
                format!("{restrictive} restrictive piece(s)"),
            ));
        }

        let score = base + comfy as f64 * COMFORT_KEYWORD_BONUS
            - restrictive as f64 * RESTRICTIVE_KEYWORD_PENALTY;
        HeuristicScore::new(score, factors)
    }

    /// Constant baseline. No trend data source is consulted.
    pub fn trendiness(&self, _items: &[OutfitItem]) -> HeuristicScore {
        HeuristicScore::new(
            TRENDINESS_BASELINE,
            vec![ScoringFactor::new("trend_baseline", TRENDINESS_BASELINE, "fixed baseline, no trend signal")],
        )
    }

    pub fn sustainability(&self, items: &[OutfitItem]) -> HeuristicScore {
        let sustainable = items
            .iter()
            .filter(|item| KeywordText::new(&item.garment.descriptive_text()).contains_any(SUSTAINABLE_KEYWORDS))
            .count();
        let bonus = (sustainable as f64 * SUSTAINABLE_STEP).min(SUSTAINABLE_CAP);

        let mut factors = Vec::new();
        if bonus > 0.0 {
            factors.push(ScoringFactor::new(
                "sustainable_pieces",
                bonus,
                format!("{sustainable} organic, recycled, or pre-loved piece(s)"),
            ));
        }

        let mut score = SUSTAINABILITY_BASELINE + bonus;
        if !items.is_empty() {
            let average = items.iter().map(|item| item.garment.condition.score()).sum::<f64>()
                / items.len() as f64;
            if average >= Condition::Good.score() {
                score += GOOD_CONDITION_BONUS;
                factors.push(ScoringFactor::new(
                    "well_kept",
                    GOOD_CONDITION_BONUS,
                    format!("average condition {average:.0} keeps pieces in rotation"),
                ));
            }
        }

        HeuristicScore::new(score, factors)
    }

    /// Breadth of occasions and seasons the whole outfit still suits.
    pub fn versatility(&self, candidate: &CandidateOutfit) -> HeuristicScore {
        let occasions = candidate.occasion_range.len() as f64 / Occasion::SPECIFIC.len() as f64;
        let seasons = candidate.season_range.len() as f64 / Season::SEASONAL.len() as f64;
        HeuristicScore::new(
            occasions * 50.0 + seasons * 50.0,
            vec![
                ScoringFactor::new(
                    "occasion_breadth",
                    occasions * 50.0,
                    format!("works for {} occasion(s)", candidate.occasion_range.len()),
                ),
                ScoringFactor::new(
                    "season_breadth",
                    seasons * 50.0,
                    format!("works in {} season(s)", candidate.season_range.len()),
                ),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{HeuristicScorer, NO_OCCASION_SCORE, TRENDINESS_BASELINE};
    use crate::domain::garment::{Category, Condition, Garment, Occasion, Season};
    use crate::domain::outfit::{CandidateOutfit, CandidateSource, OutfitItem};
    use crate::taxonomy::WeatherTaxonomy;

    fn scorer() -> HeuristicScorer {
        HeuristicScorer::new(Arc::new(WeatherTaxonomy::standard()))
    }

    fn item(category: Category, garment: Garment) -> OutfitItem {
        OutfitItem { category, garment }
    }

    #[test]
    fn occasion_fit_scores_exact_compatible_and_conflicting_items() {
        let items = [
            item(Category::Top, Garment::new("a", "Shirt", "top").with_occasion(Occasion::Work)),
            item(Category::Bottom, Garment::new("b", "Trousers", "bottom").with_occasion(Occasion::Formal)),
            item(Category::Footwear, Garment::new("c", "Trainers", "shoes").with_occasion(Occasion::Sport)),
            item(Category::Accessory, Garment::new("d", "Belt", "accessory")),
        ];
        let fit = scorer().occasion_fit(&items, Some(Occasion::Work));
        // (1.0 + 0.5 + 0.0 + 0.5) / 4
        assert_eq!(fit.score, 50.0);
        assert!(fit.factors.iter().any(|f| f.name == "occasion_conflict"));

        assert_eq!(scorer().occasion_fit(&items, None).score, NO_OCCASION_SCORE);
    }

    #[test]
    fn comfort_blends_materials_and_keywords() {
        let scorer = scorer();
        let relaxed = [item(Category::Bottom, Garment::new("j", "Relaxed jogger", "bottom").with_material("cotton"))];
        assert_eq!(scorer.comfort(&relaxed).score, 90.0);

        let formal = [item(Category::Footwear, Garment::new("h", "Stiletto heel", "shoes"))];
        assert_eq!(scorer.comfort(&formal).score, 42.0);
    }

    #[test]
    fn trendiness_is_constant() {
        assert_eq!(scorer().trendiness(&[]).score, TRENDINESS_BASELINE);
    }

    #[test]
    fn sustainability_rewards_preloved_pieces_and_condition() {
        let scorer = scorer();
        let items = [
            item(Category::Top, Garment::new("a", "Vintage tee", "top")),
            item(
                Category::Bottom,
                Garment::new("b", "Jeans", "bottom").with_tags(vec!["recycled".to_owned()]),
            ),
        ];
        assert_eq!(scorer.sustainability(&items).score, 80.0);

        let worn = [item(Category::Top, Garment::new("w", "Tee", "top").with_condition(Condition::Worn))];
        assert_eq!(scorer.sustainability(&worn).score, 60.0);
    }

    #[test]
    fn versatility_reflects_occasion_and_season_breadth() {
        let candidate = CandidateOutfit::assemble(
            vec![
                item(Category::Top, Garment::new("a", "Tee", "top")),
                item(Category::Bottom, Garment::new("b", "Jeans", "bottom")),
            ],
            CandidateSource::Template { name: "basic".to_owned() },
        );
        assert_eq!(scorer().versatility(&candidate).score, 100.0);

        let narrow = CandidateOutfit::assemble(
            vec![item(
                Category::Top,
                Garment::new("a", "Gown", "top").with_occasion(Occasion::Formal).with_seasons(vec![Season::Winter]),
            )],
            CandidateSource::Template { name: "basic".to_owned() },
        );
        assert!(scorer().versatility(&narrow).score < 40.0);
    }
}
