//! Hard filters applied before combination. Every removal carries a reason.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::context::Context;
use crate::domain::garment::{Category, GarmentId, Occasion, Season};
use crate::domain::outfit::OutfitItem;
use crate::taxonomy::KeywordText;

/// Below this temperature, open and skimpy pieces are removed.
pub const COLD_CUTOFF_C: f64 = 5.0;
/// At or above this temperature, heavy insulation is removed.
pub const HOT_CUTOFF_C: f64 = 28.0;

const COLD_UNSUITABLE: &[&str] = &[
    "sandal", "flip flop", "tank top", "tank", "shorts", "swimsuit", "swimwear", "bikini", "crop top",
];
const HOT_UNSUITABLE: &[&str] = &[
    "parka", "puffer", "down jacket", "down coat", "thermal", "fleece", "wool coat", "turtleneck",
];
const HOT_UNSUITABLE_MATERIALS: &[&str] = &["down", "thermal", "fleece"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionReason {
    SeasonConflict { season: Season },
    OccasionConflict { garment: Occasion, requested: Occasion },
    ForbiddenCategory { category: Category },
    OverBudget { value: Decimal, ceiling: Decimal },
    TooCold { temperature_c: f64, keyword: String },
    TooHot { temperature_c: f64, keyword: String },
}

impl ExclusionReason {
    pub fn describe(&self) -> String {
        match self {
            Self::SeasonConflict { season } => format!("not worn in {}", season.as_str()),
            Self::OccasionConflict { garment, requested } => {
                format!("{garment} piece does not suit {requested}")
            }
            Self::ForbiddenCategory { category } => format!("{category} is excluded"),
            Self::OverBudget { value, ceiling } => format!("value {value} exceeds budget {ceiling}"),
            Self::TooCold { temperature_c, keyword } => {
                format!("{keyword} is unsuitable below {COLD_CUTOFF_C}°C (now {temperature_c}°C)")
            }
            Self::TooHot { temperature_c, keyword } => {
                format!("{keyword} is unsuitable at {HOT_CUTOFF_C}°C and above (now {temperature_c}°C)")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    pub garment_id: GarmentId,
    pub reason: ExclusionReason,
}

/// Split items into survivors and recorded exclusions. The first failing
/// check decides the reason.
pub fn apply_hard_filters(items: Vec<OutfitItem>, context: &Context) -> (Vec<OutfitItem>, Vec<Exclusion>) {
    let mut kept = Vec::with_capacity(items.len());
    let mut excluded = Vec::new();

    for item in items {
        match exclusion_reason(&item, context) {
            Some(reason) => excluded.push(Exclusion { garment_id: item.garment.id.clone(), reason }),
            None => kept.push(item),
        }
    }

    (kept, excluded)
}

fn exclusion_reason(item: &OutfitItem, context: &Context) -> Option<ExclusionReason> {
    let garment = &item.garment;

    if let Some(season) = context.season {
        if !garment.suits_season(season) {
            return Some(ExclusionReason::SeasonConflict { season });
        }
    }

    if let (Some(requested), Some(own)) = (context.occasion, garment.occasion) {
        if !own.compatible_with(requested) {
            return Some(ExclusionReason::OccasionConflict { garment: own, requested });
        }
    }

    if context.constraints.forbidden_categories.contains(&item.category) {
        return Some(ExclusionReason::ForbiddenCategory { category: item.category });
    }

    if let (Some(ceiling), Some(value)) = (context.constraints.budget_ceiling, garment.value) {
        if value > ceiling {
            return Some(ExclusionReason::OverBudget { value, ceiling });
        }
    }

    let temperature_c = context.temperature()?;
    let text = KeywordText::new(&garment.classification_text());
    if temperature_c < COLD_CUTOFF_C {
        if let Some(keyword) = text.first_match(COLD_UNSUITABLE) {
            return Some(ExclusionReason::TooCold { temperature_c, keyword: keyword.to_owned() });
        }
    }
    if temperature_c >= HOT_CUTOFF_C {
        let material = KeywordText::new(garment.material.as_deref().unwrap_or_default());
        let keyword = text.first_match(HOT_UNSUITABLE).or_else(|| material.first_match(HOT_UNSUITABLE_MATERIALS));
        if let Some(keyword) = keyword {
            return Some(ExclusionReason::TooHot { temperature_c, keyword: keyword.to_owned() });
        }
    }

    None
}
