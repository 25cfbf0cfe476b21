use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::garment::{Category, Garment, GarmentId, Occasion, Season};

/// Atomic unit of explanation: a named, signed contribution to a sub-score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringFactor {
    pub name: String,
    pub impact: f64,
    pub description: String,
}

impl ScoringFactor {
    pub fn new(name: impl Into<String>, impact: f64, description: impl Into<String>) -> Self {
        Self { name: name.into(), impact, description: description.into() }
    }
}

/// Clamp a score into the closed 0-100 band every sub-score lives in.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSlot {
    Base,
    Middle,
    Outer,
    Feet,
    Accessories,
}

impl LayerSlot {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Base | Category::Top | Category::Bottom => Self::Base,
            Category::Layering => Self::Middle,
            Category::Outerwear => Self::Outer,
            Category::Footwear => Self::Feet,
            Category::Accessory => Self::Accessories,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OutfitLayers {
    pub base: Vec<GarmentId>,
    pub middle: Vec<GarmentId>,
    pub outer: Vec<GarmentId>,
    pub feet: Vec<GarmentId>,
    pub accessories: Vec<GarmentId>,
}

impl OutfitLayers {
    pub fn push(&mut self, slot: LayerSlot, id: GarmentId) {
        match slot {
            LayerSlot::Base => self.base.push(id),
            LayerSlot::Middle => self.middle.push(id),
            LayerSlot::Outer => self.outer.push(id),
            LayerSlot::Feet => self.feet.push(id),
            LayerSlot::Accessories => self.accessories.push(id),
        }
    }

    /// Number of torso layers present (base, middle, outer).
    pub fn torso_layer_count(&self) -> usize {
        [&self.base, &self.middle, &self.outer].iter().filter(|slot| !slot.is_empty()).count()
    }

    pub fn has(&self, slot: LayerSlot) -> bool {
        match slot {
            LayerSlot::Base => !self.base.is_empty(),
            LayerSlot::Middle => !self.middle.is_empty(),
            LayerSlot::Outer => !self.outer.is_empty(),
            LayerSlot::Feet => !self.feet.is_empty(),
            LayerSlot::Accessories => !self.accessories.is_empty(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateSource {
    Template { name: String },
    Creative { attempt: usize },
}

impl CandidateSource {
    pub fn label(&self) -> String {
        match self {
            Self::Template { name } => name.clone(),
            Self::Creative { attempt } => format!("creative-{attempt}"),
        }
    }
}

/// A garment paired with the category it was classified into for this pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutfitItem {
    pub category: Category,
    pub garment: Garment,
}

/// A provisional outfit produced by the generator, before scoring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateOutfit {
    pub id: Uuid,
    pub items: Vec<OutfitItem>,
    pub layers: OutfitLayers,
    pub source: CandidateSource,
    pub occasion_range: Vec<Occasion>,
    pub season_range: Vec<Season>,
}

impl CandidateOutfit {
    pub fn assemble(items: Vec<OutfitItem>, source: CandidateSource) -> Self {
        let mut layers = OutfitLayers::default();
        for item in &items {
            layers.push(LayerSlot::for_category(item.category), item.garment.id.clone());
        }

        let occasion_range = occasion_range(&items);
        let season_range = season_range(&items);

        Self { id: outfit_id(&items), items, layers, source, occasion_range, season_range }
    }

    pub fn garments(&self) -> impl Iterator<Item = &Garment> {
        self.items.iter().map(|item| &item.garment)
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.items.iter().map(|item| item.category)
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.items.iter().any(|item| item.category == category)
    }

    pub fn colors(&self) -> Vec<String> {
        self.garments().filter_map(|garment| garment.color.clone()).collect()
    }

    /// Order-independent identity of the garment set.
    pub fn garment_key(&self) -> BTreeSet<GarmentId> {
        self.garments().map(|garment| garment.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Deterministic v5 id over the sorted garment ids.
pub fn outfit_id(items: &[OutfitItem]) -> Uuid {
    let mut ids: Vec<&str> = items.iter().map(|item| item.garment.id.0.as_str()).collect();
    ids.sort_unstable();
    Uuid::new_v5(&Uuid::NAMESPACE_OID, ids.join("|").as_bytes())
}

fn occasion_range(items: &[OutfitItem]) -> Vec<Occasion> {
    Occasion::SPECIFIC
        .into_iter()
        .filter(|occasion| {
            items.iter().all(|item| {
                item.garment.occasion.map(|own| own.compatible_with(*occasion)).unwrap_or(true)
            })
        })
        .collect()
}

fn season_range(items: &[OutfitItem]) -> Vec<Season> {
    Season::SEASONAL
        .into_iter()
        .filter(|season| items.iter().all(|item| item.garment.suits_season(*season)))
        .collect()
}
