//! Outfit templates and their contextual gates.

use crate::domain::context::Context;
use crate::domain::garment::{Category, Occasion};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemplateGate {
    Always,
    /// Applies when the temperature is known and inside [min, max).
    Temperature { min_c: f64, max_c: f64 },
    /// Applies when the context occasion is one of these. `None` in the list
    /// means "no occasion given".
    Occasions(&'static [Option<Occasion>]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutfitTemplate {
    pub name: &'static str,
    pub required: &'static [Category],
    pub optional: &'static [Category],
    pub gate: TemplateGate,
}

impl OutfitTemplate {
    pub fn applies_to(&self, context: &Context) -> bool {
        match self.gate {
            TemplateGate::Always => true,
            TemplateGate::Temperature { min_c, max_c } => context
                .temperature()
                .map(|temperature| temperature >= min_c && temperature < max_c)
                .unwrap_or(false),
            TemplateGate::Occasions(occasions) => occasions.contains(&context.occasion),
        }
    }

    /// Slots in build order: required first, then optional.
    pub fn slots(&self) -> Vec<(Category, bool)> {
        self.required
            .iter()
            .map(|category| (*category, true))
            .chain(self.optional.iter().map(|category| (*category, false)))
            .collect()
    }
}

pub const TEMPLATES: &[OutfitTemplate] = &[
    OutfitTemplate {
        name: "basic",
        required: &[Category::Top, Category::Bottom],
        optional: &[Category::Footwear],
        gate: TemplateGate::Always,
    },
    OutfitTemplate {
        name: "layered-warm",
        required: &[Category::Top, Category::Bottom, Category::Outerwear],
        optional: &[Category::Base, Category::Layering, Category::Footwear, Category::Accessory],
        gate: TemplateGate::Temperature { min_c: f64::NEG_INFINITY, max_c: 15.0 },
    },
    OutfitTemplate {
        name: "light-layer",
        required: &[Category::Top, Category::Bottom, Category::Layering],
        optional: &[Category::Footwear],
        gate: TemplateGate::Temperature { min_c: 15.0, max_c: 25.0 },
    },
    OutfitTemplate {
        name: "professional",
        required: &[Category::Top, Category::Bottom, Category::Footwear],
        optional: &[Category::Outerwear],
        gate: TemplateGate::Occasions(&[Some(Occasion::Work), Some(Occasion::Formal)]),
    },
    OutfitTemplate {
        name: "casual-comfort",
        required: &[Category::Top, Category::Bottom],
        optional: &[Category::Layering, Category::Footwear, Category::Accessory],
        gate: TemplateGate::Occasions(&[
            None,
            Some(Occasion::Casual),
            Some(Occasion::Lounge),
            Some(Occasion::Outdoor),
            Some(Occasion::Date),
            Some(Occasion::Sport),
        ]),
    },
];

pub fn applicable_templates(context: &Context) -> Vec<&'static OutfitTemplate> {
    TEMPLATES.iter().filter(|template| template.applies_to(context)).collect()
}
