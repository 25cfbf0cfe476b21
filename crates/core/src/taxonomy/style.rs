use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::normalize_phrase;
use crate::domain::garment::Category;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Minimalist,
    Bohemian,
    Classic,
    Edgy,
    Romantic,
    Sporty,
    Trendy,
}

impl Archetype {
    pub const ALL: [Archetype; 7] = [
        Archetype::Minimalist,
        Archetype::Bohemian,
        Archetype::Classic,
        Archetype::Edgy,
        Archetype::Romantic,
        Archetype::Sporty,
        Archetype::Trendy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimalist => "minimalist",
            Self::Bohemian => "bohemian",
            Self::Classic => "classic",
            Self::Edgy => "edgy",
            Self::Romantic => "romantic",
            Self::Sporty => "sporty",
            Self::Trendy => "trendy",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|archetype| archetype.as_str() == value)
    }

    fn index(&self) -> usize {
        match self {
            Self::Minimalist => 0,
            Self::Bohemian => 1,
            Self::Classic => 2,
            Self::Edgy => 3,
            Self::Romantic => 4,
            Self::Sporty => 5,
            Self::Trendy => 6,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandTier {
    Luxury,
    Designer,
    Premium,
    Contemporary,
    HighStreet,
    Athletic,
    Heritage,
}

impl BrandTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Luxury => "luxury",
            Self::Designer => "designer",
            Self::Premium => "premium",
            Self::Contemporary => "contemporary",
            Self::HighStreet => "high_street",
            Self::Athletic => "athletic",
            Self::Heritage => "heritage",
        }
    }
}

/// Fixed characteristic data for one archetype.
#[derive(Debug, Clone)]
pub struct StyleArchetype {
    pub archetype: Archetype,
    pub keywords: &'static [&'static str],
    pub preferred_categories: &'static [&'static str],
    pub avoided_categories: &'static [&'static str],
    pub preferred_materials: &'static [&'static str],
    pub palette: &'static [&'static str],
    pub formality: u8,
    pub boldness: u8,
    pub creativity: u8,
    brand_affinity: &'static [(BrandTier, f64)],
}

impl StyleArchetype {
    /// Archetype-specific score for a brand tier; 50 when the tier has no entry.
    pub fn brand_bonus(&self, tier: BrandTier) -> f64 {
        self.brand_affinity
            .iter()
            .find(|(candidate, _)| *candidate == tier)
            .map(|(_, score)| *score)
            .unwrap_or(50.0)
    }

    pub fn palette_contains(&self, color: &str) -> bool {
        self.palette.contains(&color)
    }
}

const ARCHETYPES: [StyleArchetype; 7] = [
    StyleArchetype {
        archetype: Archetype::Minimalist,
        keywords: &["minimal", "clean", "simple", "tailored", "structured", "monochrome", "essential"],
        preferred_categories: &[
            "tee", "t shirt", "shirt", "trouser", "blazer", "coat", "sweater", "loafer", "sneaker",
            "turtleneck", "slip dress",
        ],
        avoided_categories: &["ruffle", "fringe", "sequin", "graphic", "print", "embellished", "lace"],
        preferred_materials: &["cotton", "wool", "cashmere", "linen", "silk"],
        palette: &["black", "white", "gray", "charcoal", "beige", "navy", "ivory", "camel", "cream"],
        formality: 60,
        boldness: 15,
        creativity: 30,
        brand_affinity: &[
            (BrandTier::Contemporary, 85.0),
            (BrandTier::Designer, 75.0),
            (BrandTier::Premium, 70.0),
            (BrandTier::Luxury, 70.0),
            (BrandTier::HighStreet, 55.0),
            (BrandTier::Heritage, 55.0),
            (BrandTier::Athletic, 40.0),
        ],
    },
    StyleArchetype {
        archetype: Archetype::Bohemian,
        keywords: &["boho", "flowy", "fringe", "embroidered", "crochet", "peasant", "paisley", "floral", "tassel"],
        preferred_categories: &[
            "maxi", "peasant", "kimono", "tunic", "skirt", "sandal", "cardigan", "fringe", "crochet",
            "wide leg",
        ],
        avoided_categories: &["blazer", "suit", "tie", "structured", "oxford"],
        preferred_materials: &["linen", "cotton", "suede", "crochet", "rayon"],
        palette: &["rust", "mustard", "olive", "cream", "brown", "tan", "coral", "turquoise", "burgundy"],
        formality: 30,
        boldness: 55,
        creativity: 80,
        brand_affinity: &[
            (BrandTier::Contemporary, 80.0),
            (BrandTier::Heritage, 70.0),
            (BrandTier::HighStreet, 60.0),
            (BrandTier::Designer, 55.0),
            (BrandTier::Premium, 50.0),
            (BrandTier::Luxury, 45.0),
            (BrandTier::Athletic, 30.0),
        ],
    },
    StyleArchetype {
        archetype: Archetype::Classic,
        keywords: &["classic", "timeless", "tailored", "preppy", "polished", "traditional"],
        preferred_categories: &[
            "blazer", "trench", "oxford", "loafer", "trouser", "chino", "cardigan", "polo",
            "button down", "pencil skirt", "shirt", "coat",
        ],
        avoided_categories: &["ripped", "distressed", "graphic", "neon", "crop"],
        preferred_materials: &["wool", "cotton", "cashmere", "tweed", "leather"],
        palette: &["navy", "white", "camel", "black", "burgundy", "gray", "cream", "beige", "khaki"],
        formality: 75,
        boldness: 25,
        creativity: 30,
        brand_affinity: &[
            (BrandTier::Premium, 90.0),
            (BrandTier::Luxury, 80.0),
            (BrandTier::Heritage, 75.0),
            (BrandTier::Contemporary, 65.0),
            (BrandTier::Designer, 55.0),
            (BrandTier::HighStreet, 50.0),
            (BrandTier::Athletic, 30.0),
        ],
    },
    StyleArchetype {
        archetype: Archetype::Edgy,
        keywords: &["leather", "studded", "distressed", "ripped", "grunge", "punk", "moto", "combat", "chain", "biker"],
        preferred_categories: &[
            "leather jacket", "jacket", "boot", "jean", "graphic tee", "moto", "combat", "hoodie",
        ],
        avoided_categories: &["floral", "ruffle", "pastel", "pleated", "lace"],
        preferred_materials: &["leather", "denim", "suede", "mesh"],
        palette: &["black", "charcoal", "burgundy", "white", "gray", "crimson", "denim"],
        formality: 35,
        boldness: 85,
        creativity: 70,
        brand_affinity: &[
            (BrandTier::Designer, 85.0),
            (BrandTier::Heritage, 70.0),
            (BrandTier::Contemporary, 65.0),
            (BrandTier::Luxury, 60.0),
            (BrandTier::HighStreet, 55.0),
            (BrandTier::Athletic, 45.0),
            (BrandTier::Premium, 40.0),
        ],
    },
    StyleArchetype {
        archetype: Archetype::Romantic,
        keywords: &["lace", "ruffle", "floral", "feminine", "delicate", "soft", "bow", "pleated", "satin"],
        preferred_categories: &["blouse", "dress", "skirt", "cardigan", "ballet flat", "heel", "lace", "midi"],
        avoided_categories: &["combat", "cargo", "utility", "hoodie", "sweatpant"],
        preferred_materials: &["silk", "satin", "chiffon", "lace", "cashmere"],
        palette: &["blush", "pink", "lavender", "ivory", "cream", "mint", "sky blue", "peach"],
        formality: 55,
        boldness: 35,
        creativity: 55,
        brand_affinity: &[
            (BrandTier::Contemporary, 85.0),
            (BrandTier::Luxury, 70.0),
            (BrandTier::Premium, 65.0),
            (BrandTier::Designer, 60.0),
            (BrandTier::HighStreet, 60.0),
            (BrandTier::Heritage, 45.0),
            (BrandTier::Athletic, 25.0),
        ],
    },
    StyleArchetype {
        archetype: Archetype::Sporty,
        keywords: &["athletic", "performance", "active", "track", "sport", "technical", "running", "gym"],
        preferred_categories: &[
            "sneaker", "legging", "jogger", "hoodie", "tank", "track", "windbreaker", "sweatshirt",
            "short", "cap",
        ],
        avoided_categories: &["heel", "blazer", "silk", "suit", "loafer"],
        preferred_materials: &["polyester", "nylon", "spandex", "mesh", "fleece"],
        palette: &["black", "white", "gray", "navy", "red", "royal blue", "lime", "cobalt"],
        formality: 15,
        boldness: 50,
        creativity: 35,
        brand_affinity: &[
            (BrandTier::Athletic, 95.0),
            (BrandTier::HighStreet, 60.0),
            (BrandTier::Contemporary, 50.0),
            (BrandTier::Premium, 45.0),
            (BrandTier::Heritage, 45.0),
            (BrandTier::Designer, 40.0),
            (BrandTier::Luxury, 35.0),
        ],
    },
    StyleArchetype {
        archetype: Archetype::Trendy,
        keywords: &["trendy", "statement", "oversized", "cropped", "platform", "chunky", "neon", "y2k", "cutout", "metallic"],
        preferred_categories: &[
            "crop top", "oversized", "platform", "chunky sneaker", "cargo", "mini skirt", "statement",
            "bag",
        ],
        avoided_categories: &["twinset", "tunic", "capri"],
        preferred_materials: &["vinyl", "satin", "mesh", "denim", "nylon"],
        palette: &["fuchsia", "lime", "lavender", "cobalt", "orange", "mint", "black", "white"],
        formality: 40,
        boldness: 80,
        creativity: 85,
        brand_affinity: &[
            (BrandTier::HighStreet, 85.0),
            (BrandTier::Designer, 80.0),
            (BrandTier::Contemporary, 70.0),
            (BrandTier::Luxury, 65.0),
            (BrandTier::Athletic, 60.0),
            (BrandTier::Premium, 45.0),
            (BrandTier::Heritage, 45.0),
        ],
    },
];

const BRAND_TIER_SEEDS: &[(&str, BrandTier)] = &[
    ("gucci", BrandTier::Luxury),
    ("prada", BrandTier::Luxury),
    ("chanel", BrandTier::Luxury),
    ("hermes", BrandTier::Luxury),
    ("saint laurent", BrandTier::Luxury),
    ("burberry", BrandTier::Luxury),
    ("acne studios", BrandTier::Designer),
    ("comme des garcons", BrandTier::Designer),
    ("rick owens", BrandTier::Designer),
    ("ganni", BrandTier::Designer),
    ("ralph lauren", BrandTier::Premium),
    ("brooks brothers", BrandTier::Premium),
    ("j crew", BrandTier::Premium),
    ("theory", BrandTier::Premium),
    ("cos", BrandTier::Contemporary),
    ("everlane", BrandTier::Contemporary),
    ("sandro", BrandTier::Contemporary),
    ("reformation", BrandTier::Contemporary),
    ("free people", BrandTier::Contemporary),
    ("allsaints", BrandTier::Contemporary),
    ("zara", BrandTier::HighStreet),
    ("h&m", BrandTier::HighStreet),
    ("uniqlo", BrandTier::HighStreet),
    ("mango", BrandTier::HighStreet),
    ("topshop", BrandTier::HighStreet),
    ("nike", BrandTier::Athletic),
    ("adidas", BrandTier::Athletic),
    ("lululemon", BrandTier::Athletic),
    ("puma", BrandTier::Athletic),
    ("new balance", BrandTier::Athletic),
    ("levi's", BrandTier::Heritage),
    ("dr. martens", BrandTier::Heritage),
    ("barbour", BrandTier::Heritage),
    ("patagonia", BrandTier::Heritage),
];

const FORMALITY_KEYWORDS: &[(&str, f64)] = &[
    ("gown", 100.0),
    ("tuxedo", 100.0),
    ("suit", 95.0),
    ("tie", 90.0),
    ("blazer", 85.0),
    ("dress shirt", 80.0),
    ("heel", 80.0),
    ("oxford", 80.0),
    ("pencil skirt", 75.0),
    ("loafer", 75.0),
    ("trench", 75.0),
    ("blouse", 70.0),
    ("trouser", 70.0),
    ("dress", 70.0),
    ("chino", 60.0),
    ("polo", 55.0),
    ("cardigan", 55.0),
    ("sweater", 50.0),
    ("jean", 35.0),
    ("t shirt", 25.0),
    ("tee", 25.0),
    ("sneaker", 25.0),
    ("sandal", 20.0),
    ("hoodie", 15.0),
    ("shorts", 15.0),
    ("tank", 15.0),
    ("jogger", 10.0),
    ("sweatpant", 10.0),
];

/// Garment-keyword formality when no keyword matches.
pub const DEFAULT_FORMALITY: f64 = 40.0;

/// Seven archetypes, the brand-tier table, and category importance weights.
#[derive(Debug, Clone)]
pub struct StyleTaxonomy {
    archetypes: Vec<StyleArchetype>,
    brands: HashMap<String, BrandTier>,
}

impl StyleTaxonomy {
    pub fn standard() -> Self {
        let brands = BRAND_TIER_SEEDS
            .iter()
            .map(|(brand, tier)| (normalize_phrase(brand), *tier))
            .collect();

        Self { archetypes: ARCHETYPES.to_vec(), brands }
    }

    pub fn archetype(&self, archetype: Archetype) -> &StyleArchetype {
        &self.archetypes[archetype.index()]
    }

    pub fn archetypes(&self) -> impl Iterator<Item = &StyleArchetype> + '_ {
        self.archetypes.iter()
    }

    pub fn brand_tier(&self, brand: &str) -> Option<BrandTier> {
        self.brands.get(&normalize_phrase(brand)).copied()
    }

    pub fn category_weight(&self, category: Category) -> f64 {
        match category {
            Category::Top => 1.2,
            Category::Outerwear => 1.1,
            Category::Bottom => 1.0,
            Category::Footwear => 0.9,
            Category::Layering => 0.8,
            Category::Base => 0.7,
            Category::Accessory => 0.6,
        }
    }

    pub fn formality_keywords(&self) -> &'static [(&'static str, f64)] {
        FORMALITY_KEYWORDS
    }
}

impl Default for StyleTaxonomy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::{Archetype, BrandTier, StyleTaxonomy};
    use crate::taxonomy::ColorModel;

    #[test]
    fn archetype_lookup_is_total_and_ordered() {
        let taxonomy = StyleTaxonomy::standard();
        for archetype in Archetype::ALL {
            assert_eq!(taxonomy.archetype(archetype).archetype, archetype);
        }
        assert_eq!(taxonomy.archetypes().count(), 7);
    }

    #[test]
    fn brand_tier_lookup_normalizes_punctuation() {
        let taxonomy = StyleTaxonomy::standard();
        assert_eq!(taxonomy.brand_tier("Levi's"), Some(BrandTier::Heritage));
        assert_eq!(taxonomy.brand_tier("H&M"), Some(BrandTier::HighStreet));
        assert_eq!(taxonomy.brand_tier("Dr Martens"), Some(BrandTier::Heritage));
        assert_eq!(taxonomy.brand_tier("Unknown Label"), None);
    }

    #[test]
    fn palettes_use_the_color_vocabulary() {
        let taxonomy = StyleTaxonomy::standard();
        let colors = ColorModel::standard();
        for archetype in taxonomy.archetypes() {
            for color in archetype.palette {
                assert_eq!(colors.normalize(color), Some(*color), "{color} not in vocabulary");
            }
        }
    }

    #[test]
    fn scalars_stay_in_range() {
        let taxonomy = StyleTaxonomy::standard();
        for archetype in taxonomy.archetypes() {
            assert!(archetype.formality <= 100);
            assert!(archetype.boldness <= 100);
            assert!(archetype.creativity <= 100);
        }
        assert_eq!(Archetype::parse(" Sporty "), Some(Archetype::Sporty));
        assert_eq!(
            taxonomy.archetype(Archetype::Sporty).brand_bonus(BrandTier::Athletic),
            95.0
        );
    }
}
