//! Keyword classification of garments into the seven generation buckets.

use std::collections::BTreeMap;

use crate::domain::garment::{Category, Garment};
use crate::domain::outfit::OutfitItem;
use crate::taxonomy::KeywordText;

#[derive(Debug, Clone, Copy)]
struct CategoryRule {
    category: Category,
    keywords: &'static [&'static str],
}

/// Evaluated top to bottom; the first rule with a matching keyword wins, so
/// cardigans and hoodies land in layering before the outerwear rule sees them.
const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Footwear,
        keywords: &[
            "footwear", "shoe", "sneaker", "trainer", "boot", "sandal", "loafer", "heel", "pump",
            "ballet flat", "slipper", "flip flop", "mule", "espadrille", "clog", "oxford shoe",
            "brogue",
        ],
    },
    CategoryRule {
        category: Category::Accessory,
        keywords: &[
            "accessory", "accessories", "hat", "cap", "beanie", "scarf", "belt", "bag", "handbag",
            "tote", "backpack", "watch", "glove", "mitten", "sunglasses", "jewelry", "jewellery",
            "necklace", "bracelet", "earring", "necktie", "bow tie", "sock",
        ],
    },
    CategoryRule {
        category: Category::Base,
        keywords: &[
            "base layer", "baselayer", "thermal", "undershirt", "underwear", "camisole", "bodysuit",
            "tights", "long johns", "base",
        ],
    },
    CategoryRule {
        category: Category::Layering,
        keywords: &[
            "cardigan", "hoodie", "vest", "gilet", "fleece", "zip up", "shacket", "pullover",
            "sweatshirt", "shrug", "waistcoat", "layer", "layering",
        ],
    },
    CategoryRule {
        category: Category::Outerwear,
        keywords: &[
            "outerwear", "jacket", "coat", "parka", "blazer", "trench", "windbreaker", "anorak",
            "raincoat", "puffer", "overcoat", "peacoat", "poncho", "cape", "bomber", "shell",
        ],
    },
    CategoryRule {
        category: Category::Bottom,
        keywords: &[
            "bottom", "pant", "trouser", "jean", "shorts", "skirt", "chino", "legging", "jogger",
            "sweatpant", "culotte", "cargo",
        ],
    },
    CategoryRule {
        category: Category::Top,
        keywords: &[
            "top", "shirt", "t shirt", "tee", "blouse", "sweater", "jumper", "polo", "tank",
            "turtleneck", "tunic", "dress", "henley", "bodice",
        ],
    },
];

/// Bucket for a garment from its name and declared category text. Total:
/// anything unmatched is an accessory.
pub fn classify(garment: &Garment) -> Category {
    let text = KeywordText::new(&garment.classification_text());
    CATEGORY_RULES
        .iter()
        .find(|rule| text.contains_any(rule.keywords))
        .map(|rule| rule.category)
        .unwrap_or(Category::Accessory)
}

pub fn classify_all(garments: &[Garment]) -> Vec<OutfitItem> {
    garments
        .iter()
        .map(|garment| OutfitItem { category: classify(garment), garment: garment.clone() })
        .collect()
}

/// Items grouped by bucket, each bucket in wardrobe order.
#[derive(Clone, Debug, Default)]
pub struct CategorizedWardrobe {
    buckets: BTreeMap<Category, Vec<OutfitItem>>,
}

impl CategorizedWardrobe {
    pub fn from_items(items: Vec<OutfitItem>) -> Self {
        let mut buckets: BTreeMap<Category, Vec<OutfitItem>> = BTreeMap::new();
        for item in items {
            buckets.entry(item.category).or_default().push(item);
        }
        Self { buckets }
    }

    pub fn bucket(&self, category: Category) -> &[OutfitItem] {
        self.buckets.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty buckets in category order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.buckets.iter().filter(|(_, items)| !items.is_empty()).map(|(category, _)| *category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutfitItem> {
        self.buckets.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, classify_all, CategorizedWardrobe};
    use crate::domain::garment::{Category, Garment};

    fn category_of(name: &str, declared: &str) -> Category {
        classify(&Garment::new("g", name, declared))
    }

    #[test]
    fn layering_pieces_route_before_outerwear() {
        assert_eq!(category_of("Wool cardigan", "outerwear"), Category::Layering);
        assert_eq!(category_of("Zip hoodie", "tops"), Category::Layering);
        assert_eq!(category_of("Denim jacket", "outerwear"), Category::Outerwear);
    }

    #[test]
    fn common_garments_classify_as_expected() {
        assert_eq!(category_of("Chelsea boots", "shoes"), Category::Footwear);
        assert_eq!(category_of("Sandals", "footwear"), Category::Footwear);
        assert_eq!(category_of("Tank top", "tops"), Category::Top);
        assert_eq!(category_of("Short sleeve tee", "tops"), Category::Top);
        assert_eq!(category_of("Bootcut jeans", "bottoms"), Category::Bottom);
        assert_eq!(category_of("Linen shorts", "bottoms"), Category::Bottom);
        assert_eq!(category_of("Thermal undershirt", "tops"), Category::Base);
        assert_eq!(category_of("Silk scarf", "accessories"), Category::Accessory);
        assert_eq!(category_of("Midi dress", "dresses"), Category::Top);
    }

    #[test]
    fn unmatched_garments_fall_back_to_accessory() {
        assert_eq!(category_of("Mystery item", "misc"), Category::Accessory);
    }

    #[test]
    fn wardrobe_buckets_preserve_order() {
        let items = classify_all(&[
            Garment::new("a", "Tee", "top"),
            Garment::new("b", "Jeans", "bottom"),
            Garment::new("c", "Shirt", "top"),
        ]);
        let wardrobe = CategorizedWardrobe::from_items(items);
        let tops: Vec<&str> = wardrobe.bucket(Category::Top).iter().map(|item| item.garment.id.0.as_str()).collect();
        assert_eq!(tops, vec!["a", "c"]);
        assert!(wardrobe.bucket(Category::Footwear).is_empty());
        assert_eq!(wardrobe.len(), 3);
        assert_eq!(wardrobe.categories().count(), 2);
    }
}
