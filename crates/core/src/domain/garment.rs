use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GarmentId(pub String);

impl fmt::Display for GarmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of wardrobe buckets a garment is classified into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Base,
    Top,
    Bottom,
    Outerwear,
    Layering,
    Footwear,
    Accessory,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Base,
        Category::Top,
        Category::Bottom,
        Category::Outerwear,
        Category::Layering,
        Category::Footwear,
        Category::Accessory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Outerwear => "outerwear",
            Self::Layering => "layering",
            Self::Footwear => "footwear",
            Self::Accessory => "accessory",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "base" => Some(Self::Base),
            "top" | "tops" => Some(Self::Top),
            "bottom" | "bottoms" => Some(Self::Bottom),
            "outerwear" => Some(Self::Outerwear),
            "layering" => Some(Self::Layering),
            "footwear" | "shoes" => Some(Self::Footwear),
            "accessory" | "accessories" => Some(Self::Accessory),
            _ => None,
        }
    }

    /// Accessories and layering pieces may appear more than once in an outfit.
    pub fn allows_duplicates(&self) -> bool {
        matches!(self, Self::Accessory | Self::Layering)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    Spring,
    Summer,
    #[serde(alias = "fall")]
    Autumn,
    Winter,
    #[serde(alias = "all_season", alias = "all")]
    AllSeason,
}

impl Season {
    /// The four concrete seasons, in palette order.
    pub const SEASONAL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
            Self::AllSeason => "all-season",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occasion {
    Casual,
    #[serde(alias = "business")]
    Work,
    Formal,
    #[serde(alias = "evening")]
    Party,
    Date,
    #[serde(alias = "athletic", alias = "gym")]
    Sport,
    Outdoor,
    Lounge,
    Versatile,
}

impl Occasion {
    pub const SPECIFIC: [Occasion; 8] = [
        Occasion::Casual,
        Occasion::Work,
        Occasion::Formal,
        Occasion::Party,
        Occasion::Date,
        Occasion::Sport,
        Occasion::Outdoor,
        Occasion::Lounge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Work => "work",
            Self::Formal => "formal",
            Self::Party => "party",
            Self::Date => "date",
            Self::Sport => "sport",
            Self::Outdoor => "outdoor",
            Self::Lounge => "lounge",
            Self::Versatile => "versatile",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "casual" => Some(Self::Casual),
            "work" | "business" => Some(Self::Work),
            "formal" => Some(Self::Formal),
            "party" | "evening" => Some(Self::Party),
            "date" => Some(Self::Date),
            "sport" | "athletic" | "gym" => Some(Self::Sport),
            "outdoor" => Some(Self::Outdoor),
            "lounge" => Some(Self::Lounge),
            "versatile" => Some(Self::Versatile),
            _ => None,
        }
    }

    /// Two occasion labels can be worn together. `Versatile` pairs with anything.
    pub fn compatible_with(&self, other: Occasion) -> bool {
        use Occasion::*;

        if *self == other || *self == Versatile || other == Versatile {
            return true;
        }

        matches!(
            (*self, other),
            (Casual, Date)
                | (Date, Casual)
                | (Casual, Outdoor)
                | (Outdoor, Casual)
                | (Casual, Lounge)
                | (Lounge, Casual)
                | (Casual, Party)
                | (Party, Casual)
                | (Work, Formal)
                | (Formal, Work)
                | (Work, Date)
                | (Date, Work)
                | (Party, Date)
                | (Date, Party)
                | (Party, Formal)
                | (Formal, Party)
                | (Sport, Outdoor)
                | (Outdoor, Sport)
                | (Sport, Lounge)
                | (Lounge, Sport)
        )
    }
}

/// Occasion labels outside the known set read as unspecified instead of
/// rejecting the whole record.
pub fn deserialize_occasion<'de, D>(deserializer: D) -> Result<Option<Occasion>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.as_deref().and_then(Occasion::parse))
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    Excellent,
    #[default]
    Good,
    Fair,
    Worn,
}

impl Condition {
    pub fn score(&self) -> f64 {
        match self {
            Self::New => 100.0,
            Self::Excellent => 90.0,
            Self::Good => 75.0,
            Self::Fair => 50.0,
            Self::Worn => 25.0,
        }
    }
}

/// One inventory record as supplied by the caller. Read-only to the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Garment {
    pub id: GarmentId,
    pub name: String,
    /// Declared category text as stored upstream, e.g. "tops" or "knitwear".
    pub category: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    /// Empty means unconstrained.
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default, deserialize_with = "deserialize_occasion")]
    pub occasion: Option<Occasion>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub value: Option<Decimal>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub last_worn: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Garment {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: GarmentId(id.into()),
            name: name.into(),
            category: category.into(),
            color: None,
            material: None,
            seasons: Vec::new(),
            occasion: None,
            brand: None,
            value: None,
            favorite: false,
            condition: Condition::default(),
            last_worn: None,
            tags: Vec::new(),
            image_url: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_seasons(mut self, seasons: Vec<Season>) -> Self {
        self.seasons = seasons;
        self
    }

    pub fn with_occasion(mut self, occasion: Occasion) -> Self {
        self.occasion = Some(occasion);
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_value(mut self, value: Decimal) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_last_worn(mut self, last_worn: DateTime<Utc>) -> Self {
        self.last_worn = Some(last_worn);
        self
    }

    pub fn favorite(mut self) -> Self {
        self.favorite = true;
        self
    }

    /// Text used by keyword classification: name followed by declared category.
    pub fn classification_text(&self) -> String {
        format!("{} {}", self.name, self.category)
    }

    /// Everything descriptive about the garment, used by style and comfort keywords.
    pub fn descriptive_text(&self) -> String {
        let mut text = self.classification_text();
        if let Some(material) = &self.material {
            text.push(' ');
            text.push_str(material);
        }
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        text
    }

    pub fn is_all_season(&self) -> bool {
        self.seasons.is_empty() || self.seasons.contains(&Season::AllSeason)
    }

    pub fn suits_season(&self, season: Season) -> bool {
        season == Season::AllSeason || self.is_all_season() || self.seasons.contains(&season)
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, Garment, Occasion, Season};

    #[test]
    fn versatile_occasion_pairs_with_everything() {
        for occasion in Occasion::SPECIFIC {
            assert!(Occasion::Versatile.compatible_with(occasion));
            assert!(occasion.compatible_with(Occasion::Versatile));
        }
    }

    #[test]
    fn formal_and_sport_do_not_mix() {
        assert!(!Occasion::Formal.compatible_with(Occasion::Sport));
        assert!(!Occasion::Lounge.compatible_with(Occasion::Work));
        assert!(Occasion::Work.compatible_with(Occasion::Formal));
    }

    #[test]
    fn empty_season_list_is_all_season() {
        let garment = Garment::new("g1", "Tee", "tops");
        assert!(garment.is_all_season());
        assert!(garment.suits_season(Season::Winter));

        let summer_only = garment.with_seasons(vec![Season::Summer]);
        assert!(!summer_only.suits_season(Season::Winter));
        assert!(summer_only.suits_season(Season::Summer));
    }

    #[test]
    fn category_parse_accepts_plural_labels() {
        assert_eq!(Category::parse("Tops"), Some(Category::Top));
        assert_eq!(Category::parse("accessories"), Some(Category::Accessory));
        assert_eq!(Category::parse("hats"), None);
    }

    #[test]
    fn garment_deserializes_with_defaults_and_aliases() {
        let garment: Garment = serde_json::from_str(
            r#"{"id":"g7","name":"Rain Shell","category":"outerwear","seasons":["fall","all-season"],"occasion":"business"}"#,
        )
        .expect("garment json");

        assert_eq!(garment.seasons, vec![Season::Autumn, Season::AllSeason]);
        assert_eq!(garment.occasion, Some(Occasion::Work));
        assert!(!garment.favorite);
        assert!(garment.tags.is_empty());
    }

    #[test]
    fn unknown_occasion_label_reads_as_unspecified() {
        let garments: Vec<Garment> = serde_json::from_str(
            r#"[{"id":"g1","name":"Silk slip dress","category":"dresses","occasion":"wedding"},
                {"id":"g2","name":"Blazer","category":"outerwear","occasion":"Business"},
                {"id":"g3","name":"Tee","category":"tops","occasion":null}]"#,
        )
        .expect("inventory json");

        assert_eq!(garments.len(), 3);
        assert_eq!(garments[0].occasion, None);
        assert_eq!(garments[1].occasion, Some(Occasion::Work));
        assert_eq!(garments[2].occasion, None);
    }

    #[test]
    fn occasion_parse_accepts_aliases() {
        assert_eq!(Occasion::parse(" Gym "), Some(Occasion::Sport));
        assert_eq!(Occasion::parse("evening"), Some(Occasion::Party));
        assert_eq!(Occasion::parse("brunch"), None);
    }
}
