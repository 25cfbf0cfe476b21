use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::garment::{deserialize_occasion, Category, Occasion, Season};
use crate::taxonomy::style::Archetype;

/// Weather snapshot supplied by an upstream weather source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    /// Relative humidity, 0-100.
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub wind_speed_kmh: f64,
    /// Probability of precipitation, 0-100.
    #[serde(default)]
    pub precipitation_chance: f64,
    #[serde(default)]
    pub uv_index: f64,
    #[serde(default)]
    pub feels_like_c: Option<f64>,
}

impl WeatherSnapshot {
    pub fn at(temperature_c: f64) -> Self {
        Self {
            temperature_c,
            humidity: 50.0,
            wind_speed_kmh: 0.0,
            precipitation_chance: 0.0,
            uv_index: 0.0,
            feels_like_c: None,
        }
    }

    pub fn with_precipitation(mut self, chance: f64) -> Self {
        self.precipitation_chance = chance;
        self
    }

    pub fn with_wind(mut self, wind_speed_kmh: f64) -> Self {
        self.wind_speed_kmh = wind_speed_kmh;
        self
    }

    pub fn with_uv(mut self, uv_index: f64) -> Self {
        self.uv_index = uv_index;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub favorite_colors: Vec<String>,
    #[serde(default)]
    pub preferred_brands: Vec<String>,
    #[serde(default)]
    pub style_hint: Option<Archetype>,
    #[serde(default)]
    pub lifestyle: Vec<String>,
}

impl UserPreferences {
    pub fn is_empty(&self) -> bool {
        self.favorite_colors.is_empty()
            && self.preferred_brands.is_empty()
            && self.style_hint.is_none()
            && self.lifestyle.is_empty()
    }

    pub fn prefers_brand(&self, brand: &str) -> bool {
        self.preferred_brands.iter().any(|preferred| preferred.trim().eq_ignore_ascii_case(brand.trim()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HardConstraints {
    #[serde(default)]
    pub forbidden_categories: Vec<Category>,
    #[serde(default)]
    pub budget_ceiling: Option<Decimal>,
    #[serde(default)]
    pub required_categories: Vec<Category>,
}

/// Everything about the request besides the inventory itself. Every field may
/// be absent; the engine degrades to context-agnostic scoring.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub weather: Option<WeatherSnapshot>,
    #[serde(default, deserialize_with = "deserialize_occasion")]
    pub occasion: Option<Occasion>,
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub time_of_day: Option<TimeOfDay>,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub constraints: HardConstraints,
    /// Reference instant for wear-recency insights.
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weather(mut self, weather: WeatherSnapshot) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn with_temperature(self, temperature_c: f64) -> Self {
        self.with_weather(WeatherSnapshot::at(temperature_c))
    }

    pub fn with_occasion(mut self, occasion: Occasion) -> Self {
        self.occasion = Some(occasion);
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }

    pub fn with_preferences(mut self, preferences: UserPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_constraints(mut self, constraints: HardConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = Some(as_of);
        self
    }

    pub fn temperature(&self) -> Option<f64> {
        self.weather.as_ref().map(|weather| weather.temperature_c)
    }
}

#[cfg(test)]
mod tests {
    use super::{Context, UserPreferences};
    use crate::domain::garment::Occasion;

    #[test]
    fn empty_json_object_is_a_valid_context() {
        let context: Context = serde_json::from_str("{}").expect("context json");
        assert!(context.weather.is_none());
        assert!(context.temperature().is_none());
        assert!(context.preferences.is_empty());
    }

    #[test]
    fn unrecognized_context_occasion_falls_back_to_none() {
        let context: Context =
            serde_json::from_str(r#"{"occasion":"brunch","weather":{"temperature_c":21.0}}"#).expect("context json");
        assert_eq!(context.occasion, None);
        assert_eq!(context.temperature(), Some(21.0));

        let context: Context = serde_json::from_str(r#"{"occasion":"date"}"#).expect("context json");
        assert_eq!(context.occasion, Some(Occasion::Date));
    }

    #[test]
    fn brand_preference_ignores_case_and_padding() {
        let preferences = UserPreferences {
            preferred_brands: vec![" Uniqlo ".to_owned()],
            ..UserPreferences::default()
        };
        assert!(preferences.prefers_brand("uniqlo"));
        assert!(!preferences.prefers_brand("zara"));
    }
}
