use wardrobe_core::analysis::ColorHarmonyAnalyzer;
use wardrobe_core::generator::ExclusionReason;
use wardrobe_core::recommendation::SubScores;
use wardrobe_core::taxonomy::WeatherBandKind;
use wardrobe_core::{
    Context, DomainError, EngineSettings, Garment, GenerationSettings, Occasion, OutfitEngine,
    RandomnessMode, Season, Taxonomy, UserPreferences,
};

type ScenarioResult<T = ()> = Result<T, String>;

macro_rules! require {
    ($cond:expr) => {
        if !$cond {
            return Err(format!("assertion failed: `{}`", stringify!($cond)));
        }
    };
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            return Err(format!($($arg)*));
        }
    };
}

macro_rules! require_eq {
    ($left:expr, $right:expr) => {
        if $left != $right {
            return Err(format!(
                "assertion failed: `left == right` (`{:?}` != `{:?}`)",
                $left,
                $right
            ));
        }
    };
}

fn engine_with(randomness: RandomnessMode) -> OutfitEngine {
    OutfitEngine::with_settings(EngineSettings {
        generation: GenerationSettings::default().with_randomness(randomness),
        ..EngineSettings::default()
    })
}

fn capsule_wardrobe() -> Vec<Garment> {
    vec![
        Garment::new("top-1", "White cotton tee", "tops").with_color("white").with_material("cotton"),
        Garment::new("top-2", "Navy oxford shirt", "tops")
            .with_color("navy")
            .with_material("cotton")
            .with_occasion(Occasion::Work),
        Garment::new("top-3", "Striped linen shirt", "tops").with_color("sky blue").with_material("linen"),
        Garment::new("bot-1", "Dark jeans", "bottoms").with_color("denim").with_material("denim"),
        Garment::new("bot-2", "Khaki chinos", "bottoms").with_color("khaki").with_material("cotton"),
        Garment::new("lay-1", "Grey merino cardigan", "knitwear").with_color("gray").with_material("merino"),
        Garment::new("out-1", "Camel wool overcoat", "outerwear").with_color("camel").with_material("wool"),
        Garment::new("out-2", "Rain shell jacket", "outerwear").with_color("olive").with_tags(vec!["waterproof".to_owned()]),
        Garment::new("sho-1", "White leather sneakers", "shoes").with_color("white").with_material("leather"),
        Garment::new("sho-2", "Brown suede loafers", "shoes").with_color("brown").with_material("suede"),
        Garment::new("acc-1", "Wool scarf", "accessories").with_color("burgundy").with_material("wool"),
    ]
}

fn check_bounds(scores: &SubScores) -> ScenarioResult {
    for (name, value) in [
        ("style", scores.style),
        ("color_harmony", scores.color_harmony),
        ("weather", scores.weather),
        ("occasion", scores.occasion),
        ("comfort", scores.comfort),
        ("sustainability", scores.sustainability),
        ("trendiness", scores.trendiness),
        ("versatility", scores.versatility),
    ] {
        require!((0.0..=100.0).contains(&value), "{name} out of bounds: {value}");
    }
    Ok(())
}

#[test]
fn navy_top_and_gold_bottom_in_mild_weather() -> ScenarioResult {
    let garments = vec![
        Garment::new("navy-top", "Navy knit top", "tops").with_color("navy"),
        Garment::new("gold-skirt", "Gold pleated skirt", "bottoms").with_color("gold"),
    ];
    let outfit = engine_with(RandomnessMode::Seeded(42))
        .recommend(&garments, &Context::new().with_temperature(20.0))
        .map_err(|err| format!("recommend failed: {err}"))?;

    require!(outfit.analysis.color.score >= 70.0, "harmony was {}", outfit.analysis.color.score);
    require_eq!(outfit.analysis.weather.band, Some(WeatherBandKind::Mild));
    require_eq!(outfit.items.len(), 2);
    Ok(())
}

#[test]
fn sandals_and_tank_top_in_freezing_weather_have_no_outfit() -> ScenarioResult {
    let garments = vec![
        Garment::new("sandals", "Leather sandals", "shoes"),
        Garment::new("tank", "Tank top", "tops"),
    ];
    let engine = engine_with(RandomnessMode::Seeded(42));
    let context = Context::new().with_temperature(-5.0);

    match engine.recommend(&garments, &context) {
        Err(DomainError::NoViableOutfit { considered, excluded }) => {
            require_eq!(considered, 2);
            require_eq!(excluded, 2);
        }
        Err(other) => return Err(format!("unexpected error: {other}")),
        Ok(outfit) => return Err(format!("expected no outfit, got {}", outfit.name)),
    }
    Ok(())
}

#[test]
fn freezing_exclusions_name_the_offending_keyword() -> ScenarioResult {
    let mut garments = capsule_wardrobe();
    garments.push(Garment::new("sho-3", "Beach sandals", "shoes"));
    let outfit = engine_with(RandomnessMode::Disabled)
        .recommend(&garments, &Context::new().with_temperature(-2.0))
        .map_err(|err| format!("recommend failed: {err}"))?;

    let sandals = outfit
        .excluded
        .iter()
        .find(|exclusion| exclusion.garment_id.0 == "sho-3")
        .ok_or_else(|| "sandals should be excluded".to_string())?;
    require!(
        matches!(sandals.reason, ExclusionReason::TooCold { ref keyword, .. } if keyword == "sandal"),
        "unexpected reason {:?}",
        sandals.reason
    );
    require!(
        outfit.items.iter().all(|item| item.garment.id.0 != "sho-3"),
        "excluded garment must not be worn"
    );
    Ok(())
}

#[test]
fn five_unrelated_colors_score_low_harmony() -> ScenarioResult {
    let garments: Vec<Garment> = ["maroon", "lime", "mint", "royal blue", "purple"]
        .iter()
        .enumerate()
        .map(|(index, color)| Garment::new(format!("g{index}"), format!("{color} piece"), "tops").with_color(*color))
        .collect();
    let report = OutfitEngine::new()
        .analyze_compatibility(&garments)
        .map_err(|err| format!("compatibility failed: {err}"))?;

    require!(report.color_harmony <= 45.0, "harmony was {}", report.color_harmony);
    require!(report.issues.iter().any(|issue| issue.contains("Colors clash")));
    Ok(())
}

#[test]
fn seeded_recommendations_are_reproducible() -> ScenarioResult {
    let context = Context::new().with_temperature(9.0).with_occasion(Occasion::Casual).with_season(Season::Autumn);
    let first = engine_with(RandomnessMode::Seeded(2024))
        .recommend(&capsule_wardrobe(), &context)
        .map_err(|err| format!("first run failed: {err}"))?;
    let second = engine_with(RandomnessMode::Seeded(2024))
        .recommend(&capsule_wardrobe(), &context)
        .map_err(|err| format!("second run failed: {err}"))?;

    require_eq!(first, second);
    Ok(())
}

#[test]
fn disabled_randomness_gives_identical_selections() -> ScenarioResult {
    let context = Context::new().with_temperature(16.0);
    let engine = engine_with(RandomnessMode::Disabled);
    let first = engine.recommend(&capsule_wardrobe(), &context).map_err(|err| err.to_string())?;
    let second = engine.recommend(&capsule_wardrobe(), &context).map_err(|err| err.to_string())?;

    require_eq!(first.id, second.id);
    require_eq!(first.composite_score, second.composite_score);
    require!(first.alternatives.iter().all(|alternative| !alternative.source.starts_with("creative")));
    Ok(())
}

#[test]
fn scores_stay_in_bounds_across_contexts() -> ScenarioResult {
    let engine = OutfitEngine::new();
    let contexts = [
        Context::new(),
        Context::new().with_temperature(-12.0),
        Context::new().with_temperature(35.0),
        Context::new().with_temperature(22.0).with_occasion(Occasion::Formal),
        Context::new().with_occasion(Occasion::Work).with_season(Season::Winter),
    ];

    for context in &contexts {
        let outfit = match engine.recommend(&capsule_wardrobe(), context) {
            Ok(outfit) => outfit,
            Err(DomainError::NoViableOutfit { .. }) => continue,
            Err(other) => return Err(format!("unexpected error: {other}")),
        };
        check_bounds(&outfit.scores)?;
        require!((0.0..=100.0).contains(&outfit.composite_score));
        require!((0.0..=100.0).contains(&outfit.confidence.score));
        let weighted: f64 = outfit.breakdown.iter().map(|factor| factor.impact).sum();
        require!((weighted - outfit.composite_score).abs() < 1e-6, "breakdown {weighted} vs {}", outfit.composite_score);
    }
    Ok(())
}

#[test]
fn personalization_surfaces_in_insights() -> ScenarioResult {
    // Only one top and one bottom, so both pieces are always worn.
    let garments = vec![
        Garment::new("top-1", "White cotton tee", "tops").with_color("white").with_material("cotton").favorite(),
        Garment::new("bot-1", "Dark jeans", "bottoms").with_color("denim").with_material("denim"),
    ];
    let context = Context::new().with_temperature(20.0).with_preferences(UserPreferences {
        favorite_colors: vec!["white".to_owned()],
        ..UserPreferences::default()
    });

    let outfit = engine_with(RandomnessMode::Disabled)
        .recommend(&garments, &context)
        .map_err(|err| err.to_string())?;
    require!(outfit.confidence.personalization > 40.0);
    require!(outfit.items.iter().any(|item| item.garment.id.0 == "top-1"), "favorite must be worn");
    require!(
        outfit.insights.iter().any(|insight| insight == "Features your favorite White cotton tee."),
        "insights were {:?}",
        outfit.insights
    );
    require!(
        outfit.insights.iter().any(|insight| insight == "Uses white, one of your favorite colors."),
        "insights were {:?}",
        outfit.insights
    );
    Ok(())
}

#[test]
fn color_suggestions_match_the_analyzer() -> ScenarioResult {
    let analyzer = ColorHarmonyAnalyzer::new(Taxonomy::standard().colors);
    let engine = OutfitEngine::new();
    require_eq!(engine.suggest_colors(&["navy", "gold"]), analyzer.suggest(&["navy", "gold"]));
    require!(engine.suggest_colors::<&str>(&[]).len() >= 1);
    Ok(())
}
