use std::env;
use std::fs;
use std::path::Path;

use serde::Serialize;
use toml::Value;
use wardrobe_core::config::{resolve_config_path, AppConfig, ConfigOverrides};

use crate::commands::{load_config, CommandResult};

const COMMAND: &str = "config";

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

pub fn run(config_path: Option<&Path>) -> CommandResult {
    let config = match load_config(COMMAND, config_path, ConfigOverrides::default()) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let config_file_path = resolve_config_path(config_path);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let entries: Vec<ConfigEntry> = effective_values(&config)
        .into_iter()
        .map(|(key, env_keys, value)| ConfigEntry {
            key,
            value,
            source: field_source(key, env_keys, config_file_doc.as_ref(), config_file_path.as_deref()),
        })
        .collect();

    let mut lines =
        vec!["effective config (source precedence: override > env > file > default):".to_string()];
    lines.extend(entries.iter().map(render_line));

    CommandResult::success_with_data(COMMAND, lines.join("\n"), &entries)
}

fn effective_values(config: &AppConfig) -> Vec<EffectiveValue> {
    let engine = &config.engine;
    let weights = &config.weights;
    vec![
        value("engine.max_candidates", &["WARDROBE_ENGINE_MAX_CANDIDATES"], engine.max_candidates.to_string()),
        value("engine.per_bucket_tries", &["WARDROBE_ENGINE_PER_BUCKET_TRIES"], engine.per_bucket_tries.to_string()),
        value("engine.template_cap", &["WARDROBE_ENGINE_TEMPLATE_CAP"], engine.template_cap.to_string()),
        value(
            "engine.creative_candidates",
            &["WARDROBE_ENGINE_CREATIVE_CANDIDATES"],
            engine.creative_candidates.to_string(),
        ),
        value(
            "engine.creative_retry_budget",
            &["WARDROBE_ENGINE_CREATIVE_RETRY_BUDGET"],
            engine.creative_retry_budget.to_string(),
        ),
        value("engine.randomness", &["WARDROBE_ENGINE_RANDOMNESS"], engine.randomness.as_str().to_string()),
        value("engine.seed", &["WARDROBE_ENGINE_SEED"], engine.seed.to_string()),
        value("engine.parallel", &["WARDROBE_ENGINE_PARALLEL"], engine.parallel.to_string()),
        value("weights.style", &["WARDROBE_WEIGHTS_STYLE"], format!("{:.2}", weights.style)),
        value("weights.color_harmony", &["WARDROBE_WEIGHTS_COLOR_HARMONY"], format!("{:.2}", weights.color_harmony)),
        value("weights.weather", &["WARDROBE_WEIGHTS_WEATHER"], format!("{:.2}", weights.weather)),
        value("weights.occasion", &["WARDROBE_WEIGHTS_OCCASION"], format!("{:.2}", weights.occasion)),
        value("weights.comfort", &["WARDROBE_WEIGHTS_COMFORT"], format!("{:.2}", weights.comfort)),
        value(
            "weights.sustainability",
            &["WARDROBE_WEIGHTS_SUSTAINABILITY"],
            format!("{:.2}", weights.sustainability),
        ),
        value("logging.level", &["WARDROBE_LOGGING_LEVEL", "WARDROBE_LOG_LEVEL"], config.logging.level.clone()),
        value(
            "logging.format",
            &["WARDROBE_LOGGING_FORMAT", "WARDROBE_LOG_FORMAT"],
            config.logging.format.as_str().to_string(),
        ),
    ]
}

type EffectiveValue = (&'static str, &'static [&'static str], String);

fn value(key: &'static str, env_keys: &'static [&'static str], current: String) -> EffectiveValue {
    (key, env_keys, current)
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(entry: &ConfigEntry) -> String {
    format!("- {} = {} (source: {})", entry.key, entry.value, entry.source)
}
