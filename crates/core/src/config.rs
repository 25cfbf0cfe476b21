use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generator::{
    GenerationSettings, RandomnessMode, DEFAULT_CREATIVE_CANDIDATES, DEFAULT_CREATIVE_RETRY_BUDGET,
    DEFAULT_MAX_CANDIDATES, DEFAULT_PER_BUCKET_TRIES, DEFAULT_TEMPLATE_CAP,
};
pub use crate::generator::DEFAULT_SEED;
use crate::recommendation::ScoringWeights;

const MAX_CANDIDATE_LIMIT: usize = 200;
const MAX_PER_BUCKET_TRIES: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub weights: ScoringWeights,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub max_candidates: usize,
    pub per_bucket_tries: usize,
    pub template_cap: usize,
    pub creative_candidates: usize,
    pub creative_retry_budget: usize,
    pub randomness: RandomnessSetting,
    pub seed: u64,
    pub parallel: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomnessSetting {
    Disabled,
    Seeded,
    Entropy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub randomness: Option<RandomnessMode>,
    pub max_candidates: Option<usize>,
    pub parallel: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig {
                max_candidates: DEFAULT_MAX_CANDIDATES,
                per_bucket_tries: DEFAULT_PER_BUCKET_TRIES,
                template_cap: DEFAULT_TEMPLATE_CAP,
                creative_candidates: DEFAULT_CREATIVE_CANDIDATES,
                creative_retry_budget: DEFAULT_CREATIVE_RETRY_BUDGET,
                randomness: RandomnessSetting::Seeded,
                seed: DEFAULT_SEED,
                parallel: true,
            },
            weights: ScoringWeights::default(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl EngineConfig {
    pub fn randomness_mode(&self) -> RandomnessMode {
        match self.randomness {
            RandomnessSetting::Disabled => RandomnessMode::Disabled,
            RandomnessSetting::Seeded => RandomnessMode::Seeded(self.seed),
            RandomnessSetting::Entropy => RandomnessMode::Entropy,
        }
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            max_candidates: self.max_candidates,
            per_bucket_tries: self.per_bucket_tries,
            template_cap: self.template_cap,
            creative_candidates: self.creative_candidates,
            creative_retry_budget: self.creative_retry_budget,
            randomness: self.randomness_mode(),
            parallel: self.parallel,
        }
    }

    fn set_randomness_mode(&mut self, mode: RandomnessMode) {
        match mode {
            RandomnessMode::Disabled => self.randomness = RandomnessSetting::Disabled,
            RandomnessMode::Seeded(seed) => {
                self.randomness = RandomnessSetting::Seeded;
                self.seed = seed;
            }
            RandomnessMode::Entropy => self.randomness = RandomnessSetting::Entropy,
        }
    }
}

impl RandomnessSetting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Seeded => "seeded",
            Self::Entropy => "entropy",
        }
    }
}

impl std::str::FromStr for RandomnessSetting {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "disabled" => Ok(Self::Disabled),
            "seeded" => Ok(Self::Seeded),
            "entropy" => Ok(Self::Entropy),
            other => Err(ConfigError::Validation(format!(
                "unsupported randomness `{other}` (expected disabled|seeded|entropy)"
            ))),
        }
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("wardrobe.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(engine) = patch.engine {
            if let Some(max_candidates) = engine.max_candidates {
                self.engine.max_candidates = max_candidates;
            }
            if let Some(per_bucket_tries) = engine.per_bucket_tries {
                self.engine.per_bucket_tries = per_bucket_tries;
            }
            if let Some(template_cap) = engine.template_cap {
                self.engine.template_cap = template_cap;
            }
            if let Some(creative_candidates) = engine.creative_candidates {
                self.engine.creative_candidates = creative_candidates;
            }
            if let Some(creative_retry_budget) = engine.creative_retry_budget {
                self.engine.creative_retry_budget = creative_retry_budget;
            }
            if let Some(randomness) = engine.randomness {
                self.engine.randomness = randomness;
            }
            if let Some(seed) = engine.seed {
                self.engine.seed = seed;
            }
            if let Some(parallel) = engine.parallel {
                self.engine.parallel = parallel;
            }
        }

        if let Some(weights) = patch.weights {
            if let Some(style) = weights.style {
                self.weights.style = style;
            }
            if let Some(color_harmony) = weights.color_harmony {
                self.weights.color_harmony = color_harmony;
            }
            if let Some(weather) = weights.weather {
                self.weights.weather = weather;
            }
            if let Some(occasion) = weights.occasion {
                self.weights.occasion = occasion;
            }
            if let Some(comfort) = weights.comfort {
                self.weights.comfort = comfort;
            }
            if let Some(sustainability) = weights.sustainability {
                self.weights.sustainability = sustainability;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("WARDROBE_ENGINE_MAX_CANDIDATES") {
            self.engine.max_candidates = parse_usize("WARDROBE_ENGINE_MAX_CANDIDATES", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_ENGINE_PER_BUCKET_TRIES") {
            self.engine.per_bucket_tries = parse_usize("WARDROBE_ENGINE_PER_BUCKET_TRIES", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_ENGINE_TEMPLATE_CAP") {
            self.engine.template_cap = parse_usize("WARDROBE_ENGINE_TEMPLATE_CAP", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_ENGINE_CREATIVE_CANDIDATES") {
            self.engine.creative_candidates = parse_usize("WARDROBE_ENGINE_CREATIVE_CANDIDATES", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_ENGINE_CREATIVE_RETRY_BUDGET") {
            self.engine.creative_retry_budget =
                parse_usize("WARDROBE_ENGINE_CREATIVE_RETRY_BUDGET", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_ENGINE_RANDOMNESS") {
            self.engine.randomness = value.parse()?;
        }
        if let Some(value) = read_env("WARDROBE_ENGINE_SEED") {
            self.engine.seed = parse_u64("WARDROBE_ENGINE_SEED", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_ENGINE_PARALLEL") {
            self.engine.parallel = parse_bool("WARDROBE_ENGINE_PARALLEL", &value)?;
        }

        if let Some(value) = read_env("WARDROBE_WEIGHTS_STYLE") {
            self.weights.style = parse_f64("WARDROBE_WEIGHTS_STYLE", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_WEIGHTS_COLOR_HARMONY") {
            self.weights.color_harmony = parse_f64("WARDROBE_WEIGHTS_COLOR_HARMONY", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_WEIGHTS_WEATHER") {
            self.weights.weather = parse_f64("WARDROBE_WEIGHTS_WEATHER", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_WEIGHTS_OCCASION") {
            self.weights.occasion = parse_f64("WARDROBE_WEIGHTS_OCCASION", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_WEIGHTS_COMFORT") {
            self.weights.comfort = parse_f64("WARDROBE_WEIGHTS_COMFORT", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_WEIGHTS_SUSTAINABILITY") {
            self.weights.sustainability = parse_f64("WARDROBE_WEIGHTS_SUSTAINABILITY", &value)?;
        }

        let log_level = read_env("WARDROBE_LOGGING_LEVEL").or_else(|| read_env("WARDROBE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("WARDROBE_LOGGING_FORMAT").or_else(|| read_env("WARDROBE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
        if let Some(randomness) = overrides.randomness {
            self.engine.set_randomness_mode(randomness);
        }
        if let Some(max_candidates) = overrides.max_candidates {
            self.engine.max_candidates = max_candidates;
        }
        if let Some(parallel) = overrides.parallel {
            self.engine.parallel = parallel;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_engine(&self.engine)?;
        validate_weights(&self.weights)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

/// Explicit path wins; otherwise the first default location that exists.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("wardrobe.toml"), PathBuf::from("config/wardrobe.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_engine(engine: &EngineConfig) -> Result<(), ConfigError> {
    if engine.max_candidates == 0 || engine.max_candidates > MAX_CANDIDATE_LIMIT {
        return Err(ConfigError::Validation(format!(
            "engine.max_candidates must be in range 1..={MAX_CANDIDATE_LIMIT}"
        )));
    }

    if engine.per_bucket_tries == 0 || engine.per_bucket_tries > MAX_PER_BUCKET_TRIES {
        return Err(ConfigError::Validation(format!(
            "engine.per_bucket_tries must be in range 1..={MAX_PER_BUCKET_TRIES}"
        )));
    }

    if engine.template_cap == 0 {
        return Err(ConfigError::Validation(
            "engine.template_cap must be greater than zero".to_string(),
        ));
    }

    if engine.creative_candidates > engine.max_candidates {
        return Err(ConfigError::Validation(
            "engine.creative_candidates must not exceed engine.max_candidates".to_string(),
        ));
    }

    if engine.randomness != RandomnessSetting::Disabled
        && engine.creative_candidates > 0
        && engine.creative_retry_budget == 0
    {
        return Err(ConfigError::Validation(
            "engine.creative_retry_budget must be greater than zero while randomness is enabled"
                .to_string(),
        ));
    }

    Ok(())
}

fn validate_weights(weights: &ScoringWeights) -> Result<(), ConfigError> {
    weights.validate().map_err(|message| ConfigError::Validation(format!("weights: {message}")))
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn invalid_override(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnvOverride { key: key.to_string(), value: value.to_string() }
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| invalid_override(key, value))
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|_| invalid_override(key, value))
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| invalid_override(key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.trim().parse::<bool>().map_err(|_| invalid_override(key, value))
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    engine: Option<EnginePatch>,
    weights: Option<WeightsPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct EnginePatch {
    max_candidates: Option<usize>,
    per_bucket_tries: Option<usize>,
    template_cap: Option<usize>,
    creative_candidates: Option<usize>,
    creative_retry_budget: Option<usize>,
    randomness: Option<RandomnessSetting>,
    seed: Option<u64>,
    parallel: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct WeightsPatch {
    style: Option<f64>,
    color_harmony: Option<f64>,
    weather: Option<f64>,
    occasion: Option<f64>,
    comfort: Option<f64>,
    sustainability: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
