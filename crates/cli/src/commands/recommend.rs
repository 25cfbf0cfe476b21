use std::path::PathBuf;

use tracing::info;
use wardrobe_core::config::ConfigOverrides;
use wardrobe_core::{Context, Garment, OutfitEngine, RandomnessMode};

use crate::commands::{load_config, read_input, CommandResult};

const COMMAND: &str = "recommend";

#[derive(Debug, Clone, Default)]
pub struct RecommendArgs {
    pub garments: PathBuf,
    pub context: Option<PathBuf>,
    pub seed: Option<u64>,
    pub randomness: Option<RandomnessMode>,
    pub config_path: Option<PathBuf>,
}

pub fn run(args: RecommendArgs) -> CommandResult {
    // An explicit seed always means seeded generation.
    let randomness = args.seed.map(RandomnessMode::Seeded).or(args.randomness);
    let config = match load_config(
        COMMAND,
        args.config_path.as_deref(),
        ConfigOverrides { randomness, ..ConfigOverrides::default() },
    ) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let garments: Vec<Garment> = match read_input(COMMAND, &args.garments) {
        Ok(garments) => garments,
        Err(result) => return result,
    };
    let context: Context = match args.context.as_deref() {
        Some(path) => match read_input(COMMAND, path) {
            Ok(context) => context,
            Err(result) => return result,
        },
        None => Context::default(),
    };

    let engine = OutfitEngine::from_config(&config);
    match engine.recommend(&garments, &context) {
        Ok(outfit) => {
            info!(
                event_name = "cli.recommend.completed",
                outfit_id = %outfit.id,
                composite = outfit.composite_score,
                "recommendation emitted"
            );
            let message = format!(
                "recommended `{}` ({:.1}) from {} candidate(s)",
                outfit.name, outfit.composite_score, outfit.candidates_evaluated
            );
            CommandResult::success_with_data(COMMAND, message, &outfit)
        }
        Err(error) => CommandResult::from_domain_error(COMMAND, error),
    }
}
