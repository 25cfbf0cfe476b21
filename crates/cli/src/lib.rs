pub mod commands;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use wardrobe_core::RandomnessMode;

#[derive(Debug, Parser)]
#[command(
    name = "wardrobe",
    about = "Wardrobe outfit recommendation CLI",
    long_about = "Recommend outfits from a garment inventory, suggest colors, check compatibility, and inspect configuration.",
    after_help = "Examples:\n  wardrobe recommend --garments closet.json --context today.json --seed 7\n  wardrobe colors navy gold\n  wardrobe compat --garments picked.json\n  wardrobe config"
)]
pub struct Cli {
    #[arg(long = "config", global = true, help = "Path to a wardrobe.toml config file")]
    config_path: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Recommend the best outfit for a context and explain it")]
    Recommend {
        #[arg(long, help = "JSON file with an array of garments")]
        garments: PathBuf,
        #[arg(long, help = "JSON file with the request context (weather, occasion, preferences)")]
        context: Option<PathBuf>,
        #[arg(long, help = "Seed for reproducible creative combinations")]
        seed: Option<u64>,
        #[arg(long, help = "Randomness mode: disabled, entropy, or seeded:<n>")]
        randomness: Option<RandomnessMode>,
    },
    #[command(about = "Suggest complementary, analogous, and neutral colors")]
    Colors {
        #[arg(required = true, help = "Current colors, e.g. navy gold")]
        names: Vec<String>,
    },
    #[command(about = "Score the compatibility of a caller-assembled garment set")]
    Compat {
        #[arg(long, help = "JSON file with an array of garments")]
        garments: PathBuf,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Cli {
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

pub fn execute(cli: Cli) -> commands::CommandResult {
    match cli.command {
        Command::Recommend { garments, context, seed, randomness } => {
            commands::recommend::run(commands::recommend::RecommendArgs {
                garments,
                context,
                seed,
                randomness,
                config_path: cli.config_path,
            })
        }
        Command::Colors { names } => commands::colors::run(&names),
        Command::Compat { garments } => commands::compat::run(&garments),
        Command::Config => commands::config::run(cli.config_path.as_deref()),
    }
}
