use std::process::ExitCode;

use clap::Parser;
use wardrobe_cli::Cli;
use wardrobe_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use tracing::Level;
    use wardrobe_core::config::LogFormat::*;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    // stdout carries the JSON payload; logs go to stderr.
    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_max_level(log_level)
                .compact()
                .init();
        }
        Pretty => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_max_level(log_level)
                .pretty()
                .init();
        }
        Json => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_max_level(log_level)
                .json()
                .init();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Invalid config still reaches the command, which reports it as structured output.
    let config = AppConfig::load(LoadOptions {
        config_path: cli.config_path().map(|path| path.to_path_buf()),
        ..LoadOptions::default()
    })
    .unwrap_or_default();
    init_logging(&config);

    let result = wardrobe_cli::execute(cli);
    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
