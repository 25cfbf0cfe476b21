use std::path::Path;

use wardrobe_core::{Garment, OutfitEngine};

use crate::commands::{read_input, CommandResult};

const COMMAND: &str = "compat";

pub fn run(garments_path: &Path) -> CommandResult {
    let garments: Vec<Garment> = match read_input(COMMAND, garments_path) {
        Ok(garments) => garments,
        Err(result) => return result,
    };

    match OutfitEngine::new().analyze_compatibility(&garments) {
        Ok(report) => {
            let message = if report.issues.is_empty() {
                format!("overall {:.1}, no issues", report.overall)
            } else {
                format!("overall {:.1}, {} issue(s)", report.overall, report.issues.len())
            };
            CommandResult::success_with_data(COMMAND, message, &report)
        }
        Err(error) => CommandResult::from_domain_error(COMMAND, error),
    }
}
