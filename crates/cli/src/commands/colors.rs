use serde::Serialize;
use wardrobe_core::OutfitEngine;

use crate::commands::CommandResult;

const COMMAND: &str = "colors";

#[derive(Debug, Serialize)]
struct ColorSuggestions<'a> {
    current: &'a [String],
    suggestions: Vec<String>,
}

pub fn run(current: &[String]) -> CommandResult {
    let suggestions = OutfitEngine::new().suggest_colors(current);
    let message = if suggestions.is_empty() {
        "no suggestions for this palette".to_string()
    } else {
        format!("try {}", suggestions.join(", "))
    };
    CommandResult::success_with_data(COMMAND, message, &ColorSuggestions { current, suggestions })
}
