pub mod colors;
pub mod compat;
pub mod config;
pub mod recommend;

use std::fs;
use std::path::Path;

use anyhow::Context as _;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use wardrobe_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use wardrobe_core::{ApplicationError, DomainError, InterfaceError};

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_INPUT: u8 = 3;
pub const EXIT_BAD_REQUEST: u8 = 4;
pub const EXIT_NO_OUTFIT: u8 = 5;
pub const EXIT_INTERNAL: u8 = 6;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: None,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    /// Success carrying a structured result under `data`.
    pub fn success_with_data(command: &str, message: impl Into<String>, data: &impl Serialize) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(error) => {
                return Self::failure(
                    command,
                    "serialization",
                    format!("could not serialize result: {error}"),
                    EXIT_INTERNAL,
                )
            }
        };
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_domain_error(command: &str, error: DomainError) -> Self {
        let interface = InterfaceError::from(ApplicationError::from(error));
        let exit_code = match interface {
            InterfaceError::BadRequest { .. } => EXIT_BAD_REQUEST,
            InterfaceError::NoOutfit { .. } => EXIT_NO_OUTFIT,
            InterfaceError::Internal { .. } => EXIT_INTERNAL,
        };
        Self::failure(
            command,
            interface.error_class(),
            format!("{} ({})", interface.user_message(), interface.message()),
            exit_code,
        )
    }
}

/// Load configuration for a command, turning failures into a structured result.
pub fn load_config(
    command: &str,
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<AppConfig, CommandResult> {
    AppConfig::load(LoadOptions {
        config_path: config_path.map(Path::to_path_buf),
        require_file: config_path.is_some(),
        overrides,
    })
    .map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            EXIT_CONFIG,
        )
    })
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("could not read `{}`", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("could not parse `{}` as JSON", path.display()))
}

pub fn read_input<T: DeserializeOwned>(command: &str, path: &Path) -> Result<T, CommandResult> {
    read_json(path).map_err(|error| CommandResult::failure(command, "input", format!("{error:#}"), EXIT_INPUT))
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
