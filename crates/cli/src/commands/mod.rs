pub mod compare;
pub mod config;
pub mod doctor;
pub mod nutrition;
pub mod personalize;
pub mod search;
pub mod show;
pub mod substitute;

use savora_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use savora_core::{ApplicationError, Cookbook, DomainError};
use serde::Serialize;
use serde_json::Value;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_NOT_FOUND: u8 = 3;
pub const EXIT_INVALID_ARGUMENT: u8 = 4;
pub const EXIT_DATASET: u8 = 5;
pub const EXIT_INTERNAL: u8 = 1;

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
    data: Value,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::success_with_data(command, message, Value::Null)
    }

    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: impl Serialize,
    ) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), EXIT_INTERNAL);
            }
        };
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
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
            data: Value::Null,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_error(command: &str, error: ApplicationError) -> Self {
        let (error_class, exit_code) = classify(&error);
        Self::failure(command, error_class, error.to_string(), exit_code)
    }
}

pub(crate) fn finish(
    command: &str,
    result: Result<CommandResult, ApplicationError>,
) -> CommandResult {
    result.unwrap_or_else(|error| CommandResult::from_error(command, error))
}

fn classify(error: &ApplicationError) -> (&'static str, u8) {
    match error {
        ApplicationError::Configuration(_) => ("config_validation", EXIT_CONFIG),
        ApplicationError::Dataset(_) => ("dataset", EXIT_DATASET),
        ApplicationError::SessionNotFound(_) => ("not_found", EXIT_NOT_FOUND),
        ApplicationError::Domain(DomainError::NotFound { .. }) => ("not_found", EXIT_NOT_FOUND),
        ApplicationError::Domain(DomainError::InvalidArgument(_)) => {
            ("invalid_argument", EXIT_INVALID_ARGUMENT)
        }
        ApplicationError::Domain(DomainError::InvariantViolation(_)) => {
            ("invariant_violation", EXIT_INTERNAL)
        }
    }
}

/// Loads configuration (with any command-line overrides) and builds the
/// cookbook it describes.
pub(crate) fn load_cookbook(overrides: ConfigOverrides) -> Result<Cookbook, ApplicationError> {
    let config = AppConfig::load(LoadOptions { overrides, ..LoadOptions::default() })?;
    Cookbook::from_config(&config)
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\",\"data\":null}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

#[cfg(test)]
mod tests {
    use savora_core::{ApplicationError, DomainError};
    use serde_json::Value;

    use super::CommandResult;

    fn payload(result: &CommandResult) -> Value {
        serde_json::from_str(&result.output).expect("valid JSON")
    }

    #[test]
    fn errors_map_to_documented_exit_codes() {
        let cases = [
            (ApplicationError::Configuration("bad port".to_string()), 2, "config_validation"),
            (ApplicationError::Domain(DomainError::recipe_not_found("Pho")), 3, "not_found"),
            (
                ApplicationError::Domain(DomainError::InvalidArgument("servings".to_string())),
                4,
                "invalid_argument",
            ),
            (ApplicationError::Dataset("missing".to_string()), 5, "dataset"),
        ];

        for (error, exit_code, error_class) in cases {
            let result = CommandResult::from_error("search", error);
            assert_eq!(result.exit_code, exit_code);
            assert_eq!(payload(&result)["error_class"], error_class);
            assert_eq!(payload(&result)["data"], Value::Null);
        }
    }

    #[test]
    fn success_carries_data() {
        let result = CommandResult::success_with_data("show", "done", vec![1, 2]);

        assert_eq!(result.exit_code, 0);
        let payload = payload(&result);
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["error_class"], Value::Null);
        assert_eq!(payload["data"], serde_json::json!([1, 2]));
    }
}
