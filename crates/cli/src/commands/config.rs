use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use savora_core::config::{AppConfig, LoadOptions};
use toml::Value;

use crate::commands::{CommandResult, EXIT_CONFIG};

/// Effective value of every setting with the layer it came from.
pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult {
                exit_code: EXIT_CONFIG,
                output: format!("config validation failed: {error}"),
            };
        }
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let settings: [(&str, &[&str], String); 9] = [
        (
            "catalog.dataset_path",
            &["SAVORA_CATALOG_DATASET_PATH"],
            config
                .catalog
                .dataset_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<bundled>".to_string()),
        ),
        (
            "search.max_results",
            &["SAVORA_SEARCH_MAX_RESULTS"],
            match config.search.max_results {
                0 => "0 (unlimited)".to_string(),
                limit => limit.to_string(),
            },
        ),
        (
            "search.personalize",
            &["SAVORA_SEARCH_PERSONALIZE"],
            config.search.personalize.to_string(),
        ),
        (
            "nutrition.reference",
            &["SAVORA_NUTRITION_REFERENCE"],
            config.nutrition.reference.to_string(),
        ),
        (
            "server.bind_address",
            &["SAVORA_SERVER_BIND_ADDRESS"],
            config.server.bind_address.clone(),
        ),
        ("server.port", &["SAVORA_SERVER_PORT"], config.server.port.to_string()),
        (
            "server.max_sessions",
            &["SAVORA_SERVER_MAX_SESSIONS"],
            config.server.max_sessions.to_string(),
        ),
        (
            "logging.level",
            &["SAVORA_LOGGING_LEVEL", "SAVORA_LOG_LEVEL"],
            config.logging.level.clone(),
        ),
        (
            "logging.format",
            &["SAVORA_LOGGING_FORMAT", "SAVORA_LOG_FORMAT"],
            format!("{:?}", config.logging.format).to_lowercase(),
        ),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for (key, env_keys, value) in settings {
        let source =
            field_source(key, env_keys, config_file_doc.as_ref(), config_file_path.as_deref());
        lines.push(format!("- {key} = {value} (source: {source})"));
    }

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

fn detect_config_path() -> Option<PathBuf> {
    ["savora.toml", "config/savora.toml"].into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(**key).is_some()) {
        return format!("env ({env_key})");
    }

    if config_file_doc.is_some_and(|doc| contains_path(doc, key_path)) {
        let file_path = config_file_path
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "config file".to_string());
        return format!("file ({file_path})");
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    key_path.split('.').try_fold(root, |current, key| current.get(key)).is_some()
}
