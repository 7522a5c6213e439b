use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use shopfront_core::config::{AppConfig, LoadOptions};
use toml::Value;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct EffectiveConfig<'a> {
    #[serde(flatten)]
    config: &'a AppConfig,
    allowed_origins: Vec<String>,
}

pub fn run(json_output: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("config validation failed: {error}"),
                2,
            )
        }
    };

    if json_output {
        let effective =
            EffectiveConfig { config: &config, allowed_origins: config.cors.allowed_origins() };
        return match serde_json::to_string_pretty(&effective) {
            Ok(output) => CommandResult::text(output),
            Err(error) => CommandResult::failure("config", "serialization", error.to_string(), 1),
        };
    }

    CommandResult::text(render_attributed(&config))
}

fn render_attributed(config: &AppConfig) -> String {
    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let frontend_url = config.cors.frontend_url.as_deref().unwrap_or("<unset>");
    let entries = [
        (
            "server.bind_address",
            config.server.bind_address.clone(),
            source("server.bind_address", &["SHOPFRONT_SERVER_BIND_ADDRESS"]),
        ),
        ("server.port", config.server.port.to_string(), source("server.port", &["SHOPFRONT_SERVER_PORT"])),
        (
            "server.static_dir",
            config.server.static_dir.display().to_string(),
            source("server.static_dir", &["SHOPFRONT_SERVER_STATIC_DIR"]),
        ),
        (
            "server.environment",
            format!("{:?}", config.server.environment),
            source("server.environment", &["SHOPFRONT_ENVIRONMENT"]),
        ),
        (
            "server.graceful_shutdown_secs",
            config.server.graceful_shutdown_secs.to_string(),
            source("server.graceful_shutdown_secs", &["SHOPFRONT_SERVER_GRACEFUL_SHUTDOWN_SECS"]),
        ),
        ("cors.dev_origins", config.cors.dev_origins.join(", "), source("cors.dev_origins", &[])),
        (
            "cors.frontend_url",
            frontend_url.to_string(),
            source("cors.frontend_url", &["SHOPFRONT_FRONTEND_URL"]),
        ),
        (
            "client.api_base_url",
            config.client.api_base_url.clone(),
            source("client.api_base_url", &["SHOPFRONT_CLIENT_API_BASE_URL"]),
        ),
        (
            "logging.level",
            config.logging.level.clone(),
            source("logging.level", &["SHOPFRONT_LOGGING_LEVEL", "SHOPFRONT_LOG_LEVEL"]),
        ),
        (
            "logging.format",
            format!("{:?}", config.logging.format),
            source("logging.format", &["SHOPFRONT_LOGGING_FORMAT", "SHOPFRONT_LOG_FORMAT"]),
        ),
    ];

    let mut lines =
        vec!["effective config (source precedence: env > file > default):".to_string()];
    lines.extend(entries.iter().map(|(key, value, source)| render_line(key, value, source)));
    lines.push(format!("cors allow-list: {}", config.cors.allowed_origins().join(", ")));
    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("shopfront.toml"), PathBuf::from("config/shopfront.toml")]
        .into_iter()
        .find(|path| path.exists())
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
    let set_env = env_keys
        .iter()
        .find(|key| env::var(key).map(|value| !value.trim().is_empty()).unwrap_or(false));
    if let Some(env_key) = set_env {
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

fn render_line(key: &str, value: &str, source: &str) -> String {
    format!("- {key} = {value} (source: {source})")
}
