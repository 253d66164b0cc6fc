use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use agronova_core::config::AppConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use toml::Value;

use crate::commands::{load_config, to_data, CommandResult};

#[derive(Debug, Serialize)]
struct ConfigLine {
    key: &'static str,
    value: String,
    source: String,
}

pub fn run() -> CommandResult {
    let config = match load_config("config") {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let lines: Vec<ConfigLine> = effective_values(&config)
        .into_iter()
        .map(|(key, value, env_keys)| ConfigLine {
            key,
            value,
            source: field_source(
                key,
                env_keys,
                config_file_doc.as_ref(),
                config_file_path.as_deref(),
            ),
        })
        .collect();

    match to_data("config", &lines) {
        Ok(data) => CommandResult::success_with_data(
            "config",
            "effective config (source precedence: env > file > default)",
            Some(data),
        ),
        Err(failure) => failure,
    }
}

type Entry = (&'static str, String, &'static [&'static str]);

fn entry(key: &'static str, value: String, env_keys: &'static [&'static str]) -> Entry {
    (key, value, env_keys)
}

fn effective_values(config: &AppConfig) -> Vec<Entry> {
    let catalog_path = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<embedded>".to_string());

    vec![
        entry("database.url", config.database.url.clone(), &["AGRONOVA_DATABASE_URL"]),
        entry(
            "database.max_connections",
            config.database.max_connections.to_string(),
            &["AGRONOVA_DATABASE_MAX_CONNECTIONS"],
        ),
        entry(
            "database.timeout_secs",
            config.database.timeout_secs.to_string(),
            &["AGRONOVA_DATABASE_TIMEOUT_SECS"],
        ),
        entry(
            "weather.api_key",
            redact(config.weather.api_key.as_ref()),
            &["AGRONOVA_WEATHER_API_KEY", "OPENWEATHER_API_KEY"],
        ),
        entry("weather.base_url", config.weather.base_url.clone(), &["AGRONOVA_WEATHER_BASE_URL"]),
        entry(
            "weather.country_hint",
            config.weather.country_hint.clone(),
            &["AGRONOVA_WEATHER_COUNTRY_HINT"],
        ),
        entry(
            "weather.timeout_secs",
            config.weather.timeout_secs.to_string(),
            &["AGRONOVA_WEATHER_TIMEOUT_SECS"],
        ),
        entry(
            "llm.api_key",
            redact(config.llm.api_key.as_ref()),
            &["AGRONOVA_LLM_API_KEY", "ANTHROPIC_API_KEY"],
        ),
        entry("llm.base_url", config.llm.base_url.clone(), &["AGRONOVA_LLM_BASE_URL"]),
        entry("llm.model", config.llm.model.clone(), &["AGRONOVA_LLM_MODEL"]),
        entry(
            "llm.timeout_secs",
            config.llm.timeout_secs.to_string(),
            &["AGRONOVA_LLM_TIMEOUT_SECS"],
        ),
        entry("llm.max_tokens", config.llm.max_tokens.to_string(), &["AGRONOVA_LLM_MAX_TOKENS"]),
        entry(
            "server.bind_address",
            config.server.bind_address.clone(),
            &["AGRONOVA_SERVER_BIND_ADDRESS"],
        ),
        entry("server.port", config.server.port.to_string(), &["AGRONOVA_SERVER_PORT"]),
        entry(
            "server.static_dir",
            config.server.static_dir.display().to_string(),
            &["AGRONOVA_SERVER_STATIC_DIR"],
        ),
        entry("catalog.path", catalog_path, &["AGRONOVA_CATALOG_PATH"]),
        entry(
            "logging.level",
            config.logging.level.clone(),
            &["AGRONOVA_LOGGING_LEVEL", "AGRONOVA_LOG_LEVEL"],
        ),
        entry(
            "logging.format",
            format!("{:?}", config.logging.format).to_lowercase(),
            &["AGRONOVA_LOGGING_FORMAT", "AGRONOVA_LOG_FORMAT"],
        ),
    ]
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("agronova.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/agronova.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
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
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
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

fn redact(secret: Option<&SecretString>) -> String {
    match secret.map(|secret| secret.expose_secret().trim()) {
        None => "<unset>".to_string(),
        Some("") => "<empty>".to_string(),
        Some(value) if value.chars().count() > 8 => {
            format!("{}***", value.chars().take(4).collect::<String>())
        }
        Some(_) => "<redacted>".to_string(),
    }
}
