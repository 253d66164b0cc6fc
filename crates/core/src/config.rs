use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::weather::openweather::DEFAULT_BASE_URL as OPENWEATHER_BASE_URL;
use crate::weather::{LiveWeatherSettings, DEFAULT_COUNTRY_CODE};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub weather: WeatherConfig,
    pub llm: LlmConfig,
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct WeatherConfig {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub country_hint: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

#[derive(Clone, Debug, Default)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub log_level: Option<String>,
    pub weather_api_key: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub server_port: Option<u16>,
    pub static_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://agronova.db".to_string(),
                max_connections: 5,
                timeout_secs: 30,
            },
            weather: WeatherConfig {
                api_key: None,
                base_url: OPENWEATHER_BASE_URL.to_string(),
                country_hint: DEFAULT_COUNTRY_CODE.to_string(),
                timeout_secs: 10,
            },
            llm: LlmConfig {
                api_key: None,
                base_url: "https://api.anthropic.com".to_string(),
                model: "claude-3-5-haiku-latest".to_string(),
                timeout_secs: 30,
                max_tokens: 300,
            },
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8000,
                static_dir: PathBuf::from("frontend"),
            },
            catalog: CatalogConfig::default(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("agronova.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    /// Live weather wiring, present only when an API key is configured.
    pub fn live_weather_settings(&self) -> Option<LiveWeatherSettings> {
        let api_key = self.weather.api_key.as_ref()?;
        if api_key.expose_secret().trim().is_empty() {
            return None;
        }
        Some(LiveWeatherSettings {
            api_key: api_key.clone(),
            base_url: self.weather.base_url.clone(),
            country_hint: self.weather.country_hint.clone(),
            timeout: Duration::from_secs(self.weather.timeout_secs),
        })
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.api_key.as_ref().is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(database) = patch.database {
            if let Some(url) = database.url {
                self.database.url = url;
            }
            if let Some(max_connections) = database.max_connections {
                self.database.max_connections = max_connections;
            }
            if let Some(timeout_secs) = database.timeout_secs {
                self.database.timeout_secs = timeout_secs;
            }
        }

        if let Some(weather) = patch.weather {
            if let Some(weather_api_key_value) = weather.api_key {
                self.weather.api_key = Some(secret_value(weather_api_key_value));
            }
            if let Some(base_url) = weather.base_url {
                self.weather.base_url = base_url;
            }
            if let Some(country_hint) = weather.country_hint {
                self.weather.country_hint = country_hint;
            }
            if let Some(timeout_secs) = weather.timeout_secs {
                self.weather.timeout_secs = timeout_secs;
            }
        }

        if let Some(llm) = patch.llm {
            if let Some(llm_api_key_value) = llm.api_key {
                self.llm.api_key = Some(secret_value(llm_api_key_value));
            }
            if let Some(base_url) = llm.base_url {
                self.llm.base_url = base_url;
            }
            if let Some(model) = llm.model {
                self.llm.model = model;
            }
            if let Some(timeout_secs) = llm.timeout_secs {
                self.llm.timeout_secs = timeout_secs;
            }
            if let Some(max_tokens) = llm.max_tokens {
                self.llm.max_tokens = max_tokens;
            }
        }

        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(static_dir) = server.static_dir {
                self.server.static_dir = static_dir;
            }
        }

        if let Some(catalog) = patch.catalog {
            if let Some(path) = catalog.path {
                self.catalog.path = Some(path);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("AGRONOVA_DATABASE_URL") {
            self.database.url = value;
        }
        if let Some(value) = read_env("AGRONOVA_DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections =
                parse_u32("AGRONOVA_DATABASE_MAX_CONNECTIONS", &value)?;
        }
        if let Some(value) = read_env("AGRONOVA_DATABASE_TIMEOUT_SECS") {
            self.database.timeout_secs = parse_u64("AGRONOVA_DATABASE_TIMEOUT_SECS", &value)?;
        }

        let weather_api_key =
            read_env("AGRONOVA_WEATHER_API_KEY").or_else(|| read_env("OPENWEATHER_API_KEY"));
        if let Some(value) = weather_api_key {
            self.weather.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("AGRONOVA_WEATHER_BASE_URL") {
            self.weather.base_url = value;
        }
        if let Some(value) = read_env("AGRONOVA_WEATHER_COUNTRY_HINT") {
            self.weather.country_hint = value;
        }
        if let Some(value) = read_env("AGRONOVA_WEATHER_TIMEOUT_SECS") {
            self.weather.timeout_secs = parse_u64("AGRONOVA_WEATHER_TIMEOUT_SECS", &value)?;
        }

        let llm_api_key = read_env("AGRONOVA_LLM_API_KEY").or_else(|| read_env("ANTHROPIC_API_KEY"));
        if let Some(value) = llm_api_key {
            self.llm.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("AGRONOVA_LLM_BASE_URL") {
            self.llm.base_url = value;
        }
        if let Some(value) = read_env("AGRONOVA_LLM_MODEL") {
            self.llm.model = value;
        }
        if let Some(value) = read_env("AGRONOVA_LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = parse_u64("AGRONOVA_LLM_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("AGRONOVA_LLM_MAX_TOKENS") {
            self.llm.max_tokens = parse_u32("AGRONOVA_LLM_MAX_TOKENS", &value)?;
        }

        if let Some(value) = read_env("AGRONOVA_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("AGRONOVA_SERVER_PORT") {
            self.server.port = parse_u16("AGRONOVA_SERVER_PORT", &value)?;
        }
        if let Some(value) = read_env("AGRONOVA_SERVER_STATIC_DIR") {
            self.server.static_dir = PathBuf::from(value);
        }

        if let Some(value) = read_env("AGRONOVA_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(value));
        }

        let log_level =
            read_env("AGRONOVA_LOGGING_LEVEL").or_else(|| read_env("AGRONOVA_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("AGRONOVA_LOGGING_FORMAT").or_else(|| read_env("AGRONOVA_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(database_url) = overrides.database_url {
            self.database.url = database_url;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(weather_api_key) = overrides.weather_api_key {
            self.weather.api_key = Some(secret_value(weather_api_key));
        }
        if let Some(catalog_path) = overrides.catalog_path {
            self.catalog.path = Some(catalog_path);
        }
        if let Some(port) = overrides.server_port {
            self.server.port = port;
        }
        if let Some(static_dir) = overrides.static_dir {
            self.server.static_dir = static_dir;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_database(&self.database)?;
        validate_weather(&self.weather)?;
        validate_llm(&self.llm)?;
        validate_server(&self.server)?;
        validate_catalog(&self.catalog)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("agronova.toml"), PathBuf::from("config/agronova.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_database(database: &DatabaseConfig) -> Result<(), ConfigError> {
    let url = database.url.trim();
    let sqlite_url =
        url.starts_with("sqlite://") || url.starts_with("sqlite::") || url == ":memory:";
    if !sqlite_url {
        return Err(ConfigError::Validation(
            "database.url must be a sqlite URL (`sqlite://...`, `sqlite::...`, or `:memory:`)"
                .to_string(),
        ));
    }

    if database.max_connections == 0 {
        return Err(ConfigError::Validation(
            "database.max_connections must be greater than zero".to_string(),
        ));
    }

    if database.timeout_secs == 0 || database.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "database.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_weather(weather: &WeatherConfig) -> Result<(), ConfigError> {
    if weather.timeout_secs == 0 || weather.timeout_secs > 30 {
        return Err(ConfigError::Validation(
            "weather.timeout_secs must be in range 1..=30".to_string(),
        ));
    }

    if !is_http_url(&weather.base_url) {
        return Err(ConfigError::Validation(
            "weather.base_url must start with http:// or https://".to_string(),
        ));
    }

    let hint = weather.country_hint.trim();
    if hint.len() != 2 || !hint.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(ConfigError::Validation(
            "weather.country_hint must be a two-letter country code".to_string(),
        ));
    }

    Ok(())
}

fn validate_llm(llm: &LlmConfig) -> Result<(), ConfigError> {
    if llm.timeout_secs == 0 || llm.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "llm.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    if llm.max_tokens == 0 || llm.max_tokens > 4096 {
        return Err(ConfigError::Validation(
            "llm.max_tokens must be in range 1..=4096".to_string(),
        ));
    }

    if !is_http_url(&llm.base_url) {
        return Err(ConfigError::Validation(
            "llm.base_url must start with http:// or https://".to_string(),
        ));
    }

    if llm.model.trim().is_empty() {
        return Err(ConfigError::Validation("llm.model must not be empty".to_string()));
    }

    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.bind_address.trim().is_empty() {
        return Err(ConfigError::Validation(
            "server.bind_address must not be empty".to_string(),
        ));
    }

    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    Ok(())
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if let Some(path) = &catalog.path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "catalog.path must not be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    database: Option<DatabasePatch>,
    weather: Option<WeatherPatch>,
    llm: Option<LlmPatch>,
    server: Option<ServerPatch>,
    catalog: Option<CatalogPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabasePatch {
    url: Option<String>,
    max_connections: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct WeatherPatch {
    api_key: Option<String>,
    base_url: Option<String>,
    country_hint: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LlmPatch {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
    max_tokens: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
