//! Configuration Management Module
//!
//! The dashboard reads one externally supplied backend base URL plus a few
//! runtime knobs (probe cadence, session file location, log format).
//! Values come from a TOML or JSON file, then environment overrides apply.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";
/// Connectivity probe period.
pub const DEFAULT_PROBE_INTERVAL_SECS: u64 = 30;
/// Durable session record location.
pub const DEFAULT_SESSION_PATH: &str = ".pitwatch/session.json";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Failed to write configuration: {0}")]
    WriteError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Pretty,
    /// JSON lines
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::ValidationError(format!(
                "unknown log format '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url", alias = "api_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_probe_interval")]
    pub interval_secs: u64,
    #[serde(default = "default_probe_enabled")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub storage_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_probe_interval() -> u64 {
    DEFAULT_PROBE_INTERVAL_SECS
}

fn default_probe_enabled() -> bool {
    true
}

fn default_session_path() -> PathBuf {
    PathBuf::from(DEFAULT_SESSION_PATH)
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_probe_interval(),
            enabled: default_probe_enabled(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: default_session_path(),
        }
    }
}

impl AppConfig {
    /// Apply `PITWATCH_*` environment variables on top of the current values.
    pub fn with_runtime_overrides(mut self) -> Self {
        if let Ok(api_url) = std::env::var("PITWATCH_API_URL") {
            if !api_url.trim().is_empty() {
                self.api.base_url = api_url.trim().to_string();
            }
        }

        if let Ok(interval) = std::env::var("PITWATCH_PROBE_INTERVAL_SECS") {
            if let Ok(parsed) = interval.trim().parse::<u64>() {
                self.probe.interval_secs = parsed;
            }
        }

        if let Ok(path) = std::env::var("PITWATCH_SESSION_PATH") {
            if !path.trim().is_empty() {
                self.session.storage_path = PathBuf::from(path.trim());
            }
        }

        if let Ok(format) = std::env::var("PITWATCH_LOG_FORMAT") {
            if let Ok(parsed) = format.parse::<LogFormat>() {
                self.logging.format = parsed;
            }
        }

        self
    }

    /// Base URL without a trailing slash, ready for path joins.
    pub fn api_base(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let api = url::Url::parse(&self.api.base_url).map_err(|e| {
            ConfigError::ValidationError(format!("Invalid api.base_url: {}", e))
        })?;

        if api.scheme() != "http" && api.scheme() != "https" {
            return Err(ConfigError::ValidationError(
                "api.base_url must use http:// or https:// protocol".to_string(),
            ));
        }

        if self.probe.interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "probe.interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.session.storage_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "session.storage_path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Loads and persists [`AppConfig`] at a fixed path.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Load the file, writing defaults first when it does not exist yet.
    /// Environment overrides are applied after reading.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if self.config_path.exists() {
            let config = load_from_path(&self.config_path)?.with_runtime_overrides();
            config.validate()?;
            return Ok(config);
        }

        let default = AppConfig::default();
        self.save(&default)?;
        let config = default.with_runtime_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        config.validate()?;

        let contents = if is_json(&self.config_path) {
            serde_json::to_string_pretty(config)?
        } else {
            toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))?
        };

        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(&self.config_path, contents)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        Ok(())
    }

    pub fn get_config_path(&self) -> &PathBuf {
        &self.config_path
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Parse a config file without applying environment overrides.
pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: AppConfig = if is_json(path) {
        serde_json::from_str(&contents)?
    } else {
        toml::from_str(&contents)?
    };
    Ok(config)
}
