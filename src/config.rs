//! Settings support for mispbot.
//!
//! Settings come from a YAML file (`./settings.yml` unless `--config` is
//! given) and may be overridden by environment variables of the same name.
//! Resolution into [`BotConfig`] fails fast on a missing or empty required key.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::use_cases::DEFAULT_SEARCH_TIMEOUT;
use crate::shared::{BotError, Result};
use secrecy::SecretString;

pub const DEFAULT_CONFIG_PATH: &str = "settings.yml";

/// Environment variable overriding the `LogLevel` key
pub const LOG_LEVEL_ENV: &str = "MISPBOT_LOG_LEVEL";

const MISP_SERVER: &str = "MISP_SERVER";
const MISP_API_KEY: &str = "MISP_API_KEY";
const MISP_VERIFY_CERT: &str = "MISP_VERIFY_CERT";
const MISP_TIMEOUT_SECONDS: &str = "MISP_TIMEOUT_SECONDS";
const LOG_LEVEL: &str = "LogLevel";
const SLACK_BOT_TOKEN: &str = "SLACK_BOT_TOKEN";
const SLACK_APP_TOKEN: &str = "SLACK_APP_TOKEN";

/// Settings file schema. Every key is optional at this stage.
#[derive(Debug, Deserialize, Default)]
pub struct SettingsFile {
    #[serde(rename = "MISP_SERVER")]
    pub misp_server: Option<String>,
    #[serde(rename = "MISP_API_KEY")]
    pub misp_api_key: Option<String>,
    #[serde(rename = "MISP_VERIFY_CERT")]
    pub misp_verify_cert: Option<bool>,
    #[serde(rename = "MISP_TIMEOUT_SECONDS")]
    pub misp_timeout_seconds: Option<u64>,
    #[serde(rename = "LogLevel")]
    pub log_level: Option<String>,
    #[serde(rename = "SLACK_BOT_TOKEN")]
    pub slack_bot_token: Option<String>,
    #[serde(rename = "SLACK_APP_TOKEN")]
    pub slack_app_token: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl SettingsFile {
    /// Overrides file values with environment variables
    ///
    /// `lookup` returns the value of a variable, if set.
    pub fn apply_env<F>(mut self, lookup: F) -> std::result::Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(MISP_SERVER) {
            self.misp_server = Some(value);
        }
        if let Some(value) = lookup(MISP_API_KEY) {
            self.misp_api_key = Some(value);
        }
        if let Some(value) = lookup(MISP_VERIFY_CERT) {
            self.misp_verify_cert = Some(parse_bool(MISP_VERIFY_CERT, &value)?);
        }
        if let Some(value) = lookup(MISP_TIMEOUT_SECONDS) {
            let seconds = value
                .trim()
                .parse()
                .map_err(|_| BotError::InvalidSetting {
                    key: MISP_TIMEOUT_SECONDS,
                    reason: format!("'{}' is not a whole number of seconds", value),
                })?;
            self.misp_timeout_seconds = Some(seconds);
        }
        if let Some(value) = lookup(LOG_LEVEL_ENV) {
            self.log_level = Some(value);
        }
        if let Some(value) = lookup(SLACK_BOT_TOKEN) {
            self.slack_bot_token = Some(value);
        }
        if let Some(value) = lookup(SLACK_APP_TOKEN) {
            self.slack_app_token = Some(value);
        }
        Ok(self)
    }
}

/// Log verbosity named the way the settings file names it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warning" | "warn" => Some(LogLevel::Warning),
            "error" | "fatal" | "critical" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Fully resolved bot configuration
#[derive(Debug)]
pub struct BotConfig {
    pub misp_server: String,
    pub misp_api_key: SecretString,
    pub verify_cert: bool,
    pub search_timeout: Duration,
    pub log_level: LogLevel,
    pub slack_bot_token: Option<SecretString>,
    /// App-level token (`xapp-...`) opening Socket Mode connections
    pub slack_app_token: Option<SecretString>,
    /// Unknown keys found in the settings file
    pub ignored_keys: Vec<String>,
}

impl BotConfig {
    /// Resolves settings into a configuration, rejecting incomplete setups
    pub fn resolve(settings: SettingsFile) -> std::result::Result<Self, BotError> {
        let misp_server = require(MISP_SERVER, settings.misp_server)?;
        if !(misp_server.starts_with("http://") || misp_server.starts_with("https://")) {
            return Err(BotError::InvalidSetting {
                key: MISP_SERVER,
                reason: format!("'{}' must start with http:// or https://", misp_server),
            });
        }

        let misp_api_key = require(MISP_API_KEY, settings.misp_api_key)?;

        let search_timeout = match settings.misp_timeout_seconds {
            Some(0) => {
                return Err(BotError::InvalidSetting {
                    key: MISP_TIMEOUT_SECONDS,
                    reason: "must be at least 1".to_string(),
                })
            }
            Some(seconds) => Duration::from_secs(seconds),
            None => DEFAULT_SEARCH_TIMEOUT,
        };

        let log_level = match settings.log_level {
            Some(value) => LogLevel::parse(&value).ok_or_else(|| BotError::InvalidSetting {
                key: LOG_LEVEL,
                reason: format!(
                    "'{}' is not one of debug, info, warning, error, fatal",
                    value
                ),
            })?,
            None => LogLevel::Info,
        };

        let slack_bot_token = match settings.slack_bot_token {
            Some(token) => Some(SecretString::from(non_empty(SLACK_BOT_TOKEN, token)?)),
            None => None,
        };
        let slack_app_token = match settings.slack_app_token {
            Some(token) => Some(SecretString::from(non_empty(SLACK_APP_TOKEN, token)?)),
            None => None,
        };

        let mut ignored_keys: Vec<String> = settings.unknown_fields.into_keys().collect();
        ignored_keys.sort();

        Ok(Self {
            misp_server,
            misp_api_key: SecretString::from(misp_api_key),
            verify_cert: settings.misp_verify_cert.unwrap_or(true),
            search_timeout,
            log_level,
            slack_bot_token,
            slack_app_token,
            ignored_keys,
        })
    }

    /// Takes the Slack bot token, which only the Web API presenter needs
    pub fn take_slack_bot_token(&mut self) -> std::result::Result<SecretString, BotError> {
        self.slack_bot_token
            .take()
            .ok_or(BotError::MissingSetting {
                key: SLACK_BOT_TOKEN,
            })
    }

    /// Takes the app-level token, which only Socket Mode needs
    pub fn take_slack_app_token(&mut self) -> std::result::Result<SecretString, BotError> {
        self.slack_app_token
            .take()
            .ok_or(BotError::MissingSetting {
                key: SLACK_APP_TOKEN,
            })
    }

    /// Warn about unknown fields in the settings file.
    ///
    /// Called once logging is initialised, since the log level itself is a setting.
    pub fn warn_ignored_keys(&self) {
        for key in &self.ignored_keys {
            tracing::warn!(key = %key, "Unknown setting will be ignored");
        }
    }
}

fn require(key: &'static str, value: Option<String>) -> std::result::Result<String, BotError> {
    match value {
        Some(value) => non_empty(key, value),
        None => Err(BotError::MissingSetting { key }),
    }
}

fn non_empty(key: &'static str, value: String) -> std::result::Result<String, BotError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BotError::InvalidSetting {
            key,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn parse_bool(key: &'static str, value: &str) -> std::result::Result<bool, BotError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(BotError::InvalidSetting {
            key,
            reason: format!("'{}' is not a boolean", value),
        }),
    }
}

/// Load the settings file from an explicit path. Returns an error if the file is not found.
pub fn load_settings_from_path(path: &Path) -> Result<SettingsFile> {
    let content = std::fs::read_to_string(path).map_err(|e| BotError::ConfigRead {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    // An empty file is a valid "everything from the environment" setup
    if content.trim().is_empty() {
        return Ok(SettingsFile::default());
    }

    let settings: SettingsFile =
        serde_yaml_ng::from_str(&content).map_err(|e| BotError::ConfigParse {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

    Ok(settings)
}

/// Auto-discover `settings.yml` in a directory. Returns `None` silently if not found.
pub fn discover_settings(dir: &Path) -> Result<Option<SettingsFile>> {
    let settings_path = dir.join(DEFAULT_CONFIG_PATH);

    if !settings_path.exists() {
        return Ok(None);
    }

    let settings = load_settings_from_path(&settings_path)?;
    Ok(Some(settings))
}

/// Loads and resolves the configuration using the process environment
///
/// An explicit `path` must exist. Without one, `./settings.yml` is used when
/// present and the environment alone otherwise.
pub fn load_config(path: Option<&Path>) -> Result<BotConfig> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] with an injectable environment lookup
pub fn load_config_with_env<F>(path: Option<&Path>, lookup: F) -> Result<BotConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let settings = match path {
        Some(path) => load_settings_from_path(path)?,
        None => discover_settings(&PathBuf::from("."))?.unwrap_or_default(),
    };

    let settings = settings.apply_env(lookup)?;
    Ok(BotConfig::resolve(settings)?)
}
