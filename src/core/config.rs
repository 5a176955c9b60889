// src/core/config.rs
use crate::core::constants::{DEFAULT_CONFIG_FILE, DEFAULT_LOG_LEVEL, MAX_SETUP_TIMEOUT_MS};
use crate::core::error::{HistoryError, Result};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// TOML Configuration Structure
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    history: Option<HistoryConfigToml>,
    #[serde(default)]
    logging: Option<LoggingConfigToml>,
}

#[derive(Debug, Deserialize)]
struct HistoryConfigToml {
    #[serde(default)]
    max_entries: usize,
    #[serde(default)]
    setup_timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
struct LoggingConfigToml {
    #[serde(default = "default_log_level")]
    level: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.into()
}

#[derive(Debug, Clone)]
pub struct Config {
    config_path: Option<String>,
    /// Cap on the back stack; `0` keeps it unbounded.
    pub history_max_entries: usize,
    pub setup_timeout: Option<Duration>,
    pub log_level: String,
}

impl Config {
    /// Loads `path` if given, otherwise `page-history.toml` from the working
    /// directory when it exists, otherwise the defaults.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            let config = Self::from_file(path).await?;
            Self::log_startup(&config);
            return Ok(config);
        }

        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        if tokio::fs::try_exists(&fallback).await.unwrap_or(false) {
            let config = Self::from_file(&fallback).await?;
            Self::log_startup(&config);
            return Ok(config);
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(HistoryError::Io)?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.as_ref().to_string_lossy().into_owned());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let defaults = Self::default();

        let (history_max_entries, setup_timeout) = match file.history {
            Some(h) => {
                let timeout_ms = if h.setup_timeout_ms > MAX_SETUP_TIMEOUT_MS {
                    log::warn!(
                        "setup_timeout_ms {} exceeds {}, timeout disabled",
                        h.setup_timeout_ms,
                        MAX_SETUP_TIMEOUT_MS
                    );
                    0
                } else {
                    h.setup_timeout_ms
                };
                (
                    h.max_entries,
                    (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
                )
            }
            None => (defaults.history_max_entries, defaults.setup_timeout),
        };

        let log_level = match file.logging {
            Some(l) if Self::parse_level(&l.level).is_some() => l.level.to_lowercase(),
            Some(l) => {
                log::warn!("Invalid log level in config: '{}', using INFO", l.level);
                defaults.log_level
            }
            None => defaults.log_level,
        };

        Ok(Self {
            config_path: None,
            history_max_entries,
            setup_timeout,
            log_level,
        })
    }

    pub fn path(&self) -> Option<&str> {
        self.config_path.as_deref()
    }

    pub fn level_filter(&self) -> LevelFilter {
        Self::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    // Helper methods
    fn parse_level(s: &str) -> Option<LevelFilter> {
        match s.to_lowercase().as_str() {
            "error" | "1" => Some(LevelFilter::Error),
            "warn" | "warning" | "2" => Some(LevelFilter::Warn),
            "info" | "3" => Some(LevelFilter::Info),
            "debug" | "4" => Some(LevelFilter::Debug),
            "trace" | "5" => Some(LevelFilter::Trace),
            "off" | "0" => Some(LevelFilter::Off),
            _ => None,
        }
    }

    fn log_startup(config: &Config) {
        log::info!(
            "Config loaded from {}",
            config.path().unwrap_or("<defaults>")
        );
        log::info!(
            "History: max entries {}, setup timeout {:?}",
            config.history_max_entries,
            config.setup_timeout
        );
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            history_max_entries: 0,
            setup_timeout: None,
            log_level: DEFAULT_LOG_LEVEL.into(),
        }
    }
}
