//! Runtime configuration for marquee_app.
//!
//! Read from a RON file (`./marquee.ron` unless a path is given on the command
//! line). Every field has a default, so a missing default file is not an error.
//! `MARQUEE_API_TOKEN` overrides the access token from the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use marquee_engine::{ApiSettings, BrowseFilters, DEFAULT_BASE_URL, DEFAULT_LANGUAGE, DEFAULT_SORT_BY};
use marquee_logging::LogDestination;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILENAME: &str = "marquee.ron";
pub const TOKEN_ENV_VAR: &str = "MARQUEE_API_TOKEN";
const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub browse: BrowseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub image_base_url: String,
    pub access_token: String,
    pub language: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            access_token: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    pub sort_by: String,
    pub genre: Option<String>,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            sort_by: DEFAULT_SORT_BY.to_string(),
            genre: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub destination: LogTarget,
    pub level: String,
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            destination: LogTarget::File,
            level: "info".to_string(),
            file: marquee_logging::default_log_path(),
        }
    }
}

impl AppConfig {
    /// Loads `path`, or `./marquee.ron` when `None`. Only an explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
        };

        let mut config = match fs::read_to_string(&path) {
            Ok(text) => Self::from_ron_str(&text).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => Self::default(),
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup(TOKEN_ENV_VAR).filter(|token| !token.trim().is_empty()) {
            self.api.access_token = token.trim().to_string();
        }
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api.base_url.clone(),
            access_token: self.api.access_token.clone(),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.api.request_timeout_secs),
        }
    }

    pub fn browse_filters(&self) -> BrowseFilters {
        BrowseFilters {
            sort_by: self.browse.sort_by.clone(),
            genre: self.browse.genre.clone(),
        }
    }
}
