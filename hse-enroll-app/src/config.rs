//! Application configuration file

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;

use hse_enroll_api::ApiConfig;
use hse_enroll_core::CoordinatorConfig;

const APP_DIR: &str = "hse-enroll";
const CONFIG_FILE: &str = "config.json";

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Application configuration
///
/// Every field has a default, so a partial file (or no file) is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Enrollment backend client
    pub api: ApiConfig,
    /// Registration form behavior
    pub form: CoordinatorConfig,
}

impl AppConfig {
    /// `<config_dir>/hse-enroll/config.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    /// Load from the default location
    pub async fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()).await
    }

    /// Load from `path`; a missing file yields the defaults
    pub async fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !fs::try_exists(path).await.map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })? {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save to the default location
    pub async fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::default_path()).await
    }

    /// Write pretty JSON to `path`, creating parent directories
    pub async fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|source| ConfigError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        log::debug!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_with_app_dir() {
        let path = AppConfig::default_path();
        assert!(path.ends_with("hse-enroll/config.json"));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"api": {"maxRetries": 5}}"#).unwrap();
        assert_eq!(config.api.max_retries, 5);
        assert_eq!(config.api.base_url, ApiConfig::default().base_url);
        assert_eq!(config.form, CoordinatorConfig::default());
    }
}
