//! Application configuration management.
//!
//! This module handles loading and saving the client configuration: the
//! backend base URL and the last identifier used to sign in (pre-filled at
//! the login prompt; the secret itself is never stored anywhere).
//!
//! Configuration is stored at `~/.config/shopdeck/config.json`, with
//! `SHOPDECK_API_URL` as an environment override.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
const APP_NAME: &str = "shopdeck";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Backend used when neither the environment nor the config file names one.
const DEFAULT_API_BASE_URL: &str = "https://api.storefront.example";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_identifier: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Resolve the backend base URL: environment, then config file, then the
    /// built-in default. Trailing slashes are trimmed so path joins stay
    /// predictable.
    pub fn resolve_api_base_url(&self) -> String {
        std::env::var("SHOPDECK_API_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = Config {
            api_base_url: Some("https://api.example.com/".to_string()),
            last_identifier: None,
        };
        // Only meaningful when the env override is unset; the config value
        // exercise is what matters here.
        if std::env::var("SHOPDECK_API_URL").is_err() {
            assert_eq!(config.resolve_api_base_url(), "https://api.example.com");
        }
    }

    #[test]
    fn test_default_base_url_when_unconfigured() {
        let config = Config::default();
        if std::env::var("SHOPDECK_API_URL").is_err() {
            assert_eq!(config.resolve_api_base_url(), DEFAULT_API_BASE_URL);
        }
    }
}
