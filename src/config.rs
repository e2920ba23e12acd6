//! Configuration management
//!
//! Loads configuration from config.toml with support for:
//! - Platform API base URL and request timeout
//! - Session token file location

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

/// Platform API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the platform REST API
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Session token storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Token file location; relative paths resolve against $HOME
    pub path: String,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            path: ".bounty-board/token".to_string(),
        }
    }
}

impl Config {
    /// Load from config.toml or use defaults
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load from specific path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            // Use embedded default config
            toml::from_str(DEFAULT_CONFIG).context("Failed to parse default config")
        }
    }

    /// Effective API base URL (BOUNTY_API_URL env var takes precedence)
    pub fn api_url(&self) -> String {
        match std::env::var("BOUNTY_API_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => self.api.base_url.clone(),
        }
    }

    /// Effective token file path (BOUNTY_TOKEN_PATH env var takes precedence).
    /// Relative paths resolve against $HOME, falling back to the current directory.
    pub fn token_path(&self) -> PathBuf {
        let raw = match std::env::var("BOUNTY_TOKEN_PATH") {
            Ok(p) if !p.is_empty() => p,
            _ => self.credentials.path.clone(),
        };

        let path = PathBuf::from(&raw);
        if path.is_absolute() {
            return path;
        }

        match std::env::var("HOME") {
            Ok(home) if !home.is_empty() => Path::new(&home).join(path),
            _ => path,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        // The embedded default config ships with the binary, so parsing it
        // should never fail. Using a fallback for robustness.
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|_| Self {
            api: ApiConfig {
                base_url: "https://api.bountyboard.dev".to_string(),
                timeout_secs: default_timeout_secs(),
            },
            credentials: CredentialsConfig::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_default_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert!(config.api.base_url.starts_with("https://"));
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let config = Config::load_from("does-not-exist.toml").unwrap();
        assert_eq!(config.api.base_url, Config::default().api.base_url);
    }

    #[test]
    fn timeout_defaults_when_omitted() {
        let config: Config =
            toml::from_str("[api]\nbase_url = \"http://localhost:3000\"").unwrap();
        assert_eq!(config.api.timeout_secs, 30);
    }
}
