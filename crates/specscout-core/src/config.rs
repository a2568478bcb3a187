//! Configuration for the discovery engine.
//!
//! Settings are stored as TOML. Every section is optional and falls back to the
//! defaults below, so an empty file (or no file at all) is a valid configuration.
//!
//! ## Resolution Order
//!
//! 1. `SPECSCOUT_CONFIG` environment variable, if set, names the file to read
//! 2. Otherwise the platform config directory (`~/.config/specscout/config.toml` on Linux)
//! 3. Built-in defaults when no file exists
//! 4. Environment overrides (`ANTHROPIC_MODEL`, `ANTHROPIC_BASE_URL`, `SPECSCOUT_BIND`)
//!
//! The API key is never part of the file; it is read from `ANTHROPIC_API_KEY`.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [reasoning]
//! model = "claude-sonnet-4-20250514"
//! max_tokens = 2000
//!
//! [fetch]
//! timeout_secs = 30
//! max_chars = 100000
//!
//! [verify]
//! head_timeout_secs = 10
//! get_timeout_secs = 30
//!
//! [server]
//! bind = "127.0.0.1:8000"
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SPECSCOUT_CONFIG";
/// Environment variable holding the reasoning service API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reasoning service settings.
    pub reasoning: ReasoningConfig,
    /// Documentation fetch settings.
    pub fetch: FetchConfig,
    /// URL verification settings.
    pub verify: VerifyConfig,
    /// HTTP front door settings.
    pub server: ServerConfig,
}

/// Settings for the reasoning service and prompt sizing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReasoningConfig {
    /// Model identifier sent with every request.
    pub model: String,
    /// Base URL of the Messages API (no trailing `/v1/messages`).
    pub base_url: String,
    /// Output token budget for the single analysis call.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// How many characters of fetched content go into the prompt.
    pub prompt_content_chars: usize,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 2000,
            timeout_secs: 120,
            prompt_content_chars: 50_000,
        }
    }
}

impl ReasoningConfig {
    /// Request timeout as a `Duration`.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Settings for fetching documentation pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of characters kept from a fetched page.
    pub max_chars: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_chars: 100_000,
        }
    }
}

impl FetchConfig {
    /// Request timeout as a `Duration`.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Settings for URL verification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Timeout for the existence probe.
    pub head_timeout_secs: u64,
    /// Timeout for the content download.
    pub get_timeout_secs: u64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            head_timeout_secs: 10,
            get_timeout_secs: 30,
        }
    }
}

impl VerifyConfig {
    /// Existence probe timeout as a `Duration`.
    pub const fn head_timeout(&self) -> Duration {
        Duration::from_secs(self.head_timeout_secs)
    }

    /// Content download timeout as a `Duration`.
    pub const fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.get_timeout_secs)
    }
}

/// Settings for the HTTP front door.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the resolved location, then apply env overrides.
    ///
    /// A missing file is not an error; a file that exists but cannot be read or
    /// parsed is.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path()? {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific TOML file without env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (the environment, in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(model) = non_empty("ANTHROPIC_MODEL") {
            self.reasoning.model = model;
        }
        if let Some(base_url) = non_empty("ANTHROPIC_BASE_URL") {
            self.reasoning.base_url = base_url;
        }
        if let Some(bind) = non_empty("SPECSCOUT_BIND") {
            self.server.bind = bind;
        }
    }

    /// The file this process would read its configuration from.
    fn config_path() -> Result<Option<PathBuf>> {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
            return Ok(Some(PathBuf::from(explicit)));
        }

        let Some(dirs) = directories::ProjectDirs::from("dev", "specscout", "specscout") else {
            tracing::debug!("no platform config directory; using defaults");
            return Ok(None);
        };
        Ok(Some(dirs.config_dir().join("config.toml")))
    }
}

/// Read the reasoning service API key from the environment.
///
/// Returns `None` when unset or blank.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
}
