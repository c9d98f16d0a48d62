// Configuration utilities and TOML parsing

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::utils::error::{ActionError, Result};

pub const DEFAULT_ROOT_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const ROOT_URL_ENV: &str = "FIPVA_ROOT";

/// Runtime configuration of the action client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Base URL of the action backend, without trailing slash
    pub root_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Fallback tracing filter when `RUST_LOG` is not set
    pub log_level: String,
    /// Re-run version validation after a suggestion fills the form
    pub revalidate_on_suggestion: bool,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            root_url: DEFAULT_ROOT_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            revalidate_on_suggestion: true,
        }
    }
}

impl ActionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Override the root URL, trimming trailing slashes
    pub fn with_root_url(mut self, root_url: impl Into<String>) -> Self {
        self.root_url = normalize_root(&root_url.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.root_url.starts_with("http://") || self.root_url.starts_with("https://")) {
            return Err(ActionError::ConfigError(format!(
                "Root URL must start with http:// or https://, got '{}'",
                self.root_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ActionError::ConfigError(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn normalize_root(root: &str) -> String {
    root.trim().trim_end_matches('/').to_string()
}

/// Configuration parsing and validation utilities
pub struct ConfigParser;

impl ConfigParser {
    /// Load and validate the configuration from a TOML file
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ActionConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ActionError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ActionError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse_config(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse_config(content: &str) -> Result<ActionConfig> {
        let mut config: ActionConfig = toml::from_str(content)
            .map_err(|e| ActionError::ConfigError(format!("Invalid TOML syntax: {e}")))?;

        config.root_url = normalize_root(&config.root_url);
        config.validate()?;

        Ok(config)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist; otherwise `fipva.toml` in the current
    /// directory is used when present. `FIPVA_ROOT` and then `root_override`
    /// take precedence over the file.
    pub fn resolve(path: Option<&Path>, root_override: Option<&str>) -> Result<ActionConfig> {
        let mut config = match path {
            Some(path) => Self::load_config(path)?,
            None => {
                let default_path = get_config_path();
                if default_path.exists() {
                    Self::load_config(default_path)?
                } else {
                    ActionConfig::default()
                }
            }
        };

        if let Ok(root) = std::env::var(ROOT_URL_ENV) {
            if !root.trim().is_empty() {
                config = config.with_root_url(root);
            }
        }

        if let Some(root) = root_override {
            config = config.with_root_url(root);
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn get_config_path() -> PathBuf {
    PathBuf::from("fipva.toml")
}
