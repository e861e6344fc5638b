//! Configuration loading for regprobe.
//!
//! Configuration is read from an optional TOML file. Every key has a default,
//! so an empty file (or no file at all) probes the local gateway on port 3000
//! and the user service on port 3001.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::payload::RegistrationPayload;
use crate::target::{Route, Target};

/// Root configuration for regprobe.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Per-request timeout in seconds (default: 5).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Value of the `Origin` header (default: the frontend dev server).
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Registration body.
    #[serde(default)]
    pub payload: RegistrationPayload,
    /// Endpoints, probed in order.
    #[serde(default = "default_targets")]
    pub targets: Vec<TargetConfig>,
}

/// One `[[targets]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetConfig {
    /// Display name used in labels.
    pub name: String,
    /// Gateway or direct.
    pub route: Route,
    /// Registration endpoint URL.
    pub url: String,
}

// Default value functions
fn default_timeout_secs() -> u64 {
    5
}

fn default_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_targets() -> Vec<TargetConfig> {
    vec![
        TargetConfig {
            name: "API Gateway".to_string(),
            route: Route::Gateway,
            url: "http://localhost:3000/api/auth/register".to_string(),
        },
        TargetConfig {
            name: "User Service".to_string(),
            route: Route::Direct,
            url: "http://localhost:3001/api/auth/register".to_string(),
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            origin: default_origin(),
            payload: RegistrationPayload::default(),
            targets: default_targets(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate settings and resolve target URLs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero timeout, an empty target
    /// list, or a target whose URL is unusable.
    pub fn targets(&self) -> Result<Vec<Target>, ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.targets.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one target is required".to_string(),
            ));
        }

        self.targets
            .iter()
            .map(|t| Target::parse(&t.name, t.route, &t.url))
            .collect()
    }

    /// Point the first target with the given route at a different URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if no target has that route.
    pub fn override_url(&mut self, route: Route, url: &str) -> Result<(), ConfigError> {
        let target = self
            .targets
            .iter_mut()
            .find(|t| t.route == route)
            .ok_or_else(|| ConfigError::Invalid(format!("no {route:?} target to override")))?;
        target.url = url.to_string();
        Ok(())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// Configuration values are unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// The HTTP client could not be built from these settings.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
