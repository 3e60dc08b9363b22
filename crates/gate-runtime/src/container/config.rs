//! # Runtime Configuration
//!
//! Loaded from a TOML file; every field has a default.
//!
//! ```toml
//! [server]
//! domain = "example.org"
//!
//! [storage]
//! backend = "file"            # or "memory"
//! path = "./data/properties.json"
//!
//! [telemetry]
//! log_level = "debug"
//! json_logs = true
//! ```

use gate_telemetry::TelemetryConfig;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub telemetry: TelemetryConfig,
}

/// Server identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Domain served by this instance. Principals under it are local.
    pub domain: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            domain: "localhost".to_string(),
        }
    }
}

/// Where declarations of required components are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Lost on restart.
    #[default]
    Memory,
    /// JSON object on disk.
    File,
}

/// Property store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Property file, used by the `file` backend.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: PathBuf::from("./data/properties.json"),
        }
    }
}

/// Errors that can occur during config loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: String },

    /// TOML parsing error.
    #[error("Failed to parse config: {0}")]
    Parse(String),
}

impl GateConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment overrides.
    ///
    /// - `RG_SERVER_DOMAIN`: server domain
    /// - `RG_PROPERTY_FILE`: property file; selects the `file` backend
    /// - the `RG_*` telemetry variables, see [`TelemetryConfig::from_env`]
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        let mut config = self.with_overrides(|key| env::var(key).ok());
        config.telemetry = config.telemetry.with_env_overrides();
        config
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(domain) = lookup("RG_SERVER_DOMAIN") {
            self.server.domain = domain;
        }
        if let Some(path) = lookup("RG_PROPERTY_FILE") {
            self.storage.backend = StorageBackend::File;
            self.storage.path = PathBuf::from(path);
        }
        self
    }
}
