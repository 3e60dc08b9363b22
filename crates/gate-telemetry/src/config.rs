//! Telemetry configuration from the `[telemetry]` section and the environment.

use serde::Deserialize;
use std::env;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,

    /// Log filter directive (trace, debug, info, warn, error, or a full `EnvFilter` string)
    pub log_level: String,

    /// Whether to write log lines to stdout at all
    pub console_output: bool,

    /// Whether to write JSON instead of the human-readable format
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "required-gate".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RG_SERVICE_NAME`: Service name (default: required-gate)
    /// - `RG_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `RG_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `RG_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply any of the `RG_*` variables that are set on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(name) = env::var("RG_SERVICE_NAME") {
            self.service_name = name;
        }
        if let Ok(level) = env::var("RG_LOG_LEVEL").or_else(|_| env::var("RUST_LOG")) {
            self.log_level = level;
        }
        if let Ok(v) = env::var("RG_CONSOLE_OUTPUT") {
            self.console_output = parse_flag(&v, self.console_output);
        }
        if let Ok(v) = env::var("RG_JSON_LOGS") {
            self.json_logs = parse_flag(&v, self.json_logs);
        }
        self
    }
}

fn parse_flag(value: &str, fallback: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => true,
        "false" | "0" | "no" => false,
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "required-gate");
        assert_eq!(config.log_level, "info");
        assert!(config.console_output);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE", false));
        assert!(parse_flag("1", false));
        assert!(!parse_flag("0", true));
        assert!(parse_flag("maybe", true));
        assert!(!parse_flag("maybe", false));
    }
}
