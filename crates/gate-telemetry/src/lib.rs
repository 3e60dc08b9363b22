//! # Gate Telemetry
//!
//! Structured logging and Prometheus metrics for the required-component
//! gates.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gate_telemetry::{init_telemetry, TelemetryConfig};
//!
//! init_telemetry(&TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RG_SERVICE_NAME` | `required-gate` | Service name in the startup log |
//! | `RG_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `RG_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `RG_JSON_LOGS` | `false` | JSON log lines |

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, observe_registry, register_metrics, PrometheusGateMetrics, GATE_OUTCOMES,
    REGISTRY, REQUIRED_DECLARED, REQUIRED_LIVE,
};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics and install the global subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    tracing_setup::init_tracing(config)
}
