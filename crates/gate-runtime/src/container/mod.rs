//! # Gate Container
//!
//! Configuration and lifetime of the pipelines of one server instance.

pub mod config;
pub mod gates;

pub use config::{ConfigError, GateConfig, ServerConfig, StorageBackend, StorageConfig};
pub use gates::GateContainer;
