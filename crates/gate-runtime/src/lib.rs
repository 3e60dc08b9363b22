//! # Gate Runtime Library
//!
//! Wires the required-component gates into a server instance:
//!
//! - `container/` - TOML configuration and the [`GateContainer`]
//! - `adapters/` - JSON-file property store
//!
//! The `gate-runtime` binary loads a configuration, starts the container,
//! reports what is currently blocked and exits.

pub mod adapters;
pub mod container;

pub use adapters::JsonFilePropertyStore;
pub use container::{ConfigError, GateConfig, GateContainer, StorageBackend};
