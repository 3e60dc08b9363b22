//! Ports layer for the required-component gate.
//!
//! - Inbound (Driving) ports: registry API used by the pipelines
//! - Outbound (Driven) ports: property storage and metrics

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
