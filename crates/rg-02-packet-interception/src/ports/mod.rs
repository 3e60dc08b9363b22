//! Ports layer for the packet interception pipeline.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
