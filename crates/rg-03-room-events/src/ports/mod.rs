//! Ports layer for the room event pipeline.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
