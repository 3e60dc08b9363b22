//! # Integration Flows
//!
//! Scenarios that drive the pipelines the way the routing and room layers
//! of a server would.

pub mod archiver;
pub mod concurrency;
pub mod persistence;
pub mod room_flows;
