//! # Domain Layer - Packet Interception
//!
//! - `guard`: [`PacketGuard`] and the persisted key layout
//! - `gate`: the block rule and the gate's rejection
//! - `chain`: copy-on-write interceptor chains
//! - `errors`: [`ChainError`]

pub mod chain;
pub mod errors;
pub mod gate;
pub mod guard;

pub use chain::*;
pub use errors::*;
pub use gate::*;
pub use guard::*;
