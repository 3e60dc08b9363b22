//! # Domain Layer - Room Events
//!
//! - `guard`: [`RoomGuard`] and the persisted key layout
//! - `listeners`: copy-on-write best-effort listener list

pub mod guard;
pub mod listeners;

pub use guard::*;
pub use listeners::*;
