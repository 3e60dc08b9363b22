//! # Shared Types Crate
//!
//! This crate contains the domain vocabulary shared by the required-component
//! gate (`rg-01`), the packet interception pipeline (`rg-02`) and the room
//! event pipeline (`rg-03`).
//!
//! ## Design Principles
//!
//! - **Closed category enumerations**: every guarded dimension is a small
//!   enum with a wildcard `All` member (see [`Category`]).
//! - **Tagged outcomes**: rejection is a value ([`Verdict`], [`Rejection`]),
//!   never control flow.
//! - **Minimal traffic model**: [`Packet`] and [`RoomEvent`] carry just enough
//!   structure for the gate to classify them. The full wire model lives with
//!   the routing layer.

pub mod address;
pub mod categories;
pub mod errors;
pub mod packet;
pub mod room;
pub mod verdict;

pub use address::Jid;
pub use categories::{
    Category, CategorySet, PacketCategory, RoomEventCategory, TrafficCategory,
    CATEGORY_DELIMITER,
};
pub use errors::*;
pub use packet::{
    ChildElement, Direction, Packet, PacketKind, Session, Stage, TraversalPoint,
    CHAT_STATES_NAMESPACE,
};
pub use room::RoomEvent;
pub use verdict::{ComponentFault, Condition, Rejection, Verdict};
