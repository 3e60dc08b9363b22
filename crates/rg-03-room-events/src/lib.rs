//! # Room Event Pipeline (rg-03)
//!
//! Dispatches multi-user chat lifecycle and messaging events. Each event is
//! first offered to the required listeners through `before` (vetoable), and
//! after it took effect every listener is told through `notify`.
//!
//! | Call | Blocked category | Required listeners | Best-effort listeners |
//! |------|------------------|--------------------|-----------------------|
//! | `before` | returns `false` | not called | never called |
//! | `before` | not blocked | until one returns `true` | never called |
//! | `notify` | blocked | not called | all called |
//! | `notify` | not blocked | all called | all called |
//!
//! ## Crate Structure
//!
//! - `domain/` - Room guard and listener list
//! - `ports/` - Dispatcher API (inbound), listener traits (outbound)
//! - `service.rs` - [`RoomEventDispatcher`]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{RoomGuard, ROOM_LAYOUT};
pub use ports::{
    ListenerHandle, RequiredListenerHandle, RequiredRoomListener, RoomEventApi,
    RoomEventListener,
};
pub use service::RoomEventDispatcher;
