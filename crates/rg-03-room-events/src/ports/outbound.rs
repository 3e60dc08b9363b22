//! Outbound (Driven) ports for the room event pipeline.

use shared_types::{ComponentFault, RoomEvent};

/// Receives room event notifications after the fact.
pub trait RoomEventListener: Send + Sync {
    /// Called for every event. Panics are caught and logged.
    fn on_event(&self, event: &RoomEvent);

    /// Identity used in log lines.
    fn label(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A required listener. Its absence blocks the "before" forms of the events
/// it is declared to guard.
pub trait RequiredRoomListener: RoomEventListener {
    /// Called before an event takes effect.
    ///
    /// `Ok(true)` means the listener handled the event and no further
    /// required listener is asked. [`ComponentFault::Rejected`] vetoes the
    /// event.
    fn before(&self, event: &RoomEvent) -> Result<bool, ComponentFault>;
}
