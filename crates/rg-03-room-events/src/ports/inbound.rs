//! Inbound (Driving) ports for the room event pipeline.

use super::outbound::{RequiredRoomListener, RoomEventListener};
use crate::domain::RoomGuard;
use rg_01_required_gate::GateError;
use shared_types::{CategorySet, Rejection, RoomEvent, RoomEventCategory};
use std::sync::Arc;

/// Handle of a best-effort listener.
pub type ListenerHandle = Arc<dyn RoomEventListener>;

/// Handle of a required listener.
pub type RequiredListenerHandle = Arc<dyn RequiredRoomListener>;

/// Room event API used by the chat room layer and by components.
pub trait RoomEventApi: Send + Sync {
    /// Ask the required listeners about an event before it takes effect.
    ///
    /// Returns `Ok(false)` without asking anyone while the event's category is
    /// blocked.
    fn before(&self, event: &RoomEvent) -> Result<bool, Rejection>;

    /// Notify listeners that an event took effect.
    fn notify(&self, event: &RoomEvent);

    fn add_listener(&self, listener: ListenerHandle);

    fn remove_listener(&self, listener: &ListenerHandle) -> bool;

    fn listeners(&self) -> Vec<ListenerHandle>;

    /// Register a required listener and declare what it guards.
    fn register_required(
        &self,
        name: &str,
        listener: RequiredListenerHandle,
        guard: RoomGuard,
    ) -> Result<(), GateError>;

    /// Unregister a required listener, forgetting its declaration if asked.
    fn unregister_required(&self, name: &str, forget: bool) -> bool;

    /// Live required listeners, registration order.
    fn required_listeners(&self) -> Vec<RequiredListenerHandle>;

    /// Room event categories currently blocked.
    fn blocked_events(&self) -> CategorySet<RoomEventCategory>;
}
