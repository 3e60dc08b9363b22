//! Room gate guard: room event categories.

use rg_01_required_gate::{GuardSpec, PropertyLayout};
use shared_types::{CategorySet, RoomEventCategory};

/// Property keys of the room gate.
pub const ROOM_LAYOUT: PropertyLayout = PropertyLayout {
    list_key: "muc.listeners.required",
    dimension_prefixes: &["muc.listener.blocking.event"],
};

/// What a required listener guards, and the shape of the room block set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomGuard {
    pub events: CategorySet<RoomEventCategory>,
}

impl RoomGuard {
    #[must_use]
    pub fn new(events: impl Into<CategorySet<RoomEventCategory>>) -> Self {
        Self {
            events: events.into(),
        }
    }

    /// Guards every room event.
    #[must_use]
    pub fn everything() -> Self {
        Self {
            events: CategorySet::wildcard(),
        }
    }

    /// `true` if the "before" form of `category` is blocked.
    pub fn blocks(&self, category: RoomEventCategory) -> bool {
        self.events.matches(category)
    }
}

impl GuardSpec for RoomGuard {
    const DIMENSIONS: usize = 1;

    fn absorb(&mut self, other: &Self) {
        self.events.absorb(&other.events);
    }

    fn collapse_wildcards(&mut self) {
        self.events.collapse_wildcard();
    }

    fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn encode_dimension(&self, _dimension: usize) -> String {
        self.events.to_property()
    }

    fn decode_dimension(&mut self, _dimension: usize, raw: &str) {
        self.events = CategorySet::from_property(raw);
    }
}
