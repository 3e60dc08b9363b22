//! Packet gate guard: traffic categories crossed with packet categories.

use rg_01_required_gate::{GuardSpec, PropertyLayout};
use shared_types::{CategorySet, PacketCategory, TrafficCategory};

/// Property keys of the packet gate.
pub const PACKET_LAYOUT: PropertyLayout = PropertyLayout {
    list_key: "interceptors.required",
    dimension_prefixes: &["interceptor.blocking.event", "interceptor.blocking.type"],
};

const EVENTS: usize = 0;
const PACKETS: usize = 1;

/// What a required interceptor guards, and the shape of the packet block set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacketGuard {
    /// Traversal points (direction and stage).
    pub events: CategorySet<TrafficCategory>,
    /// Packet kinds.
    pub packets: CategorySet<PacketCategory>,
}

impl PacketGuard {
    #[must_use]
    pub fn new(
        events: impl Into<CategorySet<TrafficCategory>>,
        packets: impl Into<CategorySet<PacketCategory>>,
    ) -> Self {
        Self {
            events: events.into(),
            packets: packets.into(),
        }
    }

    /// Guards every packet at every point.
    #[must_use]
    pub fn everything() -> Self {
        Self {
            events: CategorySet::wildcard(),
            packets: CategorySet::wildcard(),
        }
    }
}

impl GuardSpec for PacketGuard {
    const DIMENSIONS: usize = 2;

    fn absorb(&mut self, other: &Self) {
        self.events.absorb(&other.events);
        self.packets.absorb(&other.packets);
    }

    fn collapse_wildcards(&mut self) {
        self.events.collapse_wildcard();
        self.packets.collapse_wildcard();
    }

    fn is_empty(&self) -> bool {
        self.events.is_empty() && self.packets.is_empty()
    }

    fn encode_dimension(&self, dimension: usize) -> String {
        match dimension {
            EVENTS => self.events.to_property(),
            PACKETS => self.packets.to_property(),
            _ => String::new(),
        }
    }

    fn decode_dimension(&mut self, dimension: usize, raw: &str) {
        match dimension {
            EVENTS => self.events = CategorySet::from_property(raw),
            PACKETS => self.packets = CategorySet::from_property(raw),
            _ => {}
        }
    }
}
