//! # Packet Gate Rule
//!
//! Decides whether a packet at a traversal point must be blocked because a
//! required interceptor is absent.
//!
//! | Event dimension | Packet dimension | Blocked when |
//! |-----------------|------------------|--------------|
//! | empty | empty | never |
//! | non-empty | empty | the traversal point matches |
//! | empty | non-empty | the packet kind matches |
//! | non-empty | non-empty | both match |

use super::guard::PacketGuard;
use shared_types::{
    CategorySet, Condition, Packet, PacketCategory, PacketKind, Rejection, TrafficCategory,
    TraversalPoint, Verdict,
};
use tracing::trace;

/// `true` if the event dimension covers `point`.
pub fn should_block_point(events: &CategorySet<TrafficCategory>, point: TraversalPoint) -> bool {
    events.contains(TrafficCategory::All)
        || point
            .traffic_categories()
            .iter()
            .any(|category| events.contains(*category))
}

/// `true` if the packet dimension covers `kind`.
pub fn should_block_kind(packets: &CategorySet<PacketCategory>, kind: PacketKind) -> bool {
    packets.contains(PacketCategory::All)
        || kind
            .categories()
            .iter()
            .any(|category| packets.contains(*category))
}

/// Combine both dimensions of the block set.
pub fn should_block(blocked: &PacketGuard, kind: PacketKind, point: TraversalPoint) -> bool {
    match (blocked.events.is_empty(), blocked.packets.is_empty()) {
        (true, true) => false,
        (false, true) => should_block_point(&blocked.events, point),
        (true, false) => should_block_kind(&blocked.packets, kind),
        (false, false) => {
            should_block_point(&blocked.events, point) && should_block_kind(&blocked.packets, kind)
        }
    }
}

/// Rejection returned for a packet blocked by the gate.
///
/// Bare chat-state notifications are dropped without an error.
pub fn gate_rejection(packet: &Packet) -> Rejection {
    if packet.is_chat_state_notification() {
        return Rejection::silent();
    }

    let text = format!(
        "{} rejected due to a required component that's not present. \
         Contact your system administrator.",
        packet.kind.name()
    );
    let rejection = Rejection::new(Condition::NotAllowed).with_reason(text.clone());
    if packet.kind == PacketKind::Message {
        rejection.with_notice(text)
    } else {
        rejection
    }
}

/// Apply the gate to a packet.
pub fn gate_verdict(blocked: &PacketGuard, packet: &Packet, point: TraversalPoint) -> Verdict {
    trace!(
        kind = %packet.kind,
        %point,
        events = ?blocked.events,
        packets = ?blocked.packets,
        "Checking for required interceptors"
    );

    if should_block(blocked, packet.kind, point) {
        Verdict::Rejected(gate_rejection(packet))
    } else {
        Verdict::Allowed
    }
}
