//! # Declaration Persistence
//!
//! Declarations written by one pipeline instance are read back by the next,
//! and repeated load/persist cycles leave the property store unchanged.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rg_01_required_gate::InMemoryPropertyStore;
    use rg_02_packet_interception::{PacketGuard, PacketInterceptionApi};
    use rg_03_room_events::{RoomEventApi, RoomGuard};
    use shared_types::{PacketCategory, RoomEventCategory, TrafficCategory};

    use crate::fixtures::{
        call_log, packet_service, room_dispatcher, RecordingListener, RecordingRequired,
    };

    #[test]
    fn test_persist_then_load_is_idempotent() {
        let log = call_log();
        let store = Arc::new(InMemoryPropertyStore::new());

        let first = packet_service(Arc::clone(&store));
        first
            .register_required(
                "archiver",
                Arc::new(RecordingRequired::new("archiver", &log)),
                PacketGuard::new(
                    [TrafficCategory::Incoming, TrafficCategory::Outgoing],
                    [PacketCategory::Message],
                ),
            )
            .unwrap();
        first
            .register_required(
                "filter",
                Arc::new(RecordingRequired::new("filter", &log)),
                PacketGuard::new([TrafficCategory::Incoming], []),
            )
            .unwrap();
        let written = store.snapshot();

        // A second instance over the same store reads the same table and
        // writes it back unchanged.
        let second = packet_service(Arc::clone(&store));
        assert_eq!(second.declarations(), first.declarations());
        second
            .register_required(
                "filter",
                Arc::new(RecordingRequired::new("filter", &log)),
                PacketGuard::new([TrafficCategory::Incoming], []),
            )
            .unwrap();
        assert_eq!(store.snapshot(), written);

        assert_eq!(
            written.get("interceptors.required").map(String::as_str),
            Some("archiver,filter")
        );
        assert_eq!(
            written
                .get("interceptor.blocking.event.archiver")
                .map(String::as_str),
            Some("Incoming,Outgoing")
        );
        assert!(!written.contains_key("interceptor.blocking.type.filter"));
    }

    #[test]
    fn test_wildcard_collapses_on_load_and_persist() {
        let store = Arc::new(InMemoryPropertyStore::with_properties([
            ("interceptors.required", " archiver ,"),
            ("interceptor.blocking.event.archiver", "Incoming, All ,Bogus"),
            ("interceptor.blocking.type.archiver", "Message"),
        ]));

        let service = packet_service(Arc::clone(&store));
        assert_eq!(
            service.blocked_traffic().to_property(),
            TrafficCategory::All.to_string()
        );

        let log = call_log();
        service
            .register_required(
                "archiver",
                Arc::new(RecordingRequired::new("archiver", &log)),
                PacketGuard::new([TrafficCategory::All, TrafficCategory::Incoming], []),
            )
            .unwrap();
        assert_eq!(
            store.get("interceptor.blocking.event.archiver").as_deref(),
            Some("All")
        );
        assert_eq!(store.get("interceptors.required").as_deref(), Some("archiver"));
    }

    #[test]
    fn test_forgetting_last_declaration_clears_the_store() {
        let log = call_log();
        let store = Arc::new(InMemoryPropertyStore::new());
        let service = room_dispatcher(Arc::clone(&store));
        service
            .register_required(
                "moderator",
                Arc::new(RecordingListener::new("moderator", &log)),
                RoomGuard::new([RoomEventCategory::BeforeJoined]),
            )
            .unwrap();
        assert_eq!(
            store.get("muc.listener.blocking.event.moderator").as_deref(),
            Some("BeforeJoined")
        );

        assert!(service.unregister_required("moderator", true));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_gates_share_a_store_without_touching_each_other() {
        let log = call_log();
        let store = Arc::new(InMemoryPropertyStore::new());
        let packets = packet_service(Arc::clone(&store));
        let rooms = room_dispatcher(Arc::clone(&store));

        packets
            .register_required(
                "archiver",
                Arc::new(RecordingRequired::new("archiver", &log)),
                PacketGuard::new([TrafficCategory::Incoming], []),
            )
            .unwrap();
        rooms
            .register_required(
                "moderator",
                Arc::new(RecordingListener::new("moderator", &log)),
                RoomGuard::new([RoomEventCategory::BeforeCreated]),
            )
            .unwrap();
        assert!(packets.unregister_required("archiver", true));

        let properties = store.snapshot();
        assert!(!properties.contains_key("interceptors.required"));
        assert_eq!(
            properties.get("muc.listeners.required").map(String::as_str),
            Some("moderator")
        );
    }
}
