//! # Room Event Flows
//!
//! A room service asks `before` each event takes effect and reports it
//! through `notify` afterwards.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rg_01_required_gate::InMemoryPropertyStore;
    use rg_03_room_events::{RoomEventApi, RoomGuard};
    use shared_types::{Jid, Packet, RoomEvent, RoomEventCategory};

    use crate::fixtures::{call_log, entries, room_dispatcher, RecordingListener, DOMAIN};

    fn room() -> Jid {
        Jid::bare("lobby", format!("conference.{DOMAIN}"))
    }

    fn joined() -> RoomEvent {
        RoomEvent::OccupantJoined {
            room: room(),
            user: Jid::bare("alice", DOMAIN),
            nickname: "alice".to_string(),
        }
    }

    fn room_message() -> RoomEvent {
        RoomEvent::MessageReceived {
            room: room(),
            user: Jid::bare("bob", DOMAIN),
            nickname: "bob".to_string(),
            message: Packet::message().with_id("r1"),
        }
    }

    #[test]
    fn test_first_handling_listener_wins() {
        let log = call_log();
        let dispatcher = room_dispatcher(Arc::new(InMemoryPropertyStore::new()));
        dispatcher
            .register_required(
                "moderator",
                Arc::new(RecordingListener::handling("moderator", &log)),
                RoomGuard::new([RoomEventCategory::BeforeJoined]),
            )
            .unwrap();
        dispatcher
            .register_required(
                "logger",
                Arc::new(RecordingListener::new("logger", &log)),
                RoomGuard::default(),
            )
            .unwrap();

        assert_eq!(dispatcher.before(&joined()), Ok(true));
        assert_eq!(entries(&log), ["moderator:before:occupant_joined"]);
    }

    #[test]
    fn test_missing_moderator_blocks_only_its_events() {
        let log = call_log();
        let store = Arc::new(InMemoryPropertyStore::with_properties([
            ("muc.listeners.required", "moderator"),
            ("muc.listener.blocking.event.moderator", "BeforeJoined"),
        ]));
        let dispatcher = room_dispatcher(store);
        dispatcher
            .register_required(
                "logger",
                Arc::new(RecordingListener::new("logger", &log)),
                RoomGuard::default(),
            )
            .unwrap();

        assert_eq!(dispatcher.before(&joined()), Ok(false));
        assert_eq!(dispatcher.before(&room_message()), Ok(false));
        assert_eq!(entries(&log), ["logger:before:message_received"]);
    }

    #[test]
    fn test_notify_reaches_best_effort_listeners_while_blocked() {
        let log = call_log();
        let store = Arc::new(InMemoryPropertyStore::with_properties([
            ("muc.listeners.required", "moderator"),
            ("muc.listener.blocking.event.moderator", "All"),
        ]));
        let dispatcher = room_dispatcher(store);
        dispatcher.add_listener(Arc::new(RecordingListener::new("stats", &log)));

        dispatcher.notify(&joined());
        assert_eq!(entries(&log), ["stats:event:occupant_joined"]);

        dispatcher
            .register_required(
                "moderator",
                Arc::new(RecordingListener::new("moderator", &log)),
                RoomGuard::everything(),
            )
            .unwrap();
        dispatcher.notify(&room_message());
        assert_eq!(
            entries(&log)[1..],
            [
                "moderator:event:message_received".to_string(),
                "stats:event:message_received".to_string(),
            ]
        );
    }
}
