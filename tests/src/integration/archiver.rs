//! # Archiver End to End
//!
//! An archiver is declared to guard all inbound and outbound traffic but is
//! not running. Every packet is refused before processing and only logged
//! after processing. Once the archiver registers, traffic flows again.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rg_01_required_gate::InMemoryPropertyStore;
    use rg_02_packet_interception::{PacketInterceptionApi, PacketInterceptor};
    use shared_types::{
        ChildElement, Condition, Packet, Verdict, TraversalPoint, CHAT_STATES_NAMESPACE,
    };

    use crate::fixtures::{
        call_log, entries, local_session, packet_service, RecordingInterceptor,
        RecordingRequired,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn archiver_declared() -> Arc<InMemoryPropertyStore> {
        Arc::new(InMemoryPropertyStore::with_properties([
            ("interceptors.required", "archiver"),
            ("interceptor.blocking.event.archiver", "Incoming,Outgoing"),
        ]))
    }

    fn every_kind() -> Vec<Packet> {
        vec![
            Packet::message().with_id("m1"),
            Packet::iq().with_id("q1"),
            Packet::presence(),
            Packet::roster(),
        ]
    }

    // =============================================================================
    // ARCHIVER ABSENT
    // =============================================================================

    #[test]
    fn test_every_packet_rejected_before_processing() {
        let service = packet_service(archiver_declared());
        let session = local_session("alice");

        for point in [TraversalPoint::INBOUND_PRE, TraversalPoint::OUTBOUND_PRE] {
            for mut packet in every_kind() {
                let verdict = service.invoke(&mut packet, &session, point);
                let rejection = verdict.rejection().expect("gate must reject");
                assert_eq!(rejection.condition, Some(Condition::NotAllowed));
                assert_eq!(
                    rejection.reason.as_deref(),
                    Some(
                        format!(
                            "{} rejected due to a required component that's not present. \
                             Contact your system administrator.",
                            packet.kind.name()
                        )
                        .as_str()
                    )
                );
            }
        }
    }

    #[test]
    fn test_only_messages_carry_a_notice() {
        let service = packet_service(archiver_declared());
        let session = local_session("alice");

        let mut message = Packet::message();
        let verdict = service.invoke(&mut message, &session, TraversalPoint::INBOUND_PRE);
        assert!(verdict.rejection().unwrap().notice.is_some());

        let mut iq = Packet::iq();
        let verdict = service.invoke(&mut iq, &session, TraversalPoint::INBOUND_PRE);
        assert!(verdict.rejection().unwrap().notice.is_none());
    }

    #[test]
    fn test_after_processing_is_logged_only() {
        let log = call_log();
        let service = packet_service(archiver_declared());
        let global: Arc<dyn PacketInterceptor> = Arc::new(RecordingInterceptor::new("audit", &log));
        service.add_interceptor(global);

        for point in [TraversalPoint::INBOUND_POST, TraversalPoint::OUTBOUND_POST] {
            for mut packet in every_kind() {
                assert_eq!(
                    service.invoke(&mut packet, &local_session("alice"), point),
                    Verdict::Allowed
                );
            }
        }
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn test_chat_state_notification_dropped_silently() {
        let service = packet_service(archiver_declared());
        let mut typing = Packet::message()
            .with_child(ChildElement::new("composing", CHAT_STATES_NAMESPACE));

        let verdict = service.invoke(&mut typing, &local_session("alice"), TraversalPoint::INBOUND_PRE);
        assert!(verdict.rejection().unwrap().is_silent());
    }

    // =============================================================================
    // ARCHIVER PRESENT
    // =============================================================================

    #[test]
    fn test_registered_archiver_unblocks_everything() {
        let log = call_log();
        let service = packet_service(archiver_declared());
        service
            .register_required(
                "archiver",
                Arc::new(RecordingRequired::new("archiver", &log)),
                service.declarations()["archiver"].clone(),
            )
            .unwrap();
        service.add_interceptor(Arc::new(RecordingInterceptor::new("audit", &log)));

        assert!(service.blocked_traffic().is_empty());
        assert!(service.blocked_packets().is_empty());

        let session = local_session("alice");
        for mut packet in every_kind() {
            assert!(service
                .invoke(&mut packet, &session, TraversalPoint::INBOUND_PRE)
                .is_allowed());
        }
        assert_eq!(entries(&log).len(), 8);
        assert_eq!(
            entries(&log)[..2],
            ["archiver@inbound/pre".to_string(), "audit@inbound/pre".to_string()]
        );
    }

    #[test]
    fn test_archiver_stopping_blocks_again() {
        let log = call_log();
        let store = archiver_declared();
        let service = packet_service(Arc::clone(&store));
        let guard = service.declarations()["archiver"].clone();
        service
            .register_required("archiver", Arc::new(RecordingRequired::new("archiver", &log)), guard)
            .unwrap();
        let writes = store.batches_applied();

        assert!(service.unregister_required("archiver", false));
        assert_eq!(store.batches_applied(), writes);

        let mut packet = Packet::presence();
        assert!(service
            .invoke(&mut packet, &local_session("alice"), TraversalPoint::OUTBOUND_PRE)
            .is_rejected());
    }
}
