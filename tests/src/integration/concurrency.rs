//! # Concurrent Traversal and Registration
//!
//! Traversals never wait on registry writers and always see one consistent
//! snapshot: either the archiver is live (and runs) or the packet is refused.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    use rg_01_required_gate::InMemoryPropertyStore;
    use rg_02_packet_interception::{
        Flow, PacketGuard, PacketInterceptionApi, PacketInterceptor, RequiredPacketInterceptor,
    };
    use shared_types::{
        ComponentFault, Packet, Session, TrafficCategory, TraversalPoint, Verdict,
    };

    use crate::fixtures::{local_session, packet_service, RecordingInterceptor, call_log};

    const READERS: usize = 4;
    const ROUNDS: usize = 500;

    #[derive(Default)]
    struct CountingArchiver {
        seen: AtomicUsize,
    }

    impl RequiredPacketInterceptor for CountingArchiver {
        fn intercept(
            &self,
            _packet: &mut Packet,
            _session: &Session,
            _point: TraversalPoint,
        ) -> Result<Flow, ComponentFault> {
            self.seen.fetch_add(1, Ordering::SeqCst);
            Ok(Flow::Continue)
        }
    }

    #[test]
    fn test_traversals_race_registration() {
        let store = Arc::new(InMemoryPropertyStore::with_properties([
            ("interceptors.required", "archiver"),
            ("interceptor.blocking.event.archiver", "Incoming"),
        ]));
        let service = packet_service(store);
        let archiver = Arc::new(CountingArchiver::default());
        let guard = PacketGuard::new([TrafficCategory::Incoming], []);

        let allowed = AtomicUsize::new(0);
        let rejected = AtomicUsize::new(0);

        thread::scope(|scope| {
            for _ in 0..READERS {
                scope.spawn(|| {
                    let session = local_session("alice");
                    for _ in 0..ROUNDS {
                        let mut packet = Packet::message();
                        match service.invoke(&mut packet, &session, TraversalPoint::INBOUND_PRE) {
                            Verdict::Allowed => allowed.fetch_add(1, Ordering::SeqCst),
                            Verdict::Rejected(_) => rejected.fetch_add(1, Ordering::SeqCst),
                        };
                    }
                });
            }

            scope.spawn(|| {
                for _ in 0..ROUNDS / 10 {
                    service
                        .register_required("archiver", archiver.clone(), guard.clone())
                        .unwrap();
                    assert!(service.unregister_required("archiver", false));
                }
            });
        });

        let allowed = allowed.load(Ordering::SeqCst);
        assert_eq!(allowed + rejected.load(Ordering::SeqCst), READERS * ROUNDS);
        // Every allowed packet went through the archiver.
        assert_eq!(archiver.seen.load(Ordering::SeqCst), allowed);
        assert!(service.blocked_traffic().contains(TrafficCategory::Incoming));
    }

    #[test]
    fn test_chain_mutation_during_traversal() {
        let service = packet_service(Arc::new(InMemoryPropertyStore::new()));
        let log = call_log();
        let interceptors: Vec<Arc<dyn PacketInterceptor>> = (0..8)
            .map(|_| Arc::new(RecordingInterceptor::new("audit", &log)) as Arc<dyn PacketInterceptor>)
            .collect();

        thread::scope(|scope| {
            scope.spawn(|| {
                let session = local_session("alice");
                for _ in 0..ROUNDS {
                    let mut packet = Packet::iq();
                    assert!(service
                        .invoke(&mut packet, &session, TraversalPoint::OUTBOUND_POST)
                        .is_allowed());
                }
            });

            scope.spawn(|| {
                for _ in 0..ROUNDS / 10 {
                    for interceptor in &interceptors {
                        service.add_interceptor(Arc::clone(interceptor));
                    }
                    for interceptor in &interceptors {
                        assert!(service.remove_interceptor(interceptor));
                    }
                }
            });
        });

        assert!(service.interceptors().is_empty());
    }
}
