//! # Required-Gate Benchmarks
//!
//! | Path | Expectation |
//! |------|-------------|
//! | `gate_verdict` | no allocation when nothing is blocked |
//! | `invoke`, empty chains | one snapshot load |
//! | `invoke`, N global interceptors | linear in N |

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rg_01_required_gate::InMemoryPropertyStore;
use rg_02_packet_interception::{
    gate_verdict, DomainLocality, PacketGuard, PacketInterceptionApi, PacketInterceptionService,
    PacketInterceptor,
};
use shared_types::{
    ComponentFault, Jid, Packet, PacketCategory, Session, TrafficCategory, TraversalPoint,
};

struct Noop;

impl PacketInterceptor for Noop {
    fn intercept(
        &self,
        _packet: &mut Packet,
        _session: &Session,
        _point: TraversalPoint,
    ) -> Result<(), ComponentFault> {
        Ok(())
    }
}

fn service() -> PacketInterceptionService {
    PacketInterceptionService::load(
        Arc::new(InMemoryPropertyStore::new()),
        Arc::new(DomainLocality::new("example.org")),
    )
    .expect("in-memory store")
}

// ============================================================================
// Gate rule
// ============================================================================

fn bench_gate_verdict(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate-verdict");
    let packet = Packet::message();

    let open = PacketGuard::default();
    group.bench_function("nothing_blocked", |b| {
        b.iter(|| black_box(gate_verdict(&open, &packet, TraversalPoint::INBOUND_PRE)))
    });

    let both = PacketGuard::new(
        [TrafficCategory::Incoming, TrafficCategory::Outgoing],
        [PacketCategory::Message],
    );
    group.bench_function("both_dimensions_blocked", |b| {
        b.iter(|| black_box(gate_verdict(&both, &packet, TraversalPoint::INBOUND_PRE)))
    });

    group.finish();
}

// ============================================================================
// Full traversal
// ============================================================================

fn bench_invoke(c: &mut Criterion) {
    let mut group = c.benchmark_group("invoke");
    let session = Session::new(Jid::bare("alice", "example.org"));

    for size in [0usize, 4, 16, 64] {
        let service = service();
        for _ in 0..size {
            service.add_interceptor(Arc::new(Noop));
        }

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("global_interceptors", size), &size, |b, _| {
            b.iter(|| {
                let mut packet = Packet::message();
                black_box(service.invoke(&mut packet, &session, TraversalPoint::INBOUND_PRE))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_gate_verdict, bench_invoke);
criterion_main!(benches);
