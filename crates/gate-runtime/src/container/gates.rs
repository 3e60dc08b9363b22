//! # Gate Container
//!
//! Holds the packet and room pipelines of one server instance. Both gates
//! share one property store; their layouts own disjoint keys.
//!
//! ## Lifecycle
//!
//! ```text
//! GateContainer::start ──→ property store ──→ PacketInterceptionService
//!                                         └──→ RoomEventDispatcher
//!        ...components register / unregister...
//! GateContainer::shutdown ──→ release every required component (declarations kept)
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use gate_telemetry::{register_metrics, PrometheusGateMetrics};
use rg_01_required_gate::{GateMetrics, InMemoryPropertyStore, PropertyStore};
use rg_02_packet_interception::{DomainLocality, PacketInterceptionApi, PacketInterceptionService};
use rg_03_room_events::{RoomEventApi, RoomEventDispatcher};

use crate::adapters::JsonFilePropertyStore;
use crate::container::config::{GateConfig, StorageBackend};

/// Both pipelines of one server instance.
pub struct GateContainer {
    /// Packet interception pipeline.
    pub packets: Arc<PacketInterceptionService>,
    /// Room event pipeline.
    pub rooms: Arc<RoomEventDispatcher>,
    store: Arc<dyn PropertyStore>,
}

impl GateContainer {
    /// Open the configured property store and build both pipelines.
    pub fn start(config: &GateConfig) -> Result<Self> {
        let store: Arc<dyn PropertyStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(InMemoryPropertyStore::new()),
            StorageBackend::File => Arc::new(
                JsonFilePropertyStore::open(&config.storage.path).with_context(|| {
                    format!(
                        "failed to open property file {}",
                        config.storage.path.display()
                    )
                })?,
            ),
        };
        info!(backend = ?config.storage.backend, "Property store opened");

        Self::with_store(config, store)
    }

    /// Build both pipelines over an existing property store.
    pub fn with_store(config: &GateConfig, store: Arc<dyn PropertyStore>) -> Result<Self> {
        register_metrics().context("failed to register gate metrics")?;
        let metrics: Arc<dyn GateMetrics> = Arc::new(PrometheusGateMetrics);

        let locality = Arc::new(DomainLocality::new(config.server.domain.clone()));
        let packets = PacketInterceptionService::load(Arc::clone(&store), locality)
            .context("failed to load required interceptor declarations")?
            .with_metrics(Arc::clone(&metrics));
        let rooms = RoomEventDispatcher::load(Arc::clone(&store))
            .context("failed to load required listener declarations")?
            .with_metrics(metrics);

        let container = Self {
            packets: Arc::new(packets),
            rooms: Arc::new(rooms),
            store,
        };

        info!(
            domain = %config.server.domain,
            blocked_traffic = %container.packets.blocked_traffic().to_property(),
            blocked_packets = %container.packets.blocked_packets().to_property(),
            blocked_room_events = %container.rooms.blocked_events().to_property(),
            "Gate container started"
        );
        Ok(container)
    }

    /// The shared property store.
    pub fn store(&self) -> &Arc<dyn PropertyStore> {
        &self.store
    }

    /// Unregister every live required component without forgetting it.
    ///
    /// Returns the released names, packet gate first.
    pub fn shutdown(&self) -> Vec<String> {
        let mut released = self.packets.release_required();
        released.extend(self.rooms.release_required());
        info!(released = released.len(), "Gate container shut down");
        released
    }
}
