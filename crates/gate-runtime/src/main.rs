//! # Gate Runtime
//!
//! Loads the configuration, starts both pipelines over the configured
//! property store and reports the declared required components and the
//! categories currently blocked.
//!
//! ```text
//! gate-runtime [config.toml]
//! ```

use anyhow::{Context, Result};
use tracing::info;

use gate_runtime::{GateConfig, GateContainer};
use rg_02_packet_interception::PacketInterceptionApi;
use rg_03_room_events::RoomEventApi;
use rg_01_required_gate::GuardSpec;

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => GateConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => GateConfig::default(),
    }
    .with_env_overrides();

    gate_telemetry::init_telemetry(&config.telemetry).context("initializing telemetry")?;

    let container = GateContainer::start(&config)?;

    for (name, guard) in container.packets.declarations() {
        info!(
            name = %name,
            traffic = %guard.encode_dimension(0),
            packets = %guard.encode_dimension(1),
            "Required interceptor declared"
        );
    }
    for (name, guard) in container.rooms.declarations() {
        info!(
            name = %name,
            events = %guard.encode_dimension(0),
            "Required room listener declared"
        );
    }
    info!(
        traffic = %container.packets.blocked_traffic().to_property(),
        packets = %container.packets.blocked_packets().to_property(),
        room_events = %container.rooms.blocked_events().to_property(),
        "Currently blocked"
    );

    container.shutdown();
    Ok(())
}
