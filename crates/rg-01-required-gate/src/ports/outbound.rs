//! Outbound (Driven) ports for the required-component gate.

use crate::domain::{PropertyOperation, StoreError};
use std::collections::BTreeMap;

/// Durable key → string property store.
///
/// Loaded once when a gate starts and written after every mutation that
/// changes the declaration table.
pub trait PropertyStore: Send + Sync {
    /// Read every stored property.
    fn load(&self) -> Result<BTreeMap<String, String>, StoreError>;

    /// Apply a batch of writes atomically.
    fn apply(&self, operations: Vec<PropertyOperation>) -> Result<(), StoreError>;
}

/// Outcomes counted by the pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateOutcome {
    /// Traffic blocked because a required component is absent.
    GateBlocked,
    /// A component rejected a packet or event.
    ComponentRejected,
    /// A component failed or panicked.
    ComponentFault,
    /// A required interceptor consumed a packet.
    Swallowed,
    /// A required listener handled a "before" event.
    Vetoed,
}

impl GateOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateOutcome::GateBlocked => "gate_blocked",
            GateOutcome::ComponentRejected => "component_rejected",
            GateOutcome::ComponentFault => "component_fault",
            GateOutcome::Swallowed => "swallowed",
            GateOutcome::Vetoed => "vetoed",
        }
    }
}

/// Metrics sink for pipeline outcomes and registry size.
pub trait GateMetrics: Send + Sync {
    /// Count one outcome for the named gate (`"packet"` or `"room"`).
    fn record(&self, gate: &'static str, outcome: GateOutcome);

    /// Report how many components are live and declared after a change.
    fn registry(&self, gate: &'static str, live: usize, declared: usize);
}

/// Metrics sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl GateMetrics for NoopMetrics {
    fn record(&self, _gate: &'static str, _outcome: GateOutcome) {}

    fn registry(&self, _gate: &'static str, _live: usize, _declared: usize) {}
}
