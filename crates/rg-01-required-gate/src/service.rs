//! # Required Gate Service
//!
//! Wraps the [`Registry`] with a single-writer lock and publishes an
//! immutable [`GateSnapshot`] after every mutation. Readers load the snapshot
//! without locking and never observe a partially updated block set.
//!
//! ```text
//! register/unregister ──→ [Mutex<Registry>] ──→ recompute ──→ ArcSwap::store
//!                                   │
//!                                   └──→ persist declarations (PropertyStore)
//!
//! pipelines ──→ ArcSwap::load_full ──→ GateSnapshot { blocked, required }
//! ```

use crate::domain::{
    decode_table, plan_writes, GateError, GuardSpec, PropertyLayout, Registry, RequiredMember,
    StoreError,
};
use crate::ports::{GateMetrics, NoopMetrics, PropertyStore, RequiredGateApi};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info};

/// What the pipelines read on every call.
#[derive(Debug)]
pub struct GateSnapshot<G, H> {
    /// Currently blocked categories.
    pub blocked: G,
    /// Live required components, registration order.
    pub required: Vec<RequiredMember<H>>,
}

/// Generic required-component gate.
///
/// `G` is the guard type, `H` the component handle (usually an `Arc<dyn _>`).
pub struct RequiredGate<G, H> {
    label: &'static str,
    layout: PropertyLayout,
    store: Arc<dyn PropertyStore>,
    metrics: Arc<dyn GateMetrics>,
    registry: Mutex<Registry<G, H>>,
    snapshot: ArcSwap<GateSnapshot<G, H>>,
}

impl<G, H> RequiredGate<G, H>
where
    G: GuardSpec,
    H: Clone + Send + Sync + 'static,
{
    /// Build a gate from the declarations persisted in `store`.
    ///
    /// Nothing is live yet, so every declared category starts out blocked.
    pub fn load(
        label: &'static str,
        layout: PropertyLayout,
        store: Arc<dyn PropertyStore>,
    ) -> Result<Self, StoreError> {
        let properties = store.load()?;
        let declarations: BTreeMap<String, G> = decode_table(&layout, &properties);
        let registry = Registry::from_declarations(declarations);
        let snapshot = Self::build_snapshot(&registry);

        info!(
            "[{}] Loaded {} required component declaration(s), blocked: {:?}",
            label,
            registry.declarations().len(),
            snapshot.blocked
        );

        Ok(Self {
            label,
            layout,
            store,
            metrics: Arc::new(NoopMetrics),
            registry: Mutex::new(registry),
            snapshot: ArcSwap::from_pointee(snapshot),
        })
    }

    /// Report registry size through `metrics`, starting with the loaded state.
    pub fn set_metrics(&mut self, metrics: Arc<dyn GateMetrics>) {
        self.metrics = metrics;
        let registry = self.registry.lock();
        self.metrics
            .registry(self.label, registry.live().len(), registry.declarations().len());
    }

    /// Name used in log lines (`"packet"` or `"room"`).
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<GateSnapshot<G, H>> {
        self.snapshot.load_full()
    }

    /// Unregister every live component without forgetting its declaration.
    ///
    /// Returns the released names, registration order.
    pub fn release_all(&self) -> Vec<String> {
        let mut registry = self.registry.lock();
        let names: Vec<String> = registry.live().iter().map(|m| m.name.clone()).collect();
        for name in &names {
            registry.unregister(name, false);
        }
        self.publish(&registry);

        if !names.is_empty() {
            info!("[{}] Released {} required component(s)", self.label, names.len());
        }
        names
    }

    fn build_snapshot(registry: &Registry<G, H>) -> GateSnapshot<G, H> {
        GateSnapshot {
            blocked: registry.block_set(),
            required: registry.live().to_vec(),
        }
    }

    fn publish(&self, registry: &Registry<G, H>) {
        let snapshot = Self::build_snapshot(registry);
        debug!(gate = self.label, blocked = ?snapshot.blocked, "Block set recomputed");
        self.snapshot.store(Arc::new(snapshot));
        self.metrics
            .registry(self.label, registry.live().len(), registry.declarations().len());
    }

    /// Write the declaration table back. Failures are logged; the in-memory
    /// state stays authoritative and the next persist resynchronises.
    fn persist(&self, registry: &Registry<G, H>) {
        let current = match self.store.load() {
            Ok(current) => current,
            Err(e) => {
                error!(gate = self.label, error = %e, "Failed to read property store before persisting");
                return;
            }
        };

        let operations = plan_writes(&self.layout, registry.declarations(), &current);
        if operations.is_empty() {
            return;
        }

        let count = operations.len();
        match self.store.apply(operations) {
            Ok(()) => debug!(gate = self.label, operations = count, "Declarations persisted"),
            Err(e) => error!(gate = self.label, error = %e, "Failed to persist declarations"),
        }
    }
}

impl<G, H> RequiredGateApi<G, H> for RequiredGate<G, H>
where
    G: GuardSpec,
    H: Clone + Send + Sync + 'static,
{
    fn register(&self, name: &str, handle: H, guard: G) -> Result<(), GateError> {
        let mut registry = self.registry.lock();
        registry.register(name, handle, guard)?;
        self.publish(&registry);
        self.persist(&registry);

        info!("[{}] Required component '{}' registered", self.label, name);
        Ok(())
    }

    fn unregister(&self, name: &str, forget: bool) -> bool {
        let mut registry = self.registry.lock();
        let removed = registry.unregister(name, forget).is_some();
        self.publish(&registry);
        if forget {
            self.persist(&registry);
        }

        info!(
            "[{}] Required component '{}' unregistered (was live: {}, forgotten: {})",
            self.label, name, removed, forget
        );
        removed
    }

    fn blocked(&self) -> G {
        self.snapshot.load().blocked.clone()
    }

    fn required_members(&self) -> Vec<RequiredMember<H>> {
        self.snapshot.load().required.clone()
    }

    fn declarations(&self) -> BTreeMap<String, G> {
        self.registry.lock().declarations().clone()
    }

    fn is_live(&self, name: &str) -> bool {
        self.snapshot.load().required.iter().any(|m| m.name == name)
    }
}
