//! # Room Event Dispatcher
//!
//! ```text
//! before(event)                          notify(event)
//!   │                                      │
//!   ├─ category blocked? ──→ false         ├─ required listeners (skipped while blocked)
//!   └─ required listeners                  └─ best-effort listeners (always)
//!        first `true` wins
//! ```

use crate::domain::{ListenerList, RoomGuard, ROOM_LAYOUT};
use crate::ports::{ListenerHandle, RequiredListenerHandle, RoomEventApi, RoomEventListener};
use rg_01_required_gate::{
    guarded_call, GateError, GateMetrics, GateOutcome, NoopMetrics, PropertyStore, RequiredGate,
    RequiredGateApi, StoreError,
};
use shared_types::{CategorySet, ComponentFault, Rejection, RoomEvent, RoomEventCategory};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error};

/// Metrics and log label of this gate.
pub const GATE_LABEL: &str = "room";

/// Dispatches room events to required and best-effort listeners.
pub struct RoomEventDispatcher {
    gate: RequiredGate<RoomGuard, RequiredListenerHandle>,
    listeners: ListenerList<dyn RoomEventListener>,
    metrics: Arc<dyn GateMetrics>,
}

impl RoomEventDispatcher {
    /// Build the dispatcher from the declarations persisted in `store`.
    pub fn load(store: Arc<dyn PropertyStore>) -> Result<Self, StoreError> {
        Ok(Self {
            gate: RequiredGate::load(GATE_LABEL, ROOM_LAYOUT, store)?,
            listeners: ListenerList::new(),
            metrics: Arc::new(NoopMetrics),
        })
    }

    /// Record outcomes and registry size through `metrics`.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn GateMetrics>) -> Self {
        self.gate.set_metrics(metrics.clone());
        self.metrics = metrics;
        self
    }

    /// Unregister every required listener without forgetting it.
    pub fn release_required(&self) -> Vec<String> {
        self.gate.release_all()
    }

    /// Declarations of required listeners, live or not.
    pub fn declarations(&self) -> BTreeMap<String, RoomGuard> {
        self.gate.declarations()
    }

    fn deliver<L: RoomEventListener + ?Sized>(&self, listener: &L, event: &RoomEvent) {
        let result = guarded_call(|| {
            listener.on_event(event);
            Ok(())
        });
        if let Err(fault) = result {
            self.metrics.record(GATE_LABEL, GateOutcome::ComponentFault);
            error!(listener = listener.label(), event = ?event, error = %fault, "Error in room event listener");
        }
    }
}

impl RoomEventApi for RoomEventDispatcher {
    fn before(&self, event: &RoomEvent) -> Result<bool, Rejection> {
        let snapshot = self.gate.snapshot();
        let category = event.category();

        if snapshot.blocked.blocks(category) {
            self.metrics.record(GATE_LABEL, GateOutcome::GateBlocked);
            debug!(%category, event = ?event, "Room event blocked: required listener absent");
            return Ok(false);
        }

        for member in &snapshot.required {
            match guarded_call(|| member.handle.before(event)) {
                Ok(true) => {
                    self.metrics.record(GATE_LABEL, GateOutcome::Vetoed);
                    debug!(listener = %member.name, event = ?event, "Room event handled");
                    return Ok(true);
                }
                Ok(false) => {}
                Err(ComponentFault::Rejected(rejection)) => {
                    self.metrics.record(GATE_LABEL, GateOutcome::ComponentRejected);
                    debug!(listener = %member.name, event = ?event, %rejection, "Room event rejected");
                    return Err(rejection);
                }
                Err(ComponentFault::Failed(message)) => {
                    self.metrics.record(GATE_LABEL, GateOutcome::ComponentFault);
                    error!(listener = %member.name, event = ?event, error = %message, "Error in required room listener");
                }
            }
        }
        Ok(false)
    }

    fn notify(&self, event: &RoomEvent) {
        let snapshot = self.gate.snapshot();

        if !snapshot.blocked.blocks(event.category()) {
            for member in &snapshot.required {
                self.deliver(&*member.handle, event);
            }
        }
        for listener in self.listeners.snapshot().iter() {
            self.deliver(&**listener, event);
        }
    }

    fn add_listener(&self, listener: ListenerHandle) {
        self.listeners.add(listener);
    }

    fn remove_listener(&self, listener: &ListenerHandle) -> bool {
        self.listeners.remove(listener)
    }

    fn listeners(&self) -> Vec<ListenerHandle> {
        self.listeners.snapshot().to_vec()
    }

    fn register_required(
        &self,
        name: &str,
        listener: RequiredListenerHandle,
        guard: RoomGuard,
    ) -> Result<(), GateError> {
        debug!(name, events = ?guard.events, "Adding required room listener");
        self.gate.register(name, listener, guard)
    }

    fn unregister_required(&self, name: &str, forget: bool) -> bool {
        debug!(name, forget, "Removing required room listener");
        self.gate.unregister(name, forget)
    }

    fn required_listeners(&self) -> Vec<RequiredListenerHandle> {
        self.gate
            .snapshot()
            .required
            .iter()
            .map(|m| m.handle.clone())
            .collect()
    }

    fn blocked_events(&self) -> CategorySet<RoomEventCategory> {
        self.gate.snapshot().blocked.events.clone()
    }
}
