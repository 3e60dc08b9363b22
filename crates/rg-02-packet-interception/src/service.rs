//! # Packet Interception Service
//!
//! Runs the gate and the three interceptor tiers for one traversal point.
//!
//! ```text
//! invoke(packet, session, point)
//!   │
//!   ├─ gate ───────────── blocked? ──→ PRE: Rejected / POST: logged, stop
//!   ├─ required chain ─── Swallow? ──→ stop
//!   ├─ global chain
//!   └─ principal chain ── only for local sessions with a node part
//! ```
//!
//! At PRE the first rejection from any tier ends the traversal. At POST
//! rejections are logged and ignored. Failures and panics are always logged
//! and never stop sibling interceptors.

use crate::domain::{
    gate_verdict, with_inserted, without, ChainError, InterceptorChain, PacketGuard,
    PACKET_LAYOUT,
};
use crate::ports::{
    Flow, InterceptorHandle, Locality, PacketInterceptionApi, PacketInterceptor,
    RequiredInterceptorHandle,
};
use parking_lot::RwLock;
use rg_01_required_gate::{
    guarded_call, GateError, GateMetrics, GateOutcome, NoopMetrics, PropertyStore, RequiredGate,
    RequiredGateApi, StoreError,
};
use shared_types::{
    CategorySet, ComponentFault, Packet, PacketCategory, Rejection, Session, TrafficCategory,
    TraversalPoint, Verdict,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, error, info, trace};

/// Metrics and log label of this gate.
pub const GATE_LABEL: &str = "packet";

/// The packet interception pipeline.
pub struct PacketInterceptionService {
    gate: RequiredGate<PacketGuard, RequiredInterceptorHandle>,
    global: InterceptorChain<dyn PacketInterceptor>,
    principals: RwLock<HashMap<String, Arc<Vec<InterceptorHandle>>>>,
    locality: Arc<dyn Locality>,
    metrics: Arc<dyn GateMetrics>,
}

impl PacketInterceptionService {
    /// Build the pipeline from the declarations persisted in `store`.
    pub fn load(
        store: Arc<dyn PropertyStore>,
        locality: Arc<dyn Locality>,
    ) -> Result<Self, StoreError> {
        let gate = RequiredGate::load(GATE_LABEL, PACKET_LAYOUT, store)?;
        Ok(Self {
            gate,
            global: InterceptorChain::new(),
            principals: RwLock::new(HashMap::new()),
            locality,
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

    /// Unregister every required interceptor without forgetting it.
    pub fn release_required(&self) -> Vec<String> {
        self.gate.release_all()
    }

    /// Declarations of required interceptors, live or not.
    pub fn declarations(&self) -> BTreeMap<String, PacketGuard> {
        self.gate.declarations()
    }

    /// Turn a component result into "keep going" (`Ok`) or "stop with this
    /// rejection" (`Err`).
    fn settle<T>(
        &self,
        tier: &'static str,
        component: &str,
        packet: &Packet,
        point: TraversalPoint,
        result: Result<T, ComponentFault>,
    ) -> Result<Option<T>, Rejection> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(ComponentFault::Rejected(rejection)) => {
                self.metrics.record(GATE_LABEL, GateOutcome::ComponentRejected);
                if point.is_processed() {
                    error!(tier, component, %point, %rejection, packet = ?packet, "Post interceptor cannot reject packet");
                    Ok(None)
                } else {
                    debug!(tier, component, %point, %rejection, packet = ?packet, "Packet rejected by interceptor");
                    Err(rejection)
                }
            }
            Err(ComponentFault::Failed(message)) => {
                self.metrics.record(GATE_LABEL, GateOutcome::ComponentFault);
                error!(tier, component, %point, error = %message, packet = ?packet, "Error in interceptor");
                Ok(None)
            }
        }
    }

    fn run_chain(
        &self,
        tier: &'static str,
        chain: &[InterceptorHandle],
        packet: &mut Packet,
        session: &Session,
        point: TraversalPoint,
    ) -> Result<(), Rejection> {
        for interceptor in chain {
            let result = guarded_call(|| interceptor.intercept(packet, session, point));
            self.settle(tier, interceptor.label(), packet, point, result)?;
        }
        Ok(())
    }

    fn principal_chain(&self, session: &Session) -> Option<Arc<Vec<InterceptorHandle>>> {
        let principal = session.address.node()?;
        if !self.locality.is_local(&session.address) {
            return None;
        }
        self.principals.read().get(principal).cloned()
    }
}

impl PacketInterceptionApi for PacketInterceptionService {
    fn invoke(&self, packet: &mut Packet, session: &Session, point: TraversalPoint) -> Verdict {
        let snapshot = self.gate.snapshot();

        if let Verdict::Rejected(rejection) = gate_verdict(&snapshot.blocked, packet, point) {
            self.metrics.record(GATE_LABEL, GateOutcome::GateBlocked);
            if point.is_processed() {
                error!(kind = %packet.kind, %point, %rejection, packet = ?packet, "Required interceptor absent after processing; interceptors skipped");
                return Verdict::Allowed;
            }
            debug!(kind = %packet.kind, %point, "Packet blocked: required interceptor absent");
            return Verdict::Rejected(rejection);
        }

        for member in &snapshot.required {
            let result = guarded_call(|| member.handle.intercept(packet, session, point));
            match self.settle("required", &member.name, packet, point, result) {
                Ok(Some(Flow::Swallow)) => {
                    self.metrics.record(GATE_LABEL, GateOutcome::Swallowed);
                    trace!(component = %member.name, %point, "Packet swallowed");
                    return Verdict::Allowed;
                }
                Ok(_) => {}
                Err(rejection) => return Verdict::Rejected(rejection),
            }
        }

        let global = self.global.snapshot();
        if let Err(rejection) = self.run_chain("global", &global, packet, session, point) {
            return Verdict::Rejected(rejection);
        }

        if let Some(chain) = self.principal_chain(session) {
            if let Err(rejection) = self.run_chain("principal", &chain, packet, session, point) {
                return Verdict::Rejected(rejection);
            }
        }

        Verdict::Allowed
    }

    fn register_required(
        &self,
        name: &str,
        interceptor: RequiredInterceptorHandle,
        guard: PacketGuard,
    ) -> Result<(), GateError> {
        debug!(
            name,
            events = ?guard.events,
            packets = ?guard.packets,
            "Adding required interceptor"
        );
        self.gate.register(name, interceptor, guard)
    }

    fn unregister_required(&self, name: &str, forget: bool) -> bool {
        debug!(name, forget, "Removing required interceptor");
        self.gate.unregister(name, forget)
    }

    fn required_interceptors(&self) -> Vec<RequiredInterceptorHandle> {
        self.gate
            .snapshot()
            .required
            .iter()
            .map(|m| m.handle.clone())
            .collect()
    }

    fn blocked_traffic(&self) -> CategorySet<TrafficCategory> {
        self.gate.snapshot().blocked.events.clone()
    }

    fn blocked_packets(&self) -> CategorySet<PacketCategory> {
        self.gate.snapshot().blocked.packets.clone()
    }

    fn add_interceptor(&self, interceptor: InterceptorHandle) {
        self.global.push(interceptor);
    }

    fn insert_interceptor(
        &self,
        index: usize,
        interceptor: InterceptorHandle,
    ) -> Result<(), ChainError> {
        self.global.insert(index, interceptor)
    }

    fn remove_interceptor(&self, interceptor: &InterceptorHandle) -> bool {
        self.global.remove(interceptor)
    }

    fn interceptors(&self) -> Vec<InterceptorHandle> {
        self.global.snapshot().to_vec()
    }

    fn add_principal_interceptor(
        &self,
        principal: &str,
        index: usize,
        interceptor: InterceptorHandle,
    ) -> Result<(), ChainError> {
        let mut principals = self.principals.write();
        let current = principals.get(principal).map(|c| c.as_slice()).unwrap_or(&[]);
        let next = with_inserted(current, index, interceptor)?;
        principals.insert(principal.to_string(), Arc::new(next));
        Ok(())
    }

    fn remove_principal_interceptor(
        &self,
        principal: &str,
        interceptor: &InterceptorHandle,
    ) -> bool {
        let mut principals = self.principals.write();
        let Some(next) = principals
            .get(principal)
            .and_then(|chain| without(chain.as_slice(), interceptor))
        else {
            return false;
        };

        if next.is_empty() {
            principals.remove(principal);
            info!(principal, "Principal interceptor chain emptied");
        } else {
            principals.insert(principal.to_string(), Arc::new(next));
        }
        true
    }

    fn principal_interceptors(&self, principal: &str) -> Vec<InterceptorHandle> {
        self.principals
            .read()
            .get(principal)
            .map(|chain| chain.to_vec())
            .unwrap_or_default()
    }
}
