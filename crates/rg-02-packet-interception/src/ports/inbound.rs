//! Inbound (Driving) ports for the packet interception pipeline.

use super::outbound::{PacketInterceptor, RequiredPacketInterceptor};
use crate::domain::{ChainError, PacketGuard};
use rg_01_required_gate::GateError;
use shared_types::{CategorySet, Packet, PacketCategory, Session, TrafficCategory, TraversalPoint, Verdict};
use std::sync::Arc;

/// Handle of a best-effort interceptor.
pub type InterceptorHandle = Arc<dyn PacketInterceptor>;

/// Handle of a required interceptor.
pub type RequiredInterceptorHandle = Arc<dyn RequiredPacketInterceptor>;

/// Packet interception API used by the routing layer and by components.
pub trait PacketInterceptionApi: Send + Sync {
    /// Run the gate and every interceptor tier for one traversal point.
    ///
    /// Called four times per packet: inbound and outbound, PRE and POST.
    fn invoke(&self, packet: &mut Packet, session: &Session, point: TraversalPoint) -> Verdict;

    // =========================================================================
    // Required interceptors
    // =========================================================================

    /// Register a required interceptor and declare what it guards.
    fn register_required(
        &self,
        name: &str,
        interceptor: RequiredInterceptorHandle,
        guard: PacketGuard,
    ) -> Result<(), GateError>;

    /// Unregister a required interceptor, forgetting its declaration if asked.
    fn unregister_required(&self, name: &str, forget: bool) -> bool;

    /// Live required interceptors, registration order.
    fn required_interceptors(&self) -> Vec<RequiredInterceptorHandle>;

    /// Traversal points currently blocked.
    fn blocked_traffic(&self) -> CategorySet<TrafficCategory>;

    /// Packet kinds currently blocked.
    fn blocked_packets(&self) -> CategorySet<PacketCategory>;

    // =========================================================================
    // Global chain
    // =========================================================================

    /// Append to the global chain (moving it if already present).
    fn add_interceptor(&self, interceptor: InterceptorHandle);

    /// Insert into the global chain at `index` (`0..=len`).
    fn insert_interceptor(&self, index: usize, interceptor: InterceptorHandle)
        -> Result<(), ChainError>;

    fn remove_interceptor(&self, interceptor: &InterceptorHandle) -> bool;

    fn interceptors(&self) -> Vec<InterceptorHandle>;

    // =========================================================================
    // Per-principal chains
    // =========================================================================

    /// Insert into a principal's chain at `index`, creating the chain if
    /// needed.
    fn add_principal_interceptor(
        &self,
        principal: &str,
        index: usize,
        interceptor: InterceptorHandle,
    ) -> Result<(), ChainError>;

    /// Remove from a principal's chain. An emptied chain is dropped.
    fn remove_principal_interceptor(&self, principal: &str, interceptor: &InterceptorHandle)
        -> bool;

    fn principal_interceptors(&self, principal: &str) -> Vec<InterceptorHandle>;
}
