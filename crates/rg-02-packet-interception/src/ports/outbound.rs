//! Outbound (Driven) ports for the packet interception pipeline.
//!
//! Interceptors are supplied by other parts of the server (archivers, policy
//! filters, auditing). The pipeline only sees them through these traits.

use shared_types::{ComponentFault, Jid, Packet, Session, TraversalPoint};

/// What a required interceptor wants to happen after it has seen a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Let the remaining interceptors run.
    Continue,
    /// The packet is consumed. No further interceptor of any tier runs.
    Swallow,
}

/// A required interceptor. Its absence blocks the traffic it is declared to
/// guard.
pub trait RequiredPacketInterceptor: Send + Sync {
    /// Inspect (and possibly modify) a packet.
    ///
    /// Returning [`ComponentFault::Rejected`] during PRE rejects the packet.
    /// During POST a rejection is only logged.
    fn intercept(
        &self,
        packet: &mut Packet,
        session: &Session,
        point: TraversalPoint,
    ) -> Result<Flow, ComponentFault>;
}

/// A best-effort interceptor in the global or per-principal chain.
pub trait PacketInterceptor: Send + Sync {
    /// Inspect (and possibly modify) a packet.
    ///
    /// Returning [`ComponentFault::Rejected`] during PRE rejects the packet.
    fn intercept(
        &self,
        packet: &mut Packet,
        session: &Session,
        point: TraversalPoint,
    ) -> Result<(), ComponentFault>;

    /// Identity used in log lines.
    fn label(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Decides whether an address belongs to this server.
pub trait Locality: Send + Sync {
    fn is_local(&self, address: &Jid) -> bool;
}
