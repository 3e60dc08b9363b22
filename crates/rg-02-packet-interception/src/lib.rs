//! # Packet Interception Pipeline (rg-02)
//!
//! Invoked by the routing layer at four points per packet (inbound and
//! outbound, before and after processing). Applies the required-interceptor
//! gate, then three interceptor tiers.
//!
//! | Tier | Members | May stop the traversal by |
//! |------|---------|---------------------------|
//! | Required | Live required interceptors, registration order | `Flow::Swallow`, rejection at PRE |
//! | Global | Best-effort interceptors | rejection at PRE |
//! | Principal | Interceptors of the session's local principal | rejection at PRE |
//!
//! ## Crate Structure
//!
//! - `domain/` - Packet guard, gate rule, copy-on-write chains
//! - `ports/` - Pipeline API (inbound), interceptor and locality traits (outbound)
//! - `adapters/` - Domain-based locality
//! - `service.rs` - [`PacketInterceptionService`]
//!
//! ## Usage
//!
//! ```ignore
//! use rg_02_packet_interception::{PacketInterceptionApi, PacketInterceptionService};
//!
//! let service = PacketInterceptionService::load(store, locality)?;
//! service.register_required("archiver", archiver, guard)?;
//!
//! match service.invoke(&mut packet, &session, TraversalPoint::INBOUND_PRE) {
//!     Verdict::Allowed => route(packet),
//!     Verdict::Rejected(rejection) => bounce(packet, rejection),
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::DomainLocality;
pub use domain::{gate_verdict, should_block, ChainError, PacketGuard, PACKET_LAYOUT};
pub use ports::{
    Flow, InterceptorHandle, Locality, PacketInterceptionApi, PacketInterceptor,
    RequiredInterceptorHandle, RequiredPacketInterceptor,
};
pub use service::PacketInterceptionService;
