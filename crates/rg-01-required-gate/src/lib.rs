//! # Required-Component Gate (rg-01)
//!
//! Keeps track of components that must observe certain traffic, and derives
//! which traffic to block while any of them is absent.
//!
//! ## Architecture
//!
//! ```text
//! PropertyStore ──load──→ ┌───────────────────────────┐
//!                         │ Registry                  │
//!                         │  declarations: name → G   │──compute──→ BlockSet (G)
//!                         │  live:         name → H   │
//!                         └───────────────────────────┘
//!                                     │ persist
//!                                     ↓
//!                               PropertyStore
//! ```
//!
//! The same gate is instantiated by the packet interception pipeline (two
//! dimensions: traffic and packet categories) and the room event pipeline
//! (one dimension: room event categories).
//!
//! ## Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Block rule | A category is blocked iff some declaration guards it and its name is not live |
//! | Wildcard collapse | A computed dimension containing `All` contains only `All` |
//! | Unique names | At most one live registration per name |
//! | Snapshot publication | Readers see either the old or the new block set, never a mix |
//!
//! ## Crate Structure
//!
//! - `domain/` - Registry, block-set calculation, persistence codec
//! - `ports/` - Registry API (inbound), property store and metrics (outbound)
//! - `adapters/` - In-memory property store
//! - `service.rs` - [`RequiredGate`], the locked and published registry

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryPropertyStore;
pub use domain::{
    compute_block_set, guarded_call, GateError, GuardSpec, PropertyLayout, PropertyOperation, RequiredMember,
    StoreError,
};
pub use ports::{GateMetrics, GateOutcome, NoopMetrics, PropertyStore, RequiredGateApi};
pub use service::{GateSnapshot, RequiredGate};
