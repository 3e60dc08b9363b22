//! # Domain Layer - Required Gate
//!
//! Pure registry logic, free of locking and I/O.
//!
//! - `guard`: the [`GuardSpec`] abstraction over guarded category sets
//! - `registry`: declarations and live registrations
//! - `block_set`: derivation of the blocked categories
//! - `persistence`: flat property encoding of the declaration table
//! - `isolation`: panic containment for third-party component calls
//! - `errors`: [`GateError`] and [`StoreError`]

pub mod block_set;
pub mod errors;
pub mod guard;
pub mod isolation;
pub mod persistence;
pub mod registry;

pub use block_set::*;
pub use errors::*;
pub use guard::*;
pub use isolation::*;
pub use persistence::*;
pub use registry::*;
