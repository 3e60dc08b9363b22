//! Inbound (Driving) ports for the required-component gate.

use crate::domain::{GateError, GuardSpec, RequiredMember};
use std::collections::BTreeMap;

/// Registry API exposed to the pipelines and to administrative callers.
pub trait RequiredGateApi<G: GuardSpec, H>: Send + Sync {
    /// Register a live required component and declare what it guards.
    fn register(&self, name: &str, handle: H, guard: G) -> Result<(), GateError>;

    /// Remove a live registration. With `forget`, the declaration is removed
    /// too and the table is persisted. Returns whether a component was live.
    fn unregister(&self, name: &str, forget: bool) -> bool;

    /// Currently blocked categories.
    fn blocked(&self) -> G;

    /// Live required components, registration order.
    fn required_members(&self) -> Vec<RequiredMember<H>>;

    /// Copy of the declaration table.
    fn declarations(&self) -> BTreeMap<String, G>;

    /// `true` if `name` has a live registration.
    fn is_live(&self, name: &str) -> bool;
}
