//! # Block-Set Calculation
//!
//! A category is blocked iff some declaration guards it and the declaring
//! name has no live registration.

use super::guard::GuardSpec;
use std::collections::BTreeMap;

/// Union the guards of every declaration whose name is not live, then
/// collapse wildcards per dimension.
pub fn compute_block_set<G, F>(declarations: &BTreeMap<String, G>, is_live: F) -> G
where
    G: GuardSpec,
    F: Fn(&str) -> bool,
{
    let mut pending = G::default();
    for (name, guard) in declarations {
        if !is_live(name) {
            pending.absorb(guard);
        }
    }
    pending.collapse_wildcards();
    pending
}
