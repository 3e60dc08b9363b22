//! # Component Registry
//!
//! Persisted declarations (name → guard) and live registrations
//! (name → handle). The two tables are independent: a declaration outlives
//! its component, and a live component is always declared.

use super::block_set::compute_block_set;
use super::errors::GateError;
use super::guard::GuardSpec;
use shared_types::CATEGORY_DELIMITER;
use std::collections::BTreeMap;

/// A live required component.
#[derive(Debug, Clone)]
pub struct RequiredMember<H> {
    pub name: String,
    pub handle: H,
}

/// Registry state. Mutated only under the gate's writer lock.
#[derive(Debug)]
pub struct Registry<G, H> {
    declarations: BTreeMap<String, G>,
    /// Live members, in registration order.
    live: Vec<RequiredMember<H>>,
}

impl<G: GuardSpec, H: Clone> Registry<G, H> {
    /// Registry with persisted declarations and nothing live.
    pub fn from_declarations(declarations: BTreeMap<String, G>) -> Self {
        Self {
            declarations,
            live: Vec::new(),
        }
    }

    pub fn declarations(&self) -> &BTreeMap<String, G> {
        &self.declarations
    }

    pub fn live(&self) -> &[RequiredMember<H>] {
        &self.live
    }

    pub fn is_live(&self, name: &str) -> bool {
        self.live.iter().any(|m| m.name == name)
    }

    /// Record a live registration and (re)declare its guard.
    pub fn register(&mut self, name: &str, handle: H, guard: G) -> Result<(), GateError> {
        validate_name(name)?;
        if self.is_live(name) {
            return Err(GateError::DuplicateName {
                name: name.to_string(),
            });
        }

        let mut guard = guard;
        guard.collapse_wildcards();
        self.declarations.insert(name.to_string(), guard);
        self.live.push(RequiredMember {
            name: name.to_string(),
            handle,
        });
        Ok(())
    }

    /// Drop a live registration, and the declaration too if `forget`.
    ///
    /// Returns the removed member, if one was live.
    pub fn unregister(&mut self, name: &str, forget: bool) -> Option<RequiredMember<H>> {
        let removed = self
            .live
            .iter()
            .position(|m| m.name == name)
            .map(|index| self.live.remove(index));
        if forget {
            self.declarations.remove(name);
        }
        removed
    }

    /// Current block set.
    pub fn block_set(&self) -> G {
        compute_block_set(&self.declarations, |name| self.is_live(name))
    }
}

/// Names are stored in a comma-joined list and must be non-blank.
pub fn validate_name(name: &str) -> Result<(), GateError> {
    if name.trim().is_empty() {
        return Err(GateError::InvalidArgument {
            reason: "'name' must not be empty".to_string(),
        });
    }
    if name.trim() != name {
        return Err(GateError::InvalidArgument {
            reason: format!("'name' must not have surrounding whitespace: '{}'", name),
        });
    }
    if name.contains(CATEGORY_DELIMITER) {
        return Err(GateError::InvalidArgument {
            reason: format!("'name' must not contain '{}': '{}'", CATEGORY_DELIMITER, name),
        });
    }
    Ok(())
}
