//! # Guard Values
//!
//! A guard is the set of categories a required component protects, one
//! [`CategorySet`] per dimension. The block set is a guard value too.

use shared_types::{Category, CategorySet};
use std::fmt;

/// A multi-dimensional set of guarded categories.
///
/// Dimensions are independent: wildcard collapse and persistence are applied
/// per dimension.
pub trait GuardSpec: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Number of dimensions. Must match the number of dimension prefixes in
    /// the persistence layout.
    const DIMENSIONS: usize;

    /// Union `other` into `self`, dimension by dimension.
    fn absorb(&mut self, other: &Self);

    /// Collapse every dimension that contains `All` to `{All}`.
    fn collapse_wildcards(&mut self);

    /// `true` if every dimension is empty.
    fn is_empty(&self) -> bool;

    /// Render one dimension as a property value. Empty means "no key".
    fn encode_dimension(&self, dimension: usize) -> String;

    /// Replace one dimension from a property value.
    fn decode_dimension(&mut self, dimension: usize, raw: &str);
}

/// A single category set is a one-dimensional guard.
impl<C: Category> GuardSpec for CategorySet<C> {
    const DIMENSIONS: usize = 1;

    fn absorb(&mut self, other: &Self) {
        CategorySet::absorb(self, other);
    }

    fn collapse_wildcards(&mut self) {
        self.collapse_wildcard();
    }

    fn is_empty(&self) -> bool {
        CategorySet::is_empty(self)
    }

    fn encode_dimension(&self, _dimension: usize) -> String {
        self.to_property()
    }

    fn decode_dimension(&mut self, _dimension: usize, raw: &str) {
        *self = CategorySet::from_property(raw);
    }
}
