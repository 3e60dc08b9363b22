//! # Copy-on-Write Interceptor Chains
//!
//! Every mutation builds a new member list and publishes it atomically, so a
//! traversal iterates a stable snapshot without holding any lock. Members are
//! identified by allocation: adding the same `Arc` twice moves it.

use super::errors::ChainError;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::sync::Arc;

/// `true` if both handles point at the same component.
pub fn same_member<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// `members` with `item` moved (or added) to the end.
pub fn with_appended<T: ?Sized>(members: &[Arc<T>], item: Arc<T>) -> Vec<Arc<T>> {
    let mut next: Vec<Arc<T>> = members
        .iter()
        .filter(|m| !same_member(m, &item))
        .cloned()
        .collect();
    next.push(item);
    next
}

/// `members` with `item` placed at `index`.
///
/// `index` is validated against the current length. If `item` is already
/// present before `index`, the index shifts down by one to account for its
/// removal.
pub fn with_inserted<T: ?Sized>(
    members: &[Arc<T>],
    index: usize,
    item: Arc<T>,
) -> Result<Vec<Arc<T>>, ChainError> {
    if index > members.len() {
        return Err(ChainError::IndexOutOfBounds {
            index,
            len: members.len(),
        });
    }

    let mut index = index;
    let mut next = members.to_vec();
    if let Some(old) = next.iter().position(|m| same_member(m, &item)) {
        if old < index {
            index -= 1;
        }
        next.remove(old);
    }
    next.insert(index, item);
    Ok(next)
}

/// `members` without `item`, or `None` if it was not present.
pub fn without<T: ?Sized>(members: &[Arc<T>], item: &Arc<T>) -> Option<Vec<Arc<T>>> {
    let position = members.iter().position(|m| same_member(m, item))?;
    let mut next = members.to_vec();
    next.remove(position);
    Some(next)
}

/// An ordered chain of components.
pub struct InterceptorChain<T: ?Sized> {
    members: ArcSwap<Vec<Arc<T>>>,
    writer: Mutex<()>,
}

impl<T: ?Sized> InterceptorChain<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: ArcSwap::from_pointee(Vec::new()),
            writer: Mutex::new(()),
        }
    }

    /// Current members, in order.
    pub fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.members.load_full()
    }

    pub fn len(&self) -> usize {
        self.members.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.load().is_empty()
    }

    /// Append, moving `item` to the end if already present.
    pub fn push(&self, item: Arc<T>) {
        let _writer = self.writer.lock();
        let next = with_appended(self.members.load().as_slice(), item);
        self.members.store(Arc::new(next));
    }

    /// Insert at `index` (`0..=len`).
    pub fn insert(&self, index: usize, item: Arc<T>) -> Result<(), ChainError> {
        let _writer = self.writer.lock();
        let next = with_inserted(self.members.load().as_slice(), index, item)?;
        self.members.store(Arc::new(next));
        Ok(())
    }

    /// Remove `item`. Returns whether it was present.
    pub fn remove(&self, item: &Arc<T>) -> bool {
        let _writer = self.writer.lock();
        match without(self.members.load().as_slice(), item) {
            Some(next) => {
                self.members.store(Arc::new(next));
                true
            }
            None => false,
        }
    }
}

impl<T: ?Sized> Default for InterceptorChain<T> {
    fn default() -> Self {
        Self::new()
    }
}
