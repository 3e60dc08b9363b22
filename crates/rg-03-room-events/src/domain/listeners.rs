//! Copy-on-write list of best-effort listeners.

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Ordered listener list. Iteration works on a snapshot, so listeners may be
/// added or removed while an event is being dispatched.
pub struct ListenerList<T: ?Sized> {
    members: ArcSwap<Vec<Arc<T>>>,
    writer: Mutex<()>,
}

impl<T: ?Sized> ListenerList<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: ArcSwap::from_pointee(Vec::new()),
            writer: Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.members.load_full()
    }

    pub fn add(&self, listener: Arc<T>) {
        let _writer = self.writer.lock();
        let mut next = self.members.load().to_vec();
        next.push(listener);
        self.members.store(Arc::new(next));
    }

    /// Remove the first occurrence of `listener`.
    pub fn remove(&self, listener: &Arc<T>) -> bool {
        let _writer = self.writer.lock();
        let current = self.members.load_full();
        let Some(position) = current.iter().position(|m| same_listener(m, listener)) else {
            return false;
        };
        let mut next = current.to_vec();
        next.remove(position);
        self.members.store(Arc::new(next));
        true
    }
}

impl<T: ?Sized> Default for ListenerList<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn same_listener<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}
