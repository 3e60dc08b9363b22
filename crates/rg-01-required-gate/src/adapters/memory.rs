//! In-memory property store.

use crate::domain::{PropertyOperation, StoreError};
use crate::ports::PropertyStore;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Property store kept in a map. Used for tests and for servers without
/// durable storage.
#[derive(Debug, Default)]
pub struct InMemoryPropertyStore {
    properties: RwLock<BTreeMap<String, String>>,
    batches: AtomicUsize,
    fail_writes: AtomicBool,
}

impl InMemoryPropertyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `properties`.
    #[must_use]
    pub fn with_properties<I, K, V>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = properties
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            properties: RwLock::new(map),
            ..Self::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.properties.read().get(key).cloned()
    }

    /// Copy of every stored property.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.properties.read().clone()
    }

    /// Number of batches applied so far.
    pub fn batches_applied(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }

    /// Make every subsequent write fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl PropertyStore for InMemoryPropertyStore {
    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        Ok(self.snapshot())
    }

    fn apply(&self, operations: Vec<PropertyOperation>) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::Other,
                "writes disabled",
            )));
        }

        let mut properties = self.properties.write();
        for operation in operations {
            match operation {
                PropertyOperation::Set { key, value } => {
                    properties.insert(key, value);
                }
                PropertyOperation::Remove { key } => {
                    properties.remove(&key);
                }
            }
        }
        self.batches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
