//! In-memory storage

use rustc_hash::FxHashMap;

use crate::storage::{KeyValueStore, StorageError};

/// Store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one slot already filled.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = FxHashMap::default();
        slots.insert(key.into(), value.into());

        Self { slots }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());

        Ok(())
    }
}
