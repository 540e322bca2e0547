use std::collections::HashMap;

use anyhow::Result;

use super::{KeyValueStore, Value};

/// In-memory key-value store.
///
/// Backs tests and hosts without durable storage. `commit` is a no-op since
/// there is nothing beneath the map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed an entry, bypassing the staging/commit cycle.
    ///
    /// Test helper for building a store in a known starting state.
    pub fn with_entry(mut self, key: &str, value: Value) -> Self {
        self.entries.insert(key.to_string(), value);
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn commit(&mut self) -> Result<()> {
        Ok(())
    }
}
