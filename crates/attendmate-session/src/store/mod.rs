//! Key-value storage port for session state.
//!
//! This module provides:
//! - `KeyValueStore`: the storage interface the state holder writes through
//! - `JsonFileStore`: durable implementation backed by a JSON file
//! - `MemoryStore`: in-memory implementation for tests and platform-less use
//!
//! Mutations stage in memory; `commit` makes them durable. A commit covers
//! every staged change, so multi-key updates land together.

pub mod json;
pub mod memory;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// A scalar stored under a preference key.
///
/// Serializes as a bare JSON scalar, so the backing file reads as a flat
/// string-keyed object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
}

/// Storage interface for the session state holder.
///
/// Readers tolerate missing and mistyped entries: the typed accessors return
/// `None` for both, and the caller substitutes its own default. Writes stage
/// in memory until `commit`.
pub trait KeyValueStore {
    /// Current value under `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stage `value` under `key`.
    fn put(&mut self, key: &str, value: Value);

    /// Stage removal of `key`.
    fn remove(&mut self, key: &str);

    /// Flush staged changes to the backing store.
    fn commit(&mut self) -> Result<()>;

    /// String under `key`, or `None` when absent or not a string.
    fn get_str(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(Value::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Integer under `key`, or `None` when absent or not an integer.
    fn get_i64(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            Some(Value::Int(n)) => Some(n),
            _ => None,
        }
    }

    /// Boolean under `key`, or `None` when absent or not a boolean.
    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(Value::Bool(b)) => Some(b),
            _ => None,
        }
    }

    fn put_str(&mut self, key: &str, value: &str) {
        self.put(key, Value::Str(value.to_string()));
    }

    fn put_i64(&mut self, key: &str, value: i64) {
        self.put(key, Value::Int(value));
    }

    fn put_bool(&mut self, key: &str, value: bool) {
        self.put(key, Value::Bool(value));
    }
}
