//! In-memory key-value client.

use crate::error::StorageResult;
use crate::kv::KvClient;
use parking_lot::RwLock;
use std::collections::HashMap;

/// An in-memory [`KvClient`].
///
/// This client keeps all values in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral record types that don't need persistence
///
/// # Thread Safety
///
/// This client is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use snaprecord_storage::{InMemoryKv, KvClient};
///
/// let kv = InMemoryKv::new();
/// kv.set("greeting", b"hello").unwrap();
/// assert_eq!(kv.get("greeting").unwrap(), Some(b"hello".to_vec()));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryKv {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryKv {
    /// Creates a new empty client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a value is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    /// Returns all stored keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.data.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Removes every stored value.
    pub fn clear(&self) {
        self.data.write().clear();
    }
}

impl KvClient for InMemoryKv {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        self.data.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_new_is_empty() {
        let kv = InMemoryKv::new();
        assert!(kv.keys().is_empty());
        assert_eq!(kv.get("anything").unwrap(), None);
    }

    #[test]
    fn memory_set_overwrites() {
        let kv = InMemoryKv::new();
        kv.set("k", b"one").unwrap();
        kv.set("k", b"two").unwrap();

        assert_eq!(kv.get("k").unwrap(), Some(b"two".to_vec()));
        assert_eq!(kv.keys(), vec!["k".to_string()]);
    }

    #[test]
    fn memory_clear() {
        let kv = InMemoryKv::new();
        kv.set("a", b"1").unwrap();
        kv.set("b", b"2").unwrap();
        kv.clear();

        assert!(!kv.contains_key("a"));
        assert!(kv.keys().is_empty());
    }
}
