//! In-memory store backend.
//!
//! Used by unit tests and local development without AWS. A `BTreeMap`
//! keeps scan results in key order, which makes test assertions
//! deterministic.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::adapter::ItemStore;
use crate::error::StoreError;

/// In-memory [`ItemStore`] backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn put(&self, key: &str, record: Value) -> Result<(), StoreError> {
        let mut records = self.records.write().expect("store lock poisoned");
        records.insert(key.to_owned(), record);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let records = self.records.read().expect("store lock poisoned");
        Ok(records.get(key).cloned())
    }

    async fn scan(&self, prefix: &str) -> Result<Vec<Value>, StoreError> {
        let records = self.records.read().expect("store lock poisoned");
        Ok(records
            .range(prefix.to_owned()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(_, doc)| doc.clone())
            .collect())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().expect("store lock poisoned");
        records.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_put_overwrites_existing_key() {
        let store = MemoryStore::new();
        store.put("k", json!({"v": 1})).await.unwrap();
        store.put("k", json!({"v": 2})).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(json!({"v": 2})));
    }

    #[tokio::test]
    async fn test_scan_returns_key_order() {
        let store = MemoryStore::new();
        store.put("p#b", json!({"n": "b"})).await.unwrap();
        store.put("p#a", json!({"n": "a"})).await.unwrap();
        store.put("q#z", json!({"n": "z"})).await.unwrap();

        let docs = store.scan("p#").await.unwrap();
        assert_eq!(docs, vec![json!({"n": "a"}), json!({"n": "b"})]);
    }

    #[tokio::test]
    async fn test_scan_empty_prefix_returns_everything() {
        let store = MemoryStore::new();
        store.put("a", json!(1)).await.unwrap();
        store.put("b", json!(2)).await.unwrap();
        assert_eq!(store.scan("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_ok() {
        let store = MemoryStore::new();
        store.delete("nope").await.unwrap();
    }
}
