//! The store capability trait and the typed handle layered on top.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::StoreError;
use crate::memory::MemoryStore;

/// Capability interface over the single-table key-value store.
///
/// Documents are JSON values; keys are opaque strings from
/// [`crate::keys`]. `scan` filters by key prefix - the natural predicate
/// for a single-table layout. Implementations must not interpret document
/// contents.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Write a document, replacing any existing document under `key`.
    async fn put(&self, key: &str, record: Value) -> Result<(), StoreError>;

    /// Read the document under `key`, if present.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// All documents whose key starts with `prefix`, in key order where
    /// the backend can provide one.
    async fn scan(&self, prefix: &str) -> Result<Vec<Value>, StoreError>;

    /// Delete the document under `key`. Deleting an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Typed handle over an [`ItemStore`].
///
/// Cheaply cloneable; serializes records through `serde_json`. Decode
/// failures surface as [`StoreError::Corrupt`] so callers can tell a bad
/// document apart from a backend failure.
#[derive(Clone)]
pub struct Store {
    inner: Arc<dyn ItemStore>,
}

impl Store {
    /// Wrap a store backend.
    pub fn new(inner: Arc<dyn ItemStore>) -> Self {
        Self { inner }
    }

    /// A fresh in-memory store, for tests and local development.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Serialize and write a record.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub async fn put_record<T: Serialize + Sync>(
        &self,
        key: &str,
        record: &T,
    ) -> Result<(), StoreError> {
        let doc = serde_json::to_value(record)?;
        self.inner.put(key, doc).await
    }

    /// Read and decode the record under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails or the stored document
    /// does not decode into `T`.
    pub async fn get_record<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StoreError> {
        match self.inner.get(key).await? {
            Some(doc) => {
                let record = serde_json::from_value(doc)
                    .map_err(|e| StoreError::Corrupt(format!("{key}: {e}")))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Read and decode every record under `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend scan fails or any document does not
    /// decode into `T`.
    pub async fn scan_prefix<T: DeserializeOwned>(
        &self,
        prefix: &str,
    ) -> Result<Vec<T>, StoreError> {
        let docs = self.inner.scan(prefix).await?;
        docs.into_iter()
            .map(|doc| {
                serde_json::from_value(doc)
                    .map_err(|e| StoreError::Corrupt(format!("{prefix}...: {e}")))
            })
            .collect()
    }

    /// Delete the record under `key`. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend delete fails.
    pub async fn delete_record(&self, key: &str) -> Result<(), StoreError> {
        self.inner.delete(key).await
    }

    /// Readiness probe: one cheap read against the backend.
    ///
    /// The probed key is never written, so the result is always absent -
    /// only reachability matters.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable.
    pub async fn probe(&self) -> Result<(), StoreError> {
        self.inner.get("health#probe").await.map(|_| ())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        count: u32,
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let store = Store::in_memory();
        let doc = Doc {
            name: "widget".to_string(),
            count: 3,
        };

        store.put_record("product#1", &doc).await.unwrap();
        let back: Option<Doc> = store.get_record("product#1").await.unwrap();
        assert_eq!(back, Some(doc));
    }

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let store = Store::in_memory();
        let back: Option<Doc> = store.get_record("product#missing").await.unwrap();
        assert!(back.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_document_is_distinguished() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .put("product#1", serde_json::json!({"unexpected": true}))
            .await
            .unwrap();

        let store = Store::new(backend);
        let result: Result<Option<Doc>, _> = store.get_record("product#1").await;
        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }

    #[tokio::test]
    async fn test_scan_prefix_decodes_only_matching_records() {
        let store = Store::in_memory();
        for i in 0..3 {
            let doc = Doc {
                name: format!("w{i}"),
                count: i,
            };
            store
                .put_record(&format!("cart#u1#p{i}"), &doc)
                .await
                .unwrap();
        }
        store
            .put_record(
                "cart#u2#p0",
                &Doc {
                    name: "other".to_string(),
                    count: 9,
                },
            )
            .await
            .unwrap();

        let docs: Vec<Doc> = store.scan_prefix("cart#u1#").await.unwrap();
        assert_eq!(docs.len(), 3);
        assert!(docs.iter().all(|d| d.name.starts_with('w')));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = Store::in_memory();
        store
            .put_record(
                "product#1",
                &Doc {
                    name: "widget".to_string(),
                    count: 1,
                },
            )
            .await
            .unwrap();

        store.delete_record("product#1").await.unwrap();
        // Second delete of the now-absent key still succeeds
        store.delete_record("product#1").await.unwrap();

        let back: Option<Doc> = store.get_record("product#1").await.unwrap();
        assert!(back.is_none());
    }

    #[tokio::test]
    async fn test_probe_in_memory_always_ready() {
        let store = Store::in_memory();
        store.probe().await.unwrap();
    }
}
