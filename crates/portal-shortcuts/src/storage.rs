//! Key/value storage the shortcut API persists into.
//!
//! Values are JSON documents grouped into named buckets. The in-memory
//! [`MemoryStorage`] backs tests and hosts without a persistent store.
//!
//! # Example
//!
//! ```
//! use portal_shortcuts::storage::{Bucket, MemoryStorage};
//! use std::sync::Arc;
//!
//! # tokio_test_block_on(async {
//! let bucket = Bucket::new(Arc::new(MemoryStorage::new()), "shortcuts");
//! bucket.set_json("items", &vec!["a", "b"]).await.unwrap();
//! let items: Option<Vec<String>> = bucket.get_json("items").await.unwrap();
//! assert_eq!(items.unwrap().len(), 2);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A stored value could not be (de)serialized.
    #[error("failed to (de)serialize stored value: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend refused or could not complete the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous bucketed key/value store.
#[async_trait]
pub trait StorageApi: Send + Sync {
    /// Read a value.
    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Value>, StorageError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, bucket: &str, key: &str, value: Value) -> Result<(), StorageError>;

    /// Delete a value. Deleting a missing key is not an error.
    async fn remove(&self, bucket: &str, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage guarded by a mutex.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<(String, String), Value>>,
    unavailable: AtomicBool,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with [`StorageError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored values across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<(String, String), Value>>, StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("storage is offline".to_string()));
        }
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))
    }
}

#[async_trait]
impl StorageApi for MemoryStorage {
    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self
            .entries()?
            .get(&(bucket.to_string(), key.to_string()))
            .cloned())
    }

    async fn set(&self, bucket: &str, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries()?
            .insert((bucket.to_string(), key.to_string()), value);
        Ok(())
    }

    async fn remove(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.entries()?
            .remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }
}

/// Handle scoped to one bucket of a [`StorageApi`], with typed accessors.
#[derive(Clone)]
pub struct Bucket {
    storage: Arc<dyn StorageApi>,
    name: String,
}

impl std::fmt::Debug for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bucket").field("name", &self.name).finish()
    }
}

impl Bucket {
    /// Scope `storage` to the bucket `name`.
    pub fn new(storage: Arc<dyn StorageApi>, name: impl Into<String>) -> Self {
        Self {
            storage,
            name: name.into(),
        }
    }

    /// Bucket name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read a value and deserialize it.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.storage.get(&self.name, key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Serialize a value and store it.
    pub async fn set_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let value = serde_json::to_value(value)?;
        self.storage.set(&self.name, key, value).await
    }

    /// Delete a value.
    pub async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove(&self.name, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.get("b", "k").await.unwrap().is_none());

        storage.set("b", "k", json!({"x": 1})).await.unwrap();
        assert_eq!(storage.get("b", "k").await.unwrap(), Some(json!({"x": 1})));
        assert_eq!(storage.len(), 1);

        storage.remove("b", "k").await.unwrap();
        assert!(storage.is_empty());
        storage.remove("b", "k").await.unwrap();
    }

    #[tokio::test]
    async fn test_buckets_are_isolated() {
        let storage = MemoryStorage::new();
        storage.set("a", "k", json!(1)).await.unwrap();
        storage.set("b", "k", json!(2)).await.unwrap();
        assert_eq!(storage.get("a", "k").await.unwrap(), Some(json!(1)));
        assert_eq!(storage.get("b", "k").await.unwrap(), Some(json!(2)));
    }

    #[tokio::test]
    async fn test_unavailable_storage_fails_every_operation() {
        let storage = MemoryStorage::new();
        storage.set_unavailable(true);
        assert!(matches!(
            storage.get("b", "k").await,
            Err(StorageError::Unavailable(_))
        ));
        assert!(storage.set("b", "k", json!(1)).await.is_err());
        assert!(storage.remove("b", "k").await.is_err());

        storage.set_unavailable(false);
        assert!(storage.set("b", "k", json!(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_bucket_typed_access() {
        let bucket = Bucket::new(Arc::new(MemoryStorage::new()), "shortcuts");
        assert_eq!(bucket.name(), "shortcuts");
        bucket.set_json("items", &vec![1_u32, 2, 3]).await.unwrap();
        let items: Option<Vec<u32>> = bucket.get_json("items").await.unwrap();
        assert_eq!(items, Some(vec![1, 2, 3]));

        bucket.remove("items").await.unwrap();
        let items: Option<Vec<u32>> = bucket.get_json("items").await.unwrap();
        assert_eq!(items, None);
    }

    #[tokio::test]
    async fn test_bucket_type_mismatch_is_serialization_error() {
        let bucket = Bucket::new(Arc::new(MemoryStorage::new()), "shortcuts");
        bucket.set_json("items", &"not a list").await.unwrap();
        let result: Result<Option<Vec<u32>>, _> = bucket.get_json("items").await;
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Unavailable("offline".to_string());
        assert_eq!(err.to_string(), "storage unavailable: offline");
    }
}
