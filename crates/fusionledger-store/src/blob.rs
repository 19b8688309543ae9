//! The blob store adapter seam.
//!
//! The backing store is an external collaborator: opaque byte blobs under
//! string keys, per-key write atomicity, and nothing more. Every call may
//! suspend on network latency, so the trait is async.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use fusionledger_types::{LedgerError, Result};

/// Adapter over the external key-value blob store.
///
/// Implementations are expected to map transport failures onto
/// `StoreReadFailed` / `StoreWriteFailed` (naming the key) and to report
/// reachability through [`BlobStore::is_available`]. The core builds no
/// locking on top of this trait; per-key write atomicity is all it assumes.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch the blob under `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Overwrite the blob under `key`.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Whether the store is currently reachable.
    async fn is_available(&self) -> bool {
        true
    }
}

/// In-memory blob store for unit tests and embedded use.
///
/// Sequentially consistent per key via a mutex; production backends speak
/// to the real store over the network.
#[derive(Default)]
pub struct MemoryBlobStore {
    data: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let data = self
            .data
            .lock()
            .map_err(|_| LedgerError::Internal("memory store mutex poisoned".into()))?;
        Ok(data.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut data = self
            .data
            .lock()
            .map_err(|_| LedgerError::Internal("memory store mutex poisoned".into()))?;
        data.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_set_roundtrip() {
        let store = MemoryBlobStore::new();
        store.set("key1", b"value1".to_vec()).await.unwrap();
        store.set("key2", b"value2".to_vec()).await.unwrap();

        assert_eq!(store.get("key1").await.unwrap(), Some(b"value1".to_vec()));
        assert_eq!(store.get("key2").await.unwrap(), Some(b"value2".to_vec()));
        assert_eq!(store.get("key3").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_overwrites() {
        let store = MemoryBlobStore::new();
        store.set("key", b"old".to_vec()).await.unwrap();
        store.set("key", b"new".to_vec()).await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some(b"new".to_vec()));
    }

    #[tokio::test]
    async fn available_by_default() {
        let store = MemoryBlobStore::new();
        assert!(store.is_available().await);
    }
}
