//! The key index manager — owner of the single list of record identifiers.
//!
//! The index is one JSON array blob under a fixed key, append-only,
//! insertion order = creation order. Appends are read-modify-write with
//! **no isolation from the backing store**: two concurrent appends can
//! both read the pre-append list and each write a version missing the
//! other's addition. The manager narrows (not eliminates) that window by
//! re-reading after every write and retrying a clobbered append from a
//! fresh read; true elimination needs a compare-and-swap the store does
//! not offer.

use std::sync::Arc;

use fusionledger_types::{FusionId, LedgerError, Result, constants};

use crate::blob::BlobStore;

/// Manages the persisted index of fusion identifiers.
pub struct KeyIndexManager<S> {
    store: Arc<S>,
    append_attempts: u32,
}

impl<S: BlobStore> KeyIndexManager<S> {
    /// Manager with the default append budget.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self::with_attempts(store, constants::DEFAULT_APPEND_ATTEMPTS)
    }

    /// Manager with an explicit append budget (initial write + retries).
    ///
    /// # Panics
    /// Panics if `append_attempts` is zero.
    #[must_use]
    pub fn with_attempts(store: Arc<S>, append_attempts: u32) -> Self {
        assert!(append_attempts > 0, "append_attempts must be > 0");
        Self {
            store,
            append_attempts,
        }
    }

    /// Load the ordered identifier list.
    ///
    /// An absent or empty blob is an empty index, not an error. A malformed
    /// blob is logged and treated as empty — the original data is still on
    /// the store until the next successful append rewrites it.
    ///
    /// # Errors
    /// Propagates store I/O failures.
    pub async fn load(&self) -> Result<Vec<FusionId>> {
        let Some(bytes) = self.store.get(constants::INDEX_KEY).await? else {
            return Ok(Vec::new());
        };
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        match parse_index(&bytes) {
            Ok(ids) => Ok(ids),
            Err(err) => {
                tracing::warn!(%err, "malformed index blob, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Whether `id` is reachable via the index.
    ///
    /// # Errors
    /// Propagates store I/O failures.
    pub async fn contains(&self, id: &FusionId) -> Result<bool> {
        Ok(self.load().await?.iter().any(|existing| existing == id))
    }

    /// Append `id` to the index if not already present.
    ///
    /// Read-modify-write over the single index key, followed by a
    /// verification re-read: if a concurrent writer clobbered the list
    /// between our read and write, the missing id is detected and the
    /// append retries from a fresh read (which now includes the
    /// competitor's entries, merging both).
    ///
    /// # Errors
    /// Returns `IndexConflict` once the attempt budget is exhausted.
    pub async fn append(&self, id: &FusionId) -> Result<()> {
        for attempt in 0..self.append_attempts {
            let mut ids = self.load().await?;
            if ids.iter().any(|existing| existing == id) {
                return Ok(());
            }
            ids.push(id.clone());
            let bytes = serde_json::to_vec(&ids)?;
            if let Err(err) = self.store.set(constants::INDEX_KEY, bytes).await {
                tracing::warn!(%id, attempt, %err, "index write failed");
                continue;
            }
            if self.contains(id).await? {
                if attempt > 0 {
                    tracing::debug!(%id, attempt, "index append landed after retry");
                }
                return Ok(());
            }
            tracing::warn!(%id, attempt, "index append lost to a concurrent writer");
        }
        Err(LedgerError::IndexConflict {
            id: id.clone(),
            attempts: self.append_attempts,
        })
    }
}

fn parse_index(bytes: &[u8]) -> Result<Vec<FusionId>> {
    serde_json::from_slice(bytes).map_err(|err| LedgerError::MalformedIndex {
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::blob::MemoryBlobStore;

    fn fid(raw: &str) -> FusionId {
        FusionId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn load_absent_index_is_empty() {
        let manager = KeyIndexManager::new(Arc::new(MemoryBlobStore::new()));
        assert!(manager.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn load_empty_blob_is_empty() {
        let store = Arc::new(MemoryBlobStore::new());
        store.set(constants::INDEX_KEY, Vec::new()).await.unwrap();
        let manager = KeyIndexManager::new(store);
        assert!(manager.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn load_malformed_blob_is_empty() {
        let store = Arc::new(MemoryBlobStore::new());
        store
            .set(constants::INDEX_KEY, b"{definitely not an array".to_vec())
            .await
            .unwrap();
        let manager = KeyIndexManager::new(store);
        assert!(manager.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_preserves_insertion_order() {
        let manager = KeyIndexManager::new(Arc::new(MemoryBlobStore::new()));
        manager.append(&fid("fusion-1-aaaa")).await.unwrap();
        manager.append(&fid("fusion-2-bbbb")).await.unwrap();
        manager.append(&fid("fusion-3-cccc")).await.unwrap();

        let ids = manager.load().await.unwrap();
        assert_eq!(
            ids,
            vec![
                fid("fusion-1-aaaa"),
                fid("fusion-2-bbbb"),
                fid("fusion-3-cccc")
            ]
        );
    }

    #[tokio::test]
    async fn append_is_idempotent() {
        let manager = KeyIndexManager::new(Arc::new(MemoryBlobStore::new()));
        let id = fid("fusion-1-aaaa");
        manager.append(&id).await.unwrap();
        manager.append(&id).await.unwrap();
        assert_eq!(manager.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn contains_reflects_index() {
        let manager = KeyIndexManager::new(Arc::new(MemoryBlobStore::new()));
        let id = fid("fusion-1-aaaa");
        assert!(!manager.contains(&id).await.unwrap());
        manager.append(&id).await.unwrap();
        assert!(manager.contains(&id).await.unwrap());
    }

    #[test]
    #[should_panic(expected = "append_attempts must be > 0")]
    fn zero_attempts_panics() {
        let _ = KeyIndexManager::with_attempts(Arc::new(MemoryBlobStore::new()), 0);
    }

    /// Store double simulating a concurrent writer: immediately after our
    /// first index write lands, a competitor's stale read-modify-write
    /// overwrites the list, dropping our id.
    struct ClobberingStore {
        inner: MemoryBlobStore,
        competitor: Vec<u8>,
        fired: AtomicBool,
    }

    impl ClobberingStore {
        fn new(competitor_ids: &[FusionId]) -> Self {
            Self {
                inner: MemoryBlobStore::new(),
                competitor: serde_json::to_vec(competitor_ids).unwrap(),
                fired: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl BlobStore for ClobberingStore {
        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
            self.inner.set(key, value).await?;
            if key == constants::INDEX_KEY && !self.fired.swap(true, Ordering::SeqCst) {
                self.inner
                    .set(constants::INDEX_KEY, self.competitor.clone())
                    .await?;
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn lost_append_detected_and_repaired() {
        // Both writers read an empty index. The competitor's write lands
        // second and clobbers ours; the verification re-read catches it and
        // the retry merges both ids.
        let ours = fid("fusion-1700000001-ab12");
        let theirs = fid("fusion-1700000002-cd34");
        let store = Arc::new(ClobberingStore::new(std::slice::from_ref(&theirs)));
        let manager = KeyIndexManager::new(Arc::clone(&store));

        manager.append(&ours).await.unwrap();

        let ids = manager.load().await.unwrap();
        assert!(ids.contains(&ours), "our append must survive the clobber");
        assert!(ids.contains(&theirs), "the competitor's append must survive");
        assert_eq!(ids, vec![theirs, ours]);
    }

    /// Store double whose index reads always return a list missing the
    /// appended id, exhausting every verification attempt.
    struct AlwaysClobberedStore {
        inner: MemoryBlobStore,
        sets: AtomicU32,
    }

    #[async_trait]
    impl BlobStore for AlwaysClobberedStore {
        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
            if key == constants::INDEX_KEY {
                return Ok(Some(b"[]".to_vec()));
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
            self.sets.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value).await
        }
    }

    #[tokio::test]
    async fn exhausted_retries_report_conflict() {
        let store = Arc::new(AlwaysClobberedStore {
            inner: MemoryBlobStore::new(),
            sets: AtomicU32::new(0),
        });
        let manager = KeyIndexManager::with_attempts(Arc::clone(&store), 3);

        let err = manager.append(&fid("fusion-1-aaaa")).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::IndexConflict { attempts: 3, .. }
        ));
        assert_eq!(store.sets.load(Ordering::SeqCst), 3);
    }
}
