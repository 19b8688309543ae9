//! The record store — per-identifier record blobs and batch listing.
//!
//! Creation writes the record blob before touching the index so a failed
//! write never leaves a dangling index entry. The reverse failure (record
//! written, index append lost) leaves the record individually readable but
//! orphaned from listing; that condition is non-fatal and detectable via
//! [`RecordStore::read_checked`].

use std::sync::Arc;

use fusionledger_types::{
    EnvelopeCodec, FusionId, FusionRecord, FusionStatus, IndexConfig, ParticipantId, RecordBlob,
    Result, normalize_participants,
};
use rust_decimal::Decimal;

use crate::blob::BlobStore;
use crate::index::KeyIndexManager;
use crate::integrity::{IntegrityWarning, Listing, RecordProbe};

/// Owns record blob serialization and the create/read/write/list surface.
pub struct RecordStore<S> {
    store: Arc<S>,
    index: KeyIndexManager<S>,
    codec: Arc<dyn EnvelopeCodec>,
}

impl<S: BlobStore> RecordStore<S> {
    /// Record store with the default index append budget.
    #[must_use]
    pub fn new(store: Arc<S>, codec: Arc<dyn EnvelopeCodec>) -> Self {
        Self::with_config(store, codec, &IndexConfig::default())
    }

    /// Record store with an explicit index configuration.
    #[must_use]
    pub fn with_config(store: Arc<S>, codec: Arc<dyn EnvelopeCodec>, index: &IndexConfig) -> Self {
        let index = KeyIndexManager::with_attempts(Arc::clone(&store), index.append_attempts);
        Self {
            store,
            index,
            codec,
        }
    }

    /// The index manager backing this store.
    #[must_use]
    pub fn index(&self) -> &KeyIndexManager<S> {
        &self.index
    }

    /// Create a fresh pending record.
    ///
    /// Participants are normalized (trimmed, lowercased, deduplicated) and
    /// the creator is appended if absent. The amount is sealed through the
    /// envelope codec before anything is written. The record blob is
    /// written first; if that fails the index is never touched. If the
    /// subsequent index append fails, the record is still individually
    /// readable — it is logged as orphaned and returned anyway.
    ///
    /// # Errors
    /// Returns `InvalidParticipants` on a bad participant list, codec
    /// errors from `encode`, and store errors from the record write.
    pub async fn create(
        &self,
        amount: Decimal,
        participants: &[String],
        creator: &str,
    ) -> Result<FusionRecord> {
        let creator = ParticipantId::parse(creator)?;
        let participants = normalize_participants(participants, &creator)?;
        let encrypted_amount = self.codec.encode(amount)?;

        let record = FusionRecord {
            id: FusionId::generate(),
            encrypted_amount,
            timestamp: chrono::Utc::now().timestamp(),
            participants,
            status: FusionStatus::Pending,
            tx_hash: String::new(),
        };

        self.write(&record).await?;

        if let Err(err) = self.index.append(&record.id).await {
            tracing::warn!(
                id = %record.id,
                %err,
                "record written but index append failed; record is orphaned from listing"
            );
        } else {
            tracing::info!(
                id = %record.id,
                participants = record.participants.len(),
                "fusion record created"
            );
        }
        Ok(record)
    }

    /// Read the record stored under `id`.
    ///
    /// An absent key is `None`. A malformed blob is logged and reported as
    /// `None` — listing and mutation paths treat it exactly like a missing
    /// record.
    ///
    /// # Errors
    /// Propagates store I/O failures (so mutation paths can tell an
    /// unreachable store from an absent record).
    pub async fn read(&self, id: &FusionId) -> Result<Option<FusionRecord>> {
        let key = id.storage_key();
        let Some(bytes) = self.store.get(&key).await? else {
            return Ok(None);
        };
        if bytes.is_empty() {
            return Ok(None);
        }
        match RecordBlob::from_slice(&key, &bytes) {
            Ok(blob) => Ok(Some(FusionRecord::from_blob(id.clone(), blob))),
            Err(err) => {
                tracing::warn!(%id, %err, "malformed record blob, treating as absent");
                Ok(None)
            }
        }
    }

    /// Read a record and verify it is reachable via the index.
    ///
    /// A record that exists but is missing from the index (a create whose
    /// index append was lost) is returned together with an
    /// [`IntegrityWarning::UnindexedRecord`].
    ///
    /// # Errors
    /// Propagates store I/O failures.
    pub async fn read_checked(&self, id: &FusionId) -> Result<RecordProbe> {
        let record = self.read(id).await?;
        let warning = if record.is_some() && !self.index.contains(id).await? {
            tracing::warn!(%id, "record exists but is not reachable via the index");
            Some(IntegrityWarning::UnindexedRecord { id: id.clone() })
        } else {
            None
        };
        Ok(RecordProbe { record, warning })
    }

    /// Persist `record`, overwriting any previous blob under its key.
    ///
    /// Last-writer-wins with no optimistic check — the design's explicit
    /// contract against a store with per-key atomicity only.
    ///
    /// # Errors
    /// Propagates serialization and store failures.
    pub async fn write(&self, record: &FusionRecord) -> Result<()> {
        let bytes = serde_json::to_vec(&record.to_blob())?;
        self.store.set(&record.id.storage_key(), bytes).await
    }

    /// Load every indexed record, newest first.
    ///
    /// Per-key failures never abort the batch: unreadable or malformed
    /// records are skipped with an [`IntegrityWarning`]. An unavailable
    /// store yields an empty listing rather than an error.
    ///
    /// # Errors
    /// Infallible in practice; the signature leaves room for adapters that
    /// fail outside the per-key path.
    pub async fn list_all(&self) -> Result<Listing> {
        if !self.store.is_available().await {
            tracing::warn!("blob store unavailable, returning empty listing");
            return Ok(Listing::default());
        }
        let ids = match self.index.load().await {
            Ok(ids) => ids,
            Err(err) => {
                tracing::warn!(%err, "index unreadable, returning empty listing");
                return Ok(Listing::default());
            }
        };

        let mut listing = Listing::default();
        for id in ids {
            match self.read(&id).await {
                Ok(Some(record)) => listing.records.push(record),
                Ok(None) => {
                    tracing::warn!(%id, "indexed record missing or malformed");
                    listing.warnings.push(IntegrityWarning::MissingRecord { id });
                }
                Err(err) => {
                    tracing::warn!(%id, %err, "record unreadable, skipping");
                    listing.warnings.push(IntegrityWarning::UnreadableRecord {
                        id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        // Newest first. Vec::sort_by is stable, so records sharing a second
        // keep their index insertion order.
        listing.records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(listing)
    }
}
