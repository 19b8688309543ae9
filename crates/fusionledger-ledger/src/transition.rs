//! The transition engine — applies terminal status transitions.
//!
//! A legal transition loads the record, gates on participant membership,
//! asserts the state machine, mints a fresh settlement reference, and
//! persists the overwrite. An illegal request performs **no write**.

use std::sync::Arc;

use fusionledger_store::{BlobStore, RecordStore};
use fusionledger_types::{FusionId, FusionRecord, FusionStatus, LedgerError, Result};
use sha2::{Digest, Sha256};

/// Applies participant-gated `Pending → Completed/Failed` transitions.
pub struct TransitionEngine<S> {
    records: Arc<RecordStore<S>>,
}

impl<S: BlobStore> TransitionEngine<S> {
    #[must_use]
    pub fn new(records: Arc<RecordStore<S>>) -> Self {
        Self { records }
    }

    /// Transition a pending fusion to `Completed`.
    ///
    /// # Errors
    /// `RecordNotFound`, `NotParticipant`, or `InvalidTransition`; store
    /// failures propagate from the final write.
    pub async fn complete(&self, id: &FusionId, actor: &str) -> Result<FusionRecord> {
        self.apply(id, FusionStatus::Completed, actor).await
    }

    /// Transition a pending fusion to `Failed`.
    ///
    /// # Errors
    /// `RecordNotFound`, `NotParticipant`, or `InvalidTransition`; store
    /// failures propagate from the final write.
    pub async fn fail(&self, id: &FusionId, actor: &str) -> Result<FusionRecord> {
        self.apply(id, FusionStatus::Failed, actor).await
    }

    async fn apply(
        &self,
        id: &FusionId,
        target: FusionStatus,
        actor: &str,
    ) -> Result<FusionRecord> {
        let mut record = self
            .records
            .read(id)
            .await?
            .ok_or_else(|| LedgerError::RecordNotFound(id.clone()))?;

        if !record.is_participant(actor) {
            return Err(LedgerError::NotParticipant {
                id: id.clone(),
                identity: actor.trim().to_lowercase(),
            });
        }

        record.apply_transition(target, settlement_reference(id, target))?;
        self.records.write(&record).await?;

        tracing::info!(%id, status = %target, actor, "fusion transitioned");
        Ok(record)
    }
}

/// Mint an opaque settlement reference: `0x` + 64 hex chars.
///
/// `SHA-256(domain_sep || id || target status || random nonce)` — opaque
/// and unique per transition, stable in shape for downstream consumers.
fn settlement_reference(id: &FusionId, target: FusionStatus) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"fusionledger:txref:v1:");
    hasher.update(id.as_str().as_bytes());
    hasher.update(target.to_string().as_bytes());
    hasher.update(rand::random::<u64>().to_le_bytes());
    format!("0x{}", hex::encode(hasher.finalize()))
}
