//! The viewer-facing facade over all planes.

use std::sync::Arc;

use fusionledger_disclosure::{Disclosure, DisclosureSession, Signer, TaggedBase64Codec};
use fusionledger_query::{LedgerStats, StatusFilter};
use fusionledger_store::{BlobStore, Listing, RecordProbe, RecordStore};
use fusionledger_types::{
    EnvelopeCodec, FusionId, FusionRecord, LedgerConfig, Result,
};
use rust_decimal::Decimal;

use crate::transition::TransitionEngine;

/// The fusion ledger core, assembled over a blob store.
///
/// Every operation the excluded UI layer consumes lives here. The facade
/// holds no state of its own beyond the wired planes; all persistence goes
/// through the storage plane's contracts.
pub struct FusionLedger<S> {
    records: Arc<RecordStore<S>>,
    transitions: TransitionEngine<S>,
    disclosure: DisclosureSession,
}

impl<S: BlobStore> FusionLedger<S> {
    /// Ledger with the shipped tagged-base64 envelope codec.
    #[must_use]
    pub fn new(store: Arc<S>, config: LedgerConfig) -> Self {
        Self::with_codec(store, config, Arc::new(TaggedBase64Codec::new()))
    }

    /// Ledger with a custom envelope codec (e.g. a real confidential
    /// backend).
    #[must_use]
    pub fn with_codec(
        store: Arc<S>,
        config: LedgerConfig,
        codec: Arc<dyn EnvelopeCodec>,
    ) -> Self {
        let records = Arc::new(RecordStore::with_config(
            store,
            Arc::clone(&codec),
            &config.index,
        ));
        let transitions = TransitionEngine::new(Arc::clone(&records));
        let disclosure = DisclosureSession::new(codec, config);
        Self {
            records,
            transitions,
            disclosure,
        }
    }

    /// Create a fresh pending fusion. See [`RecordStore::create`].
    ///
    /// # Errors
    /// Participant, codec, and store failures propagate.
    pub async fn create_record(
        &self,
        amount: Decimal,
        participants: &[String],
        creator: &str,
    ) -> Result<FusionRecord> {
        self.records.create(amount, participants, creator).await
    }

    /// All indexed records, newest first, with integrity warnings.
    ///
    /// # Errors
    /// Infallible in practice; see [`RecordStore::list_all`].
    pub async fn list_all(&self) -> Result<Listing> {
        self.records.list_all().await
    }

    /// Filter the full listing by search term and status.
    ///
    /// # Errors
    /// Propagates listing failures; the projection itself cannot fail.
    pub async fn query(
        &self,
        search_term: &str,
        filter: StatusFilter,
    ) -> Result<Vec<FusionRecord>> {
        let listing = self.list_all().await?;
        Ok(fusionledger_query::query(
            &listing.records,
            search_term,
            filter,
        ))
    }

    /// Read one record, reporting an integrity warning if it is orphaned
    /// from the index.
    ///
    /// # Errors
    /// Propagates store I/O failures.
    pub async fn record(&self, id: &FusionId) -> Result<RecordProbe> {
        self.records.read_checked(id).await
    }

    /// Mark a pending fusion completed. Only participants may transition.
    ///
    /// # Errors
    /// `RecordNotFound`, `NotParticipant`, `InvalidTransition`, or store
    /// failures.
    pub async fn complete(&self, id: &FusionId, actor: &str) -> Result<FusionRecord> {
        self.transitions.complete(id, actor).await
    }

    /// Mark a pending fusion failed. Only participants may transition.
    ///
    /// # Errors
    /// `RecordNotFound`, `NotParticipant`, `InvalidTransition`, or store
    /// failures.
    pub async fn fail(&self, id: &FusionId, actor: &str) -> Result<FusionRecord> {
        self.transitions.fail(id, actor).await
    }

    /// Reveal a ciphertext amount behind the attestation gate.
    ///
    /// # Errors
    /// `AttestationRejected` on signer refusal, `MalformedEnvelope` on a
    /// bad ciphertext; in both cases no plaintext exists.
    pub async fn request_disclosure(
        &self,
        ciphertext: &str,
        viewer: &str,
        signer: &dyn Signer,
    ) -> Result<Disclosure> {
        self.disclosure
            .request_disclosure(ciphertext, viewer, signer)
            .await
    }

    /// Whether `identity` participates in `record` — the predicate gating
    /// both mutation and the viewer's "yours" surface.
    #[must_use]
    pub fn is_participant(record: &FusionRecord, identity: &str) -> bool {
        record.is_participant(identity)
    }

    /// Status breakdown across all listed records.
    ///
    /// # Errors
    /// Propagates listing failures.
    pub async fn stats(&self) -> Result<LedgerStats> {
        let listing = self.list_all().await?;
        Ok(fusionledger_query::stats(&listing.records))
    }

    /// The viewer's fusion history: listed records they participate in,
    /// newest first.
    ///
    /// # Errors
    /// Propagates listing failures.
    pub async fn history(&self, identity: &str) -> Result<Vec<FusionRecord>> {
        let listing = self.list_all().await?;
        Ok(fusionledger_query::participant_history(
            &listing.records,
            identity,
        ))
    }

    /// Direct access to the storage plane, for embedders that need it.
    #[must_use]
    pub fn records(&self) -> &RecordStore<S> {
        &self.records
    }
}
