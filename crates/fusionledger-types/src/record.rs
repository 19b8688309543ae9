//! # FusionRecord — the pooled payment intent primitive
//!
//! A fusion record is a multi-party payment intent whose amount is stored
//! as an opaque encoded envelope. Records are append-only ledger entries:
//! never deleted, overwritten in place only by a status transition.
//!
//! ## State Machine
//!
//! ```text
//!   ┌─────────┐  complete   ┌───────────┐
//!   │ PENDING ├────────────▶│ COMPLETED │
//!   └────┬────┘             └───────────┘
//!        │ fail
//!        ▼
//!   ┌────────┐
//!   │ FAILED │
//!   └────────┘
//! ```
//!
//! Both terminal states are mutually exclusive and irreversible; a record
//! never revisits `pending`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{FusionId, LedgerError, ParticipantId, Result};

/// The lifecycle status of a fusion record.
///
/// Transitions are **monotonic** (never go backwards):
/// - `Pending → Completed` (the fusion settled)
/// - `Pending → Failed` (the fusion was abandoned or rejected)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FusionStatus {
    /// The only entry state. Participants may still complete or fail it.
    #[default]
    Pending,
    /// The fusion settled. **Irreversible.**
    Completed,
    /// The fusion was marked failed. **Irreversible.**
    Failed,
}

impl FusionStatus {
    /// Can this status transition to the given target?
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!((self, target), (Self::Pending, Self::Completed | Self::Failed))
    }

    /// Terminal states accept no further transitions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for FusionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Lowercase, matching the wire encoding.
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// A fusion record as the ledger core works with it.
///
/// The identifier lives in the storage key, not the blob — [`RecordBlob`]
/// is the serialized shape, and the two convert via [`FusionRecord::to_blob`]
/// and [`FusionRecord::from_blob`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionRecord {
    /// Globally unique identifier, generated at creation.
    pub id: FusionId,
    /// Opaque amount ciphertext (see the envelope codec seam).
    pub encrypted_amount: String,
    /// Creation time, seconds since epoch. Immutable.
    pub timestamp: i64,
    /// Normalized participant identities. Always includes the creator.
    /// Immutable after creation.
    pub participants: Vec<ParticipantId>,
    /// Lifecycle status, mutated only through [`FusionRecord::apply_transition`].
    pub status: FusionStatus,
    /// Opaque settlement reference. Empty until a terminal transition.
    pub tx_hash: String,
}

impl FusionRecord {
    /// Case-insensitive participant membership check.
    ///
    /// Gates both mutation (only participants may transition a record) and
    /// which records a viewer is offered as theirs.
    #[must_use]
    pub fn is_participant(&self, identity: &str) -> bool {
        let needle = identity.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        self.participants
            .iter()
            .any(|p| p.as_str().to_lowercase() == needle)
    }

    /// Apply a status transition in memory.
    ///
    /// The settlement reference replaces `tx_hash` only when the transition
    /// is legal; an illegal request leaves the record untouched.
    ///
    /// # Errors
    /// Returns `InvalidTransition` if the current status does not permit
    /// the target.
    pub fn apply_transition(&mut self, target: FusionStatus, settlement_ref: String) -> Result<()> {
        if !self.status.can_transition_to(target) {
            return Err(LedgerError::InvalidTransition {
                id: self.id.clone(),
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.tx_hash = settlement_ref;
        Ok(())
    }

    /// Convert to the wire shape.
    #[must_use]
    pub fn to_blob(&self) -> RecordBlob {
        RecordBlob {
            amount: self.encrypted_amount.clone(),
            timestamp: self.timestamp,
            participants: self.participants.clone(),
            status: self.status,
            tx_hash: self.tx_hash.clone(),
        }
    }

    /// Rehydrate from a wire blob and the identifier its key carried.
    #[must_use]
    pub fn from_blob(id: FusionId, blob: RecordBlob) -> Self {
        Self {
            id,
            encrypted_amount: blob.amount,
            timestamp: blob.timestamp,
            participants: blob.participants,
            status: blob.status,
            tx_hash: blob.tx_hash,
        }
    }
}

/// The serialized record shape, preserved bit-exact for compatibility.
///
/// Field order is part of the contract:
/// `{"amount":…,"timestamp":…,"participants":…,"status":…,"txHash":…}`.
/// `status` and `txHash` default when absent — older blobs omit both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBlob {
    pub amount: String,
    pub timestamp: i64,
    pub participants: Vec<ParticipantId>,
    #[serde(default)]
    pub status: FusionStatus,
    #[serde(rename = "txHash", default)]
    pub tx_hash: String,
}

impl RecordBlob {
    /// Deserialize a record blob, attributing parse failures to its key.
    ///
    /// # Errors
    /// Returns `MalformedRecord` on invalid JSON; read paths downgrade this
    /// to absent-with-warning.
    pub fn from_slice(key: &str, bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|err| LedgerError::MalformedRecord {
            key: key.to_string(),
            reason: err.to_string(),
        })
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl FusionRecord {
    /// A fresh pending record with a single participant.
    pub fn dummy(creator: &str) -> Self {
        Self::dummy_at(creator, chrono::Utc::now().timestamp())
    }

    /// A fresh pending record created at a fixed second.
    pub fn dummy_at(creator: &str, timestamp: i64) -> Self {
        Self {
            id: FusionId::generate(),
            encrypted_amount: String::new(),
            timestamp,
            participants: vec![ParticipantId::parse(creator).expect("valid creator identity")],
            status: FusionStatus::Pending,
            tx_hash: String::new(),
        }
    }
}
