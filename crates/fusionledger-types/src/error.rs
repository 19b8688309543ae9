//! Error types for the FusionLedger core.
//!
//! All errors use the `FL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Record errors
//! - 2xx: Index errors
//! - 3xx: Transition errors
//! - 4xx: Disclosure errors
//! - 5xx: Blob store errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{FusionId, FusionStatus};

/// Central error enum for all FusionLedger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // =================================================================
    // Record Errors (1xx)
    // =================================================================
    /// The requested fusion record has no resolvable blob.
    #[error("FL_ERR_100: Fusion record not found: {0}")]
    RecordNotFound(FusionId),

    /// A record blob failed to parse. Treated as absent on read paths.
    #[error("FL_ERR_101: Malformed record blob at {key}: {reason}")]
    MalformedRecord { key: String, reason: String },

    /// A fusion identifier failed validation.
    #[error("FL_ERR_102: Invalid fusion id: {reason}")]
    InvalidId { reason: String },

    /// The participant list failed normalization (empty identity, over cap).
    #[error("FL_ERR_103: Invalid participants: {reason}")]
    InvalidParticipants { reason: String },

    // =================================================================
    // Index Errors (2xx)
    // =================================================================
    /// An index append kept losing to concurrent writers.
    #[error("FL_ERR_200: Index append for {id} lost to concurrent writers after {attempts} attempts")]
    IndexConflict { id: FusionId, attempts: u32 },

    /// The index blob failed to parse. Treated as empty on read paths.
    #[error("FL_ERR_201: Malformed index blob: {reason}")]
    MalformedIndex { reason: String },

    // =================================================================
    // Transition Errors (3xx)
    // =================================================================
    /// A transition was requested from a terminal state or to an illegal
    /// target. No write is performed.
    #[error("FL_ERR_300: Invalid transition for {id}: {from} -> {to}")]
    InvalidTransition {
        id: FusionId,
        from: FusionStatus,
        to: FusionStatus,
    },

    /// The requesting identity is not a participant of the record.
    #[error("FL_ERR_301: {identity} is not a participant of {id}")]
    NotParticipant { id: FusionId, identity: String },

    // =================================================================
    // Disclosure Errors (4xx)
    // =================================================================
    /// An amount envelope could not be decoded.
    #[error("FL_ERR_400: Malformed amount envelope: {reason}")]
    MalformedEnvelope { reason: String },

    /// The external signer refused the attestation message.
    #[error("FL_ERR_401: Attestation rejected by signer: {reason}")]
    AttestationRejected { reason: String },

    // =================================================================
    // Blob Store Errors (5xx)
    // =================================================================
    /// The backing store is unreachable or reports unavailable.
    #[error("FL_ERR_500: Blob store unavailable")]
    StoreUnavailable,

    /// A single-key read failed at the store layer.
    #[error("FL_ERR_501: Blob store read failed for {key}: {reason}")]
    StoreReadFailed { key: String, reason: String },

    /// A single-key write failed at the store layer.
    #[error("FL_ERR_502: Blob store write failed for {key}: {reason}")]
    StoreWriteFailed { key: String, reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("FL_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("FL_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (missing contract identity, zero attempt budget).
    #[error("FL_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error (disk, network).
    #[error("FL_ERR_903: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
