//! Non-fatal index/record disagreement reporting.
//!
//! An index entry with no readable record, or a readable record the index
//! cannot reach, is out of normal operation but must never crash a read
//! path. Warnings ride alongside results so callers can surface them.

use std::fmt;

use fusionledger_types::{FusionId, FusionRecord};

/// A detected disagreement between the index and record storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// The index references an id whose record blob is absent or malformed.
    MissingRecord { id: FusionId },
    /// The index references an id whose record read failed at the store
    /// layer (isolated to this key; the batch continues).
    UnreadableRecord { id: FusionId, reason: String },
    /// A record blob exists but its id is not reachable via the index
    /// (e.g. a create whose index append was lost).
    UnindexedRecord { id: FusionId },
}

impl IntegrityWarning {
    /// The record identifier this warning concerns.
    #[must_use]
    pub fn id(&self) -> &FusionId {
        match self {
            Self::MissingRecord { id }
            | Self::UnreadableRecord { id, .. }
            | Self::UnindexedRecord { id } => id,
        }
    }
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRecord { id } => {
                write!(f, "index references {id} but its record is unreadable")
            }
            Self::UnreadableRecord { id, reason } => {
                write!(f, "record read for {id} failed: {reason}")
            }
            Self::UnindexedRecord { id } => {
                write!(f, "record {id} exists but is not reachable via the index")
            }
        }
    }
}

/// The result of a batch listing: surviving records plus any integrity
/// warnings gathered along the way.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    /// Records ordered newest-first by timestamp (ties keep index order).
    pub records: Vec<FusionRecord>,
    /// Non-fatal integrity findings.
    pub warnings: Vec<IntegrityWarning>,
}

impl Listing {
    /// Whether the listing completed without integrity findings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// The result of a single checked record read.
#[derive(Debug, Clone, Default)]
pub struct RecordProbe {
    /// The record, if its blob was present and well-formed.
    pub record: Option<FusionRecord>,
    /// An integrity finding, if index and record storage disagree.
    pub warning: Option<IntegrityWarning>,
}
