//! Status breakdown and per-participant history projections.

use fusionledger_types::{FusionRecord, FusionStatus};
use serde::{Deserialize, Serialize};

/// Count of records per lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Tally records by status.
#[must_use]
pub fn stats(records: &[FusionRecord]) -> LedgerStats {
    let mut out = LedgerStats::default();
    for record in records {
        out.total += 1;
        match record.status {
            FusionStatus::Pending => out.pending += 1,
            FusionStatus::Completed => out.completed += 1,
            FusionStatus::Failed => out.failed += 1,
        }
    }
    out
}

/// Records in which `identity` participates, input order preserved.
///
/// This is the "yours" surface: the same membership predicate that gates
/// transitions decides what a viewer is shown as their history.
#[must_use]
pub fn participant_history(records: &[FusionRecord], identity: &str) -> Vec<FusionRecord> {
    records
        .iter()
        .filter(|record| record.is_participant(identity))
        .cloned()
        .collect()
}
