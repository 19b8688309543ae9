//! Record filtering by search term and status.

use std::fmt;

use fusionledger_types::{FusionRecord, FusionStatus};
use serde::{Deserialize, Serialize};

/// Status dimension of a query: everything, or one exact status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
    Failed,
}

impl StatusFilter {
    /// Whether a record with `status` passes this filter.
    #[must_use]
    pub fn matches(self, status: FusionStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => status == FusionStatus::Pending,
            Self::Completed => status == FusionStatus::Completed,
            Self::Failed => status == FusionStatus::Failed,
        }
    }
}

impl From<FusionStatus> for StatusFilter {
    fn from(status: FusionStatus) -> Self {
        match status {
            FusionStatus::Pending => Self::Pending,
            FusionStatus::Completed => Self::Completed,
            FusionStatus::Failed => Self::Failed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Filter `records` by search term and status, preserving input order.
///
/// A record matches the term when it is a case-insensitive substring of
/// the identifier or of any participant identity; an empty (or
/// whitespace-only) term matches everything.
#[must_use]
pub fn query(records: &[FusionRecord], search_term: &str, filter: StatusFilter) -> Vec<FusionRecord> {
    let needle = search_term.trim().to_lowercase();
    records
        .iter()
        .filter(|record| filter.matches(record.status))
        .filter(|record| matches_term(record, &needle))
        .cloned()
        .collect()
}

fn matches_term(record: &FusionRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record.id.as_str().to_lowercase().contains(needle)
        || record
            .participants
            .iter()
            .any(|p| p.as_str().to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use fusionledger_types::ParticipantId;

    use super::*;

    fn sample() -> Vec<FusionRecord> {
        let mut alpha = FusionRecord::dummy_at("0xAlice", 3_000);
        alpha.id = fusionledger_types::FusionId::parse("fusion-3000-alfa").unwrap();
        let mut beta = FusionRecord::dummy_at("0xBob", 2_000);
        beta.id = fusionledger_types::FusionId::parse("fusion-2000-beta").unwrap();
        beta.status = FusionStatus::Completed;
        let mut gamma = FusionRecord::dummy_at("0xCarol", 1_000);
        gamma.id = fusionledger_types::FusionId::parse("fusion-1000-gama").unwrap();
        gamma
            .participants
            .push(ParticipantId::parse("0xAliceAndCo").unwrap());
        gamma.status = FusionStatus::Failed;
        vec![alpha, beta, gamma]
    }

    #[test]
    fn empty_term_all_statuses_is_identity() {
        let records = sample();
        let result = query(&records, "", StatusFilter::All);
        assert_eq!(result, records);
    }

    #[test]
    fn whitespace_term_matches_all() {
        let records = sample();
        assert_eq!(query(&records, "   ", StatusFilter::All).len(), 3);
    }

    #[test]
    fn term_matches_id_substring_case_insensitive() {
        let records = sample();
        let result = query(&records, "BETA", StatusFilter::All);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_str(), "fusion-2000-beta");
    }

    #[test]
    fn term_matches_any_participant() {
        let records = sample();
        // "alice" hits both alpha's creator and gamma's extra participant.
        let result = query(&records, "alice", StatusFilter::All);
        let ids: Vec<&str> = result.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["fusion-3000-alfa", "fusion-1000-gama"]);
    }

    #[test]
    fn status_filter_exact_match() {
        let records = sample();
        let completed = query(&records, "", StatusFilter::Completed);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].status, FusionStatus::Completed);

        let pending = query(&records, "", StatusFilter::Pending);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].status, FusionStatus::Pending);
    }

    #[test]
    fn term_and_status_compose() {
        let records = sample();
        let result = query(&records, "fusion", StatusFilter::Failed);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_str(), "fusion-1000-gama");
    }

    #[test]
    fn no_matches_is_empty() {
        let records = sample();
        assert!(query(&records, "zzz-nothing", StatusFilter::All).is_empty());
    }

    #[test]
    fn input_order_preserved() {
        let records = sample();
        let result = query(&records, "fusion", StatusFilter::All);
        let ids: Vec<&str> = result.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["fusion-3000-alfa", "fusion-2000-beta", "fusion-1000-gama"]
        );
    }

    #[test]
    fn filter_from_status() {
        assert_eq!(
            StatusFilter::from(FusionStatus::Completed),
            StatusFilter::Completed
        );
        assert!(StatusFilter::All.matches(FusionStatus::Failed));
        assert!(!StatusFilter::Pending.matches(FusionStatus::Failed));
    }

    #[test]
    fn filter_wire_encoding() {
        assert_eq!(serde_json::to_string(&StatusFilter::All).unwrap(), "\"all\"");
        assert_eq!(
            serde_json::from_str::<StatusFilter>("\"completed\"").unwrap(),
            StatusFilter::Completed
        );
    }
}
