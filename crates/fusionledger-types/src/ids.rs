//! Identifiers used throughout FusionLedger.
//!
//! Fusion identifiers are wire-compatible strings of the form
//! `fusion-<unix-seconds>-<suffix>`: a time prefix for coordination-free
//! uniqueness plus a short random base36 suffix. `NodeId`-style binary
//! identifiers don't fit here — the backing store's key layout is fixed.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{LedgerError, Result, constants};

// ---------------------------------------------------------------------------
// FusionId
// ---------------------------------------------------------------------------

/// Globally unique fusion record identifier.
///
/// Generated as `fusion-<unix-seconds>-<4 base36 chars>`; the time prefix
/// keeps ids roughly creation-ordered and the random suffix avoids
/// collisions between uncoordinated writers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FusionId(String);

impl FusionId {
    /// Generate a fresh identifier stamped with the current time.
    #[must_use]
    pub fn generate() -> Self {
        let secs = chrono::Utc::now().timestamp();
        let mut rng = rand::thread_rng();
        let suffix: String = (0..constants::ID_SUFFIX_LEN)
            .map(|_| {
                let digit = rng.gen_range(0..36);
                char::from_digit(digit, 36).unwrap_or('0')
            })
            .collect();
        Self(format!("{}-{secs}-{suffix}", constants::ID_PREFIX))
    }

    /// Parse an identifier from its string form.
    ///
    /// The index is the source of truth for foreign identifiers, so parsing
    /// is permissive: any non-empty token without whitespace is accepted.
    ///
    /// # Errors
    /// Returns `InvalidId` for empty or whitespace-bearing input.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::InvalidId {
                reason: "empty identifier".into(),
            });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(LedgerError::InvalidId {
                reason: format!("identifier contains whitespace: {trimmed:?}"),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The storage key this record's blob lives under.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{}{}", constants::RECORD_KEY_PREFIX, self.0)
    }

    /// Extract the embedded creation second from a generated identifier.
    ///
    /// Best-effort: foreign identifiers without a parsable middle segment
    /// yield `None`.
    #[must_use]
    pub fn timestamp_secs(&self) -> Option<i64> {
        self.0.split('-').nth(1)?.parse().ok()
    }

    /// Short display form (first eight characters), for logs and UIs.
    #[must_use]
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map_or(self.0.len(), |(idx, _)| idx);
        &self.0[..end]
    }
}

impl fmt::Display for FusionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ParticipantId
// ---------------------------------------------------------------------------

/// A normalized participant identity (trimmed, lowercased).
///
/// Normalization happens at construction so that equality and membership
/// checks are always case-insensitive. Stored blobs deserialize the raw
/// string as-is; comparisons re-normalize the query side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Normalize and validate an identity string.
    ///
    /// # Errors
    /// Returns `InvalidParticipants` if the identity is empty after trimming.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(LedgerError::InvalidParticipants {
                reason: "empty participant identity".into(),
            });
        }
        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive match against an unnormalized identity.
    #[must_use]
    pub fn matches(&self, identity: &str) -> bool {
        self.0 == identity.trim().to_lowercase()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalize a raw participant list for record creation.
///
/// Blank entries are dropped, the rest are trimmed and lowercased,
/// duplicates are removed preserving first-seen order, and the creator is
/// appended if absent. The result is never empty: the creator is always a
/// participant.
///
/// # Errors
/// Returns `InvalidParticipants` if the normalized list exceeds
/// [`constants::MAX_PARTICIPANTS`].
pub fn normalize_participants(
    raw: &[String],
    creator: &ParticipantId,
) -> Result<Vec<ParticipantId>> {
    let mut out: Vec<ParticipantId> = Vec::with_capacity(raw.len() + 1);
    for entry in raw {
        if entry.trim().is_empty() {
            continue;
        }
        let participant = ParticipantId::parse(entry)?;
        if !out.contains(&participant) {
            out.push(participant);
        }
    }
    if !out.contains(creator) {
        out.push(creator.clone());
    }
    if out.len() > constants::MAX_PARTICIPANTS {
        return Err(LedgerError::InvalidParticipants {
            reason: format!(
                "{} participants exceeds the cap of {}",
                out.len(),
                constants::MAX_PARTICIPANTS
            ),
        });
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
