//! # fusionledger-types
//!
//! Shared types, errors, and configuration for the **FusionLedger** core.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`FusionId`], [`ParticipantId`]
//! - **Record model**: [`FusionRecord`], [`FusionStatus`], [`RecordBlob`]
//! - **Envelope seam**: [`EnvelopeCodec`]
//! - **Configuration**: [`LedgerConfig`], [`AttestationConfig`], [`IndexConfig`]
//! - **Errors**: [`LedgerError`] with `FL_ERR_` prefix codes
//! - **Constants**: storage key layout and system-wide defaults

pub mod config;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod ids;
pub mod record;

// Re-export all primary types at crate root for ergonomic imports:
//   use fusionledger_types::{FusionRecord, FusionStatus, LedgerError, ...};

pub use config::*;
pub use envelope::*;
pub use error::*;
pub use ids::*;
pub use record::*;

// Constants are accessed via `fusionledger_types::constants::FOO`
// (not re-exported to avoid name collisions).
