//! # fusionledger-query
//!
//! **Pure query plane for FusionLedger.**
//!
//! Side-effect-free projections over materialized records. It has:
//!
//! - **Zero side effects**: no store reads, no index access, no logging
//! - **Order preservation**: input order (newest-first from the storage
//!   plane) survives every projection
//! - **Case-insensitive matching**: search terms and identities compare
//!   lowercased

pub mod filter;
pub mod stats;

pub use filter::{StatusFilter, query};
pub use stats::{LedgerStats, participant_history, stats};
