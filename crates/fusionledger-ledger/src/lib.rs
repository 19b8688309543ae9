//! # fusionledger-ledger
//!
//! **Ledger Plane**: the transition engine and the viewer-facing facade.
//!
//! ## Architecture
//!
//! The facade wires the other planes together for the excluded UI layer:
//! 1. **RecordStore** (storage plane): create, read, list
//! 2. **TransitionEngine**: participant-gated terminal transitions
//! 3. **DisclosureSession** (disclosure plane): attestation-gated reveal
//! 4. **Query plane**: pure filtering, stats, and history over listings
//!
//! ## Operation Flow
//!
//! ```text
//! UI → FusionLedger.create_record() → RecordStore → BlobStore
//!    → FusionLedger.complete()/fail() → TransitionEngine → RecordStore
//!    → FusionLedger.query()/stats()/history() → list_all → query plane
//!    → FusionLedger.request_disclosure() → Signer → EnvelopeCodec
//! ```

pub mod ledger;
pub mod transition;

pub use ledger::FusionLedger;
pub use transition::TransitionEngine;
