//! # fusionledger-disclosure
//!
//! **Disclosure Plane**: the amount envelope codec and the
//! signature-gated reveal flow.
//!
//! ## Flow
//!
//! ```text
//! viewer → DisclosureSession.request_disclosure()
//!        → AttestationMessage.canonical() → external Signer (suspends)
//!        → EnvelopeCodec.decode() → transient Disclosure
//! ```
//!
//! No plaintext amount is computed until the signer resolves, and none is
//! ever written back to storage — the revealed value lives only in a
//! [`DisclosureView`] the viewer can clear at any time.

pub mod attestation;
pub mod envelope;
pub mod session;

pub use attestation::{AttestationMessage, LocalSigner, Signer};
pub use envelope::TaggedBase64Codec;
pub use session::{Disclosure, DisclosureSession, DisclosureView};
