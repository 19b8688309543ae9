//! The envelope codec seam.
//!
//! Amounts are stored as opaque tagged strings. The codec that produces
//! them is pluggable: the shipped implementation is a reversible encoding
//! (a placeholder, not cryptography), and a real confidential-computation
//! backend can be substituted without touching any ledger logic.

use rust_decimal::Decimal;

use crate::Result;

/// Encodes plaintext amounts into opaque ciphertext strings and back.
///
/// Contract: `decode(encode(a)) == a` for every finite representable
/// amount, including zero and two-decimal values. `decode` must reject
/// malformed input with `MalformedEnvelope` rather than panicking.
pub trait EnvelopeCodec: Send + Sync {
    /// Produce an opaque, format-tagged ciphertext for `amount`.
    fn encode(&self, amount: Decimal) -> Result<String>;

    /// Recover the plaintext amount from a ciphertext.
    fn decode(&self, ciphertext: &str) -> Result<Decimal>;
}
