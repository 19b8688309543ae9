//! The shipped envelope codec: tagged base64 over the decimal's string.
//!
//! This is a **reversible encoding with no keying material** — an opacity
//! placeholder so the rest of the ledger treats amounts as ciphertext. It
//! is deliberately not presented as a security mechanism; a confidential-
//! computation backend replaces it by implementing [`EnvelopeCodec`].

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use fusionledger_types::{EnvelopeCodec, LedgerError, Result, constants};
use rust_decimal::Decimal;

/// `FHE-` + standard base64 of the decimal's canonical string.
///
/// Round-trips every finite decimal exactly, including zero, negatives,
/// and two-decimal amounts. Untagged input degrades to a bare decimal
/// parse (pre-tag blobs stored plaintext amounts); anything else is
/// `MalformedEnvelope`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaggedBase64Codec;

impl TaggedBase64Codec {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EnvelopeCodec for TaggedBase64Codec {
    fn encode(&self, amount: Decimal) -> Result<String> {
        Ok(format!(
            "{}{}",
            constants::ENVELOPE_TAG,
            STANDARD.encode(amount.to_string())
        ))
    }

    fn decode(&self, ciphertext: &str) -> Result<Decimal> {
        match ciphertext.strip_prefix(constants::ENVELOPE_TAG) {
            Some(body) => {
                let bytes = STANDARD
                    .decode(body)
                    .map_err(|err| LedgerError::MalformedEnvelope {
                        reason: format!("invalid base64 payload: {err}"),
                    })?;
                let text =
                    String::from_utf8(bytes).map_err(|_| LedgerError::MalformedEnvelope {
                        reason: "payload is not utf-8".into(),
                    })?;
                text.parse().map_err(|_| LedgerError::MalformedEnvelope {
                    reason: format!("payload is not a decimal: {text:?}"),
                })
            }
            // Untagged blobs predate the envelope tag; accept bare decimals.
            None => ciphertext
                .trim()
                .parse()
                .map_err(|_| LedgerError::MalformedEnvelope {
                    reason: format!("untagged and not a decimal: {ciphertext:?}"),
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    fn roundtrip(raw: &str) {
        let codec = TaggedBase64Codec::new();
        let amount = dec(raw);
        let ciphertext = codec.encode(amount).unwrap();
        assert!(ciphertext.starts_with("FHE-"), "missing tag: {ciphertext}");
        assert_eq!(codec.decode(&ciphertext).unwrap(), amount, "for {raw}");
    }

    #[test]
    fn roundtrip_zero() {
        roundtrip("0");
        roundtrip("0.00");
    }

    #[test]
    fn roundtrip_two_decimal_amounts() {
        roundtrip("123.45");
        roundtrip("0.01");
        roundtrip("999999999.99");
    }

    #[test]
    fn roundtrip_fractional_and_large() {
        roundtrip("0.00000001");
        roundtrip("79228162514264337593543950335"); // Decimal::MAX
        roundtrip("-42.5");
    }

    #[test]
    fn encoding_is_deterministic() {
        let codec = TaggedBase64Codec::new();
        assert_eq!(
            codec.encode(dec("123.45")).unwrap(),
            codec.encode(dec("123.45")).unwrap()
        );
    }

    #[test]
    fn known_vector() {
        // base64("123.45") == "MTIzLjQ1" — compatible with the historical
        // tagged format.
        let codec = TaggedBase64Codec::new();
        assert_eq!(codec.encode(dec("123.45")).unwrap(), "FHE-MTIzLjQ1");
        assert_eq!(codec.decode("FHE-MTIzLjQ1").unwrap(), dec("123.45"));
    }

    #[test]
    fn untagged_plaintext_degrades_gracefully() {
        let codec = TaggedBase64Codec::new();
        assert_eq!(codec.decode("123.45").unwrap(), dec("123.45"));
        assert_eq!(codec.decode(" 7 ").unwrap(), dec("7"));
    }

    #[test]
    fn malformed_inputs_rejected_without_panic() {
        let codec = TaggedBase64Codec::new();
        for bad in ["FHE-%%%%", "FHE-bm90IGEgbnVtYmVy", "garbage", ""] {
            let err = codec.decode(bad).unwrap_err();
            assert!(
                matches!(err, LedgerError::MalformedEnvelope { .. }),
                "expected MalformedEnvelope for {bad:?}, got {err}"
            );
        }
    }

    #[test]
    fn tagged_non_utf8_rejected() {
        let codec = TaggedBase64Codec::new();
        // base64 of 0xFF 0xFE — valid base64, invalid utf-8.
        let err = codec.decode("FHE-//4=").unwrap_err();
        assert!(matches!(err, LedgerError::MalformedEnvelope { .. }));
    }
}
