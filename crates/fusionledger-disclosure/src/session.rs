//! The disclosure session — attest first, decode second, persist never.

use std::fmt;
use std::sync::Arc;

use fusionledger_types::{EnvelopeCodec, LedgerConfig, Result};
use rust_decimal::Decimal;

use crate::attestation::{AttestationMessage, Signer};

/// A revealed amount, held transiently for display.
///
/// Never serialized, never written back to the store; `Debug` redacts the
/// plaintext so it cannot leak through logs.
pub struct Disclosure {
    amount: Decimal,
    attested_at: i64,
}

impl Disclosure {
    /// The revealed plaintext amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Window start of the attestation that authorized this reveal.
    #[must_use]
    pub fn attested_at(&self) -> i64 {
        self.attested_at
    }
}

impl fmt::Debug for Disclosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disclosure")
            .field("amount", &"<redacted>")
            .field("attested_at", &self.attested_at)
            .finish()
    }
}

/// Runs the attest-then-decode gate for a configured ledger.
pub struct DisclosureSession {
    codec: Arc<dyn EnvelopeCodec>,
    config: LedgerConfig,
}

impl DisclosureSession {
    #[must_use]
    pub fn new(codec: Arc<dyn EnvelopeCodec>, config: LedgerConfig) -> Self {
        Self { codec, config }
    }

    /// Reveal the plaintext behind `ciphertext` for `viewer`.
    ///
    /// Builds the canonical attestation message (session key from the
    /// signer, contract identity and window from config, window start =
    /// now) and awaits the signer over those exact bytes. Only after the
    /// attestation resolves is the ciphertext opened. The signature itself
    /// is discarded — verification is the backing chain's concern.
    ///
    /// Dropping the returned future mid-flight commits nothing.
    ///
    /// # Errors
    /// Propagates signer refusal (`AttestationRejected`) and codec
    /// failures (`MalformedEnvelope`); in both cases no plaintext exists.
    pub async fn request_disclosure(
        &self,
        ciphertext: &str,
        viewer: &str,
        signer: &dyn Signer,
    ) -> Result<Disclosure> {
        let start_timestamp = chrono::Utc::now().timestamp();
        let message =
            AttestationMessage::new(&self.config, signer.public_key_hex(), start_timestamp);
        tracing::debug!(viewer, start_timestamp, "requesting disclosure attestation");

        let _signature = signer.sign(&message.canonical()).await?;

        let amount = self.codec.decode(ciphertext)?;
        tracing::debug!(viewer, "disclosure granted");
        Ok(Disclosure {
            amount,
            attested_at: start_timestamp,
        })
    }
}

/// Transient viewer-side holder of a revealed amount.
///
/// Revealing runs the full attestation round-trip; hiding is local and
/// never re-signs. A failed reveal leaves the prior state untouched.
#[derive(Debug, Default)]
pub struct DisclosureView {
    revealed: Option<Disclosure>,
}

impl DisclosureView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently revealed amount, if any.
    #[must_use]
    pub fn revealed(&self) -> Option<Decimal> {
        self.revealed.as_ref().map(Disclosure::amount)
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed.is_some()
    }

    /// Discard the revealed amount without touching the signer.
    pub fn clear(&mut self) {
        self.revealed = None;
    }

    /// Toggle the reveal state.
    ///
    /// Hidden → revealed requires the attestation round-trip; revealed →
    /// hidden is a local clear. Returns the now-visible amount, or `None`
    /// after hiding.
    ///
    /// # Errors
    /// Propagates `request_disclosure` failures; the view is unchanged.
    pub async fn toggle(
        &mut self,
        session: &DisclosureSession,
        ciphertext: &str,
        viewer: &str,
        signer: &dyn Signer,
    ) -> Result<Option<Decimal>> {
        if self.revealed.is_some() {
            self.clear();
            return Ok(None);
        }
        let disclosure = session.request_disclosure(ciphertext, viewer, signer).await?;
        let amount = disclosure.amount();
        self.revealed = Some(disclosure);
        Ok(Some(amount))
    }
}
