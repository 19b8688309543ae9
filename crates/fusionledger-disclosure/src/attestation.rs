//! Attestation messages and the external signer seam.
//!
//! Disclosure is gated behind a signature over a canonical message binding
//! a session public key, the ledger's contract identity, the chain id, and
//! a time window. The core neither persists nor verifies the signature —
//! verification belongs to the backing chain's signature scheme. Its only
//! contract: the signer must resolve before any plaintext exists.

use async_trait::async_trait;
use ed25519_dalek::SigningKey;
use fusionledger_types::{LedgerConfig, Result};
use rand::rngs::OsRng;

/// The canonical attestation payload an external signer approves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestationMessage {
    /// Hex session public key of the signer.
    pub public_key: String,
    /// The ledger's network/contract identity.
    pub contract_address: String,
    /// Chain identifier.
    pub chain_id: u64,
    /// Window start, seconds since epoch.
    pub start_timestamp: i64,
    /// Window length in days.
    pub duration_days: u32,
}

impl AttestationMessage {
    /// Bind a message to the ledger config, a session key, and a window
    /// starting at `start_timestamp`.
    #[must_use]
    pub fn new(config: &LedgerConfig, public_key: impl Into<String>, start_timestamp: i64) -> Self {
        Self {
            public_key: public_key.into(),
            contract_address: config.contract_address.clone(),
            chain_id: config.chain_id,
            start_timestamp,
            duration_days: config.attestation.duration_days,
        }
    }

    /// The canonical signing string, byte-for-byte:
    ///
    /// ```text
    /// publickey:<key>
    /// contractAddresses:<addr>
    /// contractsChainId:<id>
    /// startTimestamp:<ts>
    /// durationDays:<n>
    /// ```
    ///
    /// External signers consume and sign exactly this.
    #[must_use]
    pub fn canonical(&self) -> String {
        format!(
            "publickey:{}\ncontractAddresses:{}\ncontractsChainId:{}\nstartTimestamp:{}\ndurationDays:{}",
            self.public_key,
            self.contract_address,
            self.chain_id,
            self.start_timestamp,
            self.duration_days
        )
    }
}

/// The external signer seam.
///
/// `sign` suspends until the signer's user-facing approval resolves; the
/// core imposes no timeout (callers may). A refusing signer returns
/// `AttestationRejected`. Abandoning the future commits nothing.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Hex form of the session public key bound into attestations.
    fn public_key_hex(&self) -> String;

    /// Sign the canonical message bytes as-is.
    async fn sign(&self, message: &str) -> Result<Vec<u8>>;
}

/// Reference [`Signer`] backed by an in-process ed25519 key.
///
/// Stands in for the wallet during tests and embedded use; production
/// viewers bring their own signer.
pub struct LocalSigner {
    key: SigningKey,
}

impl LocalSigner {
    /// Generate a fresh session keypair.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Signer over an existing secret key.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self {
            key: SigningKey::from_bytes(bytes),
        }
    }
}

#[async_trait]
impl Signer for LocalSigner {
    fn public_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.key.verifying_key().as_bytes()))
    }

    async fn sign(&self, message: &str) -> Result<Vec<u8>> {
        use ed25519_dalek::Signer as _;
        Ok(self.key.sign(message.as_bytes()).to_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signature, Verifier as _};

    use super::*;

    #[test]
    fn canonical_message_is_byte_exact() {
        let mut config = LedgerConfig::new("0xContract", 8009);
        config.attestation.duration_days = 30;
        let message = AttestationMessage::new(&config, "0xKEY", 1_700_000_000);
        assert_eq!(
            message.canonical(),
            "publickey:0xKEY\ncontractAddresses:0xContract\ncontractsChainId:8009\nstartTimestamp:1700000000\ndurationDays:30"
        );
    }

    #[test]
    fn canonical_message_is_deterministic() {
        let config = LedgerConfig::new("0xc", 1);
        let a = AttestationMessage::new(&config, "0xk", 42);
        let b = AttestationMessage::new(&config, "0xk", 42);
        assert_eq!(a, b);
        assert_eq!(a.canonical(), b.canonical());
    }

    #[test]
    fn local_signer_public_key_is_hex() {
        let signer = LocalSigner::generate();
        let pk = signer.public_key_hex();
        assert!(pk.starts_with("0x"));
        assert_eq!(pk.len(), 2 + 64);
        assert!(pk[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn local_signer_signature_verifies() {
        let signer = LocalSigner::from_bytes(&[7u8; 32]);
        let config = LedgerConfig::new("0xcontract", 1);
        let canonical =
            AttestationMessage::new(&config, signer.public_key_hex(), 1_700_000_000).canonical();

        let bytes = signer.sign(&canonical).await.unwrap();
        let signature = Signature::from_slice(&bytes).unwrap();
        signer
            .key
            .verifying_key()
            .verify(canonical.as_bytes(), &signature)
            .expect("signature over the canonical bytes must verify");
    }

    #[tokio::test]
    async fn distinct_signers_distinct_keys() {
        let a = LocalSigner::generate();
        let b = LocalSigner::generate();
        assert_ne!(a.public_key_hex(), b.public_key_hex());
    }
}
