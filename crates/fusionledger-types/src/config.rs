//! Configuration types for the FusionLedger core.

use serde::{Deserialize, Serialize};

use crate::{LedgerError, Result, constants};

/// Configuration for a ledger instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// The ledger's network/contract identity, bound into attestations.
    pub contract_address: String,
    /// Chain identifier, bound into attestations.
    pub chain_id: u64,
    /// Disclosure attestation windowing.
    pub attestation: AttestationConfig,
    /// Index append behavior.
    pub index: IndexConfig,
}

impl LedgerConfig {
    /// Config for a ledger bound to the given contract identity.
    #[must_use]
    pub fn new(contract_address: impl Into<String>, chain_id: u64) -> Self {
        Self {
            contract_address: contract_address.into(),
            chain_id,
            attestation: AttestationConfig::default(),
            index: IndexConfig::default(),
        }
    }

    /// Validate that the config can back attestations and index repair.
    ///
    /// # Errors
    /// Returns `Configuration` on an empty contract identity, a zero-day
    /// attestation window, or a zero append budget.
    pub fn validate(&self) -> Result<()> {
        if self.contract_address.trim().is_empty() {
            return Err(LedgerError::Configuration(
                "contract_address must not be empty".into(),
            ));
        }
        if self.attestation.duration_days == 0 {
            return Err(LedgerError::Configuration(
                "attestation duration_days must be > 0".into(),
            ));
        }
        if self.index.append_attempts == 0 {
            return Err(LedgerError::Configuration(
                "index append_attempts must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Disclosure attestation window configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AttestationConfig {
    /// Validity window length, in days, stamped into each attestation.
    pub duration_days: u32,
}

impl Default for AttestationConfig {
    fn default() -> Self {
        Self {
            duration_days: constants::DEFAULT_DURATION_DAYS,
        }
    }
}

/// Index append behavior.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Total append attempts before reporting a conflict
    /// (initial write + retries).
    pub append_attempts: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            append_attempts: constants::DEFAULT_APPEND_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_constants() {
        let cfg = LedgerConfig::new("0xcontract", 11_155_111);
        assert_eq!(cfg.attestation.duration_days, 30);
        assert_eq!(cfg.index.append_attempts, 2);
        cfg.validate().unwrap();
    }

    #[test]
    fn validate_rejects_empty_contract() {
        let cfg = LedgerConfig::new("  ", 1);
        assert!(matches!(
            cfg.validate(),
            Err(LedgerError::Configuration(_))
        ));
    }

    #[test]
    fn validate_rejects_zero_budgets() {
        let mut cfg = LedgerConfig::new("0xcontract", 1);
        cfg.index.append_attempts = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = LedgerConfig::new("0xcontract", 1);
        cfg.attestation.duration_days = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = LedgerConfig::new("0xcontract", 8009);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: LedgerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.contract_address, "0xcontract");
        assert_eq!(back.chain_id, 8009);
        assert_eq!(back.index.append_attempts, cfg.index.append_attempts);
    }
}
