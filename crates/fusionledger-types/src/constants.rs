//! System-wide constants for the FusionLedger core.

/// Storage key holding the serialized index of all fusion identifiers.
pub const INDEX_KEY: &str = "fusion_keys";

/// Prefix for per-record storage keys (`fusion_<id>`).
pub const RECORD_KEY_PREFIX: &str = "fusion_";

/// Prefix of generated fusion identifiers (`fusion-<secs>-<suffix>`).
pub const ID_PREFIX: &str = "fusion";

/// Length of the random base36 suffix on generated identifiers.
pub const ID_SUFFIX_LEN: usize = 4;

/// Format marker prepended to encoded amount envelopes.
pub const ENVELOPE_TAG: &str = "FHE-";

/// Default attestation window duration in days.
pub const DEFAULT_DURATION_DAYS: u32 = 30;

/// Default index append attempt budget (initial write + one retry).
pub const DEFAULT_APPEND_ATTEMPTS: u32 = 2;

/// Maximum participants allowed on a single fusion record.
pub const MAX_PARTICIPANTS: usize = 64;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "FusionLedger";
