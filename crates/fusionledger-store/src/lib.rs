//! # fusionledger-store
//!
//! **Storage Plane**: the blob store adapter seam, the key index manager,
//! and the record store.
//!
//! ## Architecture
//!
//! The storage plane sits between the ledger facade and an external
//! key-value blob store that offers `get`/`set` by string key and nothing
//! else — no multi-key transactions, no compare-and-swap:
//! 1. **BlobStore**: the adapter trait (plus an in-memory implementation)
//! 2. **KeyIndexManager**: owns the single list of record identifiers
//! 3. **RecordStore**: owns per-identifier record blobs and listing
//!
//! ## Consistency
//!
//! The index is a read-modify-write over one key with no isolation from
//! the store. Appends verify their own write and retry once on a detected
//! clobber; disagreements between index and record storage surface as
//! [`IntegrityWarning`]s on read paths, never as crashes.

pub mod blob;
pub mod index;
pub mod integrity;
pub mod records;

pub use blob::{BlobStore, MemoryBlobStore};
pub use index::KeyIndexManager;
pub use integrity::{IntegrityWarning, Listing, RecordProbe};
pub use records::RecordStore;
