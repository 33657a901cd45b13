//! # zkr-state — Proof Lifecycle
//!
//! Classifies the proof records an external registry holds. Nothing here
//! writes to the registry; every status is recomputed from the stored
//! record and the current time on each read.
//!
//! ## Modules
//!
//! - **Lifecycle** (`lifecycle.rs`): [`ProofStatus`] with the four states
//!   `NeverProven`, `Active`, `Expiring`, `Expired`; [`ProofRecord`] and its
//!   positional decoding; [`EcosystemHealth`] counts.
//!
//! - **Registry** (`registry.rs`): the [`RegistryReader`] read contract,
//!   [`RegistryConfig`], and a JSON snapshot reader.
//!
//! ## States
//!
//! ```text
//! NeverProven   !is_valid || proof_timestamp == 0
//! Expired       expiry < now
//! Expiring      expiry - now < warning window
//! Active        otherwise
//! ```

pub mod lifecycle;
pub mod registry;

pub use lifecycle::{
    EcosystemHealth, ExpiryPolicy, ProofRecord, ProofStatus, EXPIRY_WARNING_WINDOW_SECS,
    PROOF_RECORD_FIELDS, SECS_PER_DAY,
};
pub use registry::{RegistryConfig, RegistryEntry, RegistryError, RegistryReader, SnapshotRegistry};
