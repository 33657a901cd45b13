//! # zkr-crypto — Hashing Primitives
//!
//! Provides the deterministic hashing pipeline of zkReserves:
//!
//! - **Field hasher** (`hasher.rs`): the one `Hash2`/`HashN` every producer
//!   and verifier uses, behind the [`FieldHasher`] trait.
//! - **Leaf encoding** (`leaf.rs`): account id → field element, and
//!   `(account, amount)` → leaf hash.
//! - **Merkle tree** (`merkle.rs`): bottom-up folding with the odd-node
//!   self-pairing rule, sibling-path construction, and inclusion
//!   verification.
//! - **Commitment** (`commitment.rs`): `Hash5` over the public inputs and
//!   its verifier.
//!
//! ## Crate Policy
//!
//! - Depends only on `zkr-core` internally.
//! - Every function is pure; no I/O, no shared mutable state.
//! - Tests use the real SHA-256 hasher; hashing is never mocked.

pub mod commitment;
pub mod error;
pub mod hasher;
pub mod leaf;
pub mod merkle;

pub use commitment::{compose_commitment, verify_commitment, CommitmentCheck};
pub use error::CryptoError;
pub use hasher::{FieldHasher, HashAlgorithm, Sha256FieldHasher};
pub use leaf::{compute_entity_id, encode_account_id, leaf_hash};
pub use merkle::{
    compute_merkle_root, parse_sibling_path, verify_inclusion, MerkleTree, PathSide,
    SiblingPathEntry,
};
