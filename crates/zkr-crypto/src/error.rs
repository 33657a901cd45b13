//! # Cryptographic Error Types
//!
//! Structured errors for tree construction in `zkr-crypto`. Verification
//! mismatches are reported as `bool`, never as errors.

use thiserror::Error;

use zkr_core::StructuralInputError;

/// Errors from hashing and tree operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// A Merkle tree needs at least one leaf.
    #[error("cannot build a Merkle tree from an empty leaf set")]
    EmptyLeaves,

    /// Requested leaf index does not exist.
    #[error("leaf index {index} out of range for {leaf_count} leaves")]
    LeafIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of leaves in the tree.
        leaf_count: usize,
    },

    /// An input violated its structural contract.
    #[error(transparent)]
    Structural(#[from] StructuralInputError),
}
