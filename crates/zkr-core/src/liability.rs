//! # Liability Records
//!
//! One row of the private liability list, and the public summary produced
//! after the list has been folded into a Merkle root.

use serde::{Deserialize, Serialize};

use crate::field::FieldElement;

/// A single (account, amount) liability. Input order is significant and
/// duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiabilityRecord {
    /// Opaque account identifier as it appeared in the input.
    pub account_id: String,
    /// Liability in the smallest integer unit (satoshi-equivalent).
    pub amount: u64,
}

impl LiabilityRecord {
    pub fn new(account_id: impl Into<String>, amount: u64) -> Self {
        Self {
            account_id: account_id.into(),
            amount,
        }
    }
}

/// Summary of a committed liability list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiabilityCommitment {
    /// Merkle root over the ordered leaf hashes.
    pub root: FieldElement,
    /// Number of leaves.
    pub leaf_count: usize,
    /// Exact sum of every record amount.
    pub total_liability: u64,
}
