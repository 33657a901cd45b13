//! # Proof Commitment
//!
//! A proof commitment binds all five public inputs into one field element:
//!
//! ```text
//! commitment = Hash5(entity_id, block_height, liability_root, band, proof_timestamp)
//! ```
//!
//! Changing any single input changes the commitment, so a verifier holding
//! the inputs and the claimed commitment can detect tampering by recomputing.

use serde::Serialize;

use zkr_core::{ProofCommitment, PublicInputs};

use crate::hasher::FieldHasher;

/// Compute the commitment for a set of public inputs.
pub fn compose_commitment(hasher: &dyn FieldHasher, inputs: &PublicInputs) -> ProofCommitment {
    let elements = inputs.ordered_elements(hasher.domain());
    ProofCommitment(hasher.hash_many(&elements))
}

/// Outcome of a commitment check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommitmentCheck {
    /// Whether the claimed commitment equals the recomputed one.
    pub is_valid: bool,
    /// The commitment recomputed from the inputs.
    pub expected: ProofCommitment,
}

/// Recompute the commitment and compare it to `claimed`.
pub fn verify_commitment(
    hasher: &dyn FieldHasher,
    inputs: &PublicInputs,
    claimed: &ProofCommitment,
) -> CommitmentCheck {
    let expected = compose_commitment(hasher, inputs);
    let is_valid = expected == *claimed;
    if !is_valid {
        tracing::info!(
            entity_id = %inputs.entity_id,
            claimed = %claimed,
            expected = %expected,
            "proof commitment mismatch"
        );
    }
    CommitmentCheck { is_valid, expected }
}
