//! # Proof Pipeline
//!
//! One pass from raw inputs to a published claim:
//!
//! 1. parse the liability list,
//! 2. build the liability Merkle tree,
//! 3. sum reserve balances (checked),
//! 4. classify solvency, stopping on insolvency,
//! 5. compose the commitment over the public inputs,
//! 6. hand the statement to the prover.
//!
//! Every hash in the pass (leaves, nodes, the commitment) comes from the
//! prover's own [`ProofSystem::hasher()`], so the published commitment and
//! the proof artifact cannot be computed over different domains.
//!
//! Every stage is synchronous. Callers that need cancellation or progress
//! reporting wrap this function; it has no suspension points of its own.

use serde::Serialize;

use zkr_core::{
    EntityId, LiabilityCommitment, ProofCommitment, PublicInputs, PublishedProof, Timestamp,
};
use zkr_crypto::{compose_commitment, MerkleTree};
use zkr_zkp::{ProofSystem, SolvencyStatement};

use crate::error::PipelineError;
use crate::parser::{parse_liabilities, AmountPolicy};
use crate::solvency::{classify_solvency, reserve_ratio_bps, sum_reserves};

/// Inputs to [`generate_proof`].
#[derive(Debug, Clone)]
pub struct ProofRequest<'a> {
    pub entity_id: EntityId,
    /// Reference block height the reserve balances were read at.
    pub block_height: u64,
    /// Raw `account_id,amount` text.
    pub liabilities_csv: &'a str,
    /// Balance of every reserve wallet, same unit as the liabilities.
    pub reserve_balances: &'a [u64],
    pub timestamp: Timestamp,
    pub amount_policy: AmountPolicy,
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct ProofOutput<P> {
    pub public_inputs: PublicInputs,
    pub commitment: ProofCommitment,
    pub liability: LiabilityCommitment,
    pub total_reserves: u64,
    /// Exact ratio in basis points. Private to the operator.
    pub ratio_bps: Option<u64>,
    pub proof: P,
}

impl<P> ProofOutput<P> {
    /// The document that may be published.
    pub fn published(&self) -> PublishedProof {
        PublishedProof {
            public_inputs: self.public_inputs,
            proof_commitment: self.commitment,
        }
    }
}

/// Run the full pipeline with `prover` and the hasher it commits with.
pub fn generate_proof<S: ProofSystem>(
    prover: &S,
    request: &ProofRequest<'_>,
) -> Result<ProofOutput<S::Proof>, PipelineError> {
    let hasher = prover.hasher();
    let parsed = parse_liabilities(request.liabilities_csv, request.amount_policy)?;
    let tree = MerkleTree::from_records(hasher, &parsed.records)?;
    let liability = tree.liability_commitment(parsed.total_liability);

    let total_reserves =
        sum_reserves(request.reserve_balances).ok_or(PipelineError::ReserveOverflow)?;
    let band = classify_solvency(total_reserves, liability.total_liability).map_err(|e| {
        tracing::info!(
            entity_id = %request.entity_id,
            leaf_count = liability.leaf_count,
            "reserves do not cover liabilities"
        );
        e
    })?;

    let public_inputs = PublicInputs {
        entity_id: request.entity_id,
        block_height: request.block_height,
        liability_root: liability.root,
        band,
        proof_timestamp: request.timestamp.unix_secs(),
    };
    public_inputs.validate(hasher.domain())?;
    let commitment = compose_commitment(hasher, &public_inputs);

    let statement = SolvencyStatement {
        public_inputs,
        total_liabilities: liability.total_liability,
        total_reserves,
    };
    let proof = prover.prove(&statement)?;

    tracing::info!(
        entity_id = %public_inputs.entity_id,
        block_height = public_inputs.block_height,
        band = band.as_u8(),
        leaf_count = liability.leaf_count,
        prover = prover.name(),
        commitment = %commitment,
        "solvency proof generated"
    );

    Ok(ProofOutput {
        public_inputs,
        commitment,
        liability,
        total_reserves,
        ratio_bps: reserve_ratio_bps(total_reserves, liability.total_liability),
        proof,
    })
}
