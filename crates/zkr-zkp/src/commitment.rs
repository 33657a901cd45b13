//! # Commitment-Backed Proof System
//!
//! A transparent stand-in for the external prover. It asserts the same
//! constraints the solvency circuit does (reserves cover liabilities, the
//! band is provable, every public input lies in the hash domain) and emits
//! the proof commitment as its artifact.
//!
//! ## Security Notice
//!
//! This implementation provides NO zero-knowledge property and proves
//! nothing about the private totals to a third party. A verifier only learns
//! that the commitment matches the public inputs.

use serde::{Deserialize, Serialize};

use zkr_core::{ProofCommitment, PublicInputs};
use zkr_crypto::{compose_commitment, verify_commitment, FieldHasher, Sha256FieldHasher};

use crate::traits::{ProofError, ProofSystem, SolvencyStatement, VerifyError};

/// The artifact: the commitment over the public inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentProof {
    pub commitment: ProofCommitment,
}

/// Proof system whose proofs are bare commitments.
pub struct CommitmentProofSystem {
    hasher: Box<dyn FieldHasher>,
}

impl CommitmentProofSystem {
    pub fn new(hasher: Box<dyn FieldHasher>) -> Self {
        Self { hasher }
    }
}

impl Default for CommitmentProofSystem {
    fn default() -> Self {
        Self::new(Box::new(Sha256FieldHasher::default()))
    }
}

impl std::fmt::Debug for CommitmentProofSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitmentProofSystem")
            .field("algorithm", &self.hasher.algorithm())
            .finish()
    }
}

impl ProofSystem for CommitmentProofSystem {
    type Proof = CommitmentProof;

    fn name(&self) -> &'static str {
        "commitment"
    }

    fn hasher(&self) -> &dyn FieldHasher {
        self.hasher.as_ref()
    }

    fn prove(&self, statement: &SolvencyStatement) -> Result<Self::Proof, ProofError> {
        let inputs = &statement.public_inputs;
        inputs
            .validate(self.hasher.domain())
            .map_err(|e| ProofError::InvalidInput(e.to_string()))?;
        if !inputs.band.is_provable() {
            return Err(ProofError::Unsatisfiable(format!(
                "band {} is not provable",
                inputs.band.as_u8()
            )));
        }
        if statement.total_reserves < statement.total_liabilities {
            return Err(ProofError::Unsatisfiable(
                "reserves below liabilities".to_string(),
            ));
        }

        let commitment = compose_commitment(self.hasher.as_ref(), inputs);
        tracing::debug!(
            prover = self.name(),
            entity_id = %inputs.entity_id,
            commitment = %commitment,
            "statement proven"
        );
        Ok(CommitmentProof { commitment })
    }

    fn verify(
        &self,
        proof: &Self::Proof,
        public_inputs: &PublicInputs,
    ) -> Result<bool, VerifyError> {
        public_inputs
            .validate(self.hasher.domain())
            .map_err(|e| VerifyError::InvalidInput(e.to_string()))?;
        self.hasher
            .domain()
            .check("proof_commitment", proof.commitment.0)
            .map_err(|e| VerifyError::InvalidProof(e.to_string()))?;
        Ok(verify_commitment(self.hasher.as_ref(), public_inputs, &proof.commitment).is_valid)
    }
}
