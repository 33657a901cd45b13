//! # Pipeline Errors
//!
//! One variant per failure class so callers can tell "cannot prove" apart
//! from bad input and from prover faults without reading message text.

use thiserror::Error;

use zkr_core::{InsolvencyError, ParseError, StructuralInputError};
use zkr_crypto::CryptoError;
use zkr_zkp::ProofError;

/// Errors from [`generate_proof`](crate::generate_proof).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The liability list could not be parsed.
    #[error("liability input: {0}")]
    Parse(#[from] ParseError),

    /// Reserves do not cover liabilities. An expected business outcome.
    #[error(transparent)]
    Insolvent(#[from] InsolvencyError),

    /// The sum of reserve balances does not fit in 64 bits.
    #[error("total reserves exceed u64 range")]
    ReserveOverflow,

    /// A public input lies outside the hash domain.
    #[error("public input: {0}")]
    Structural(#[from] StructuralInputError),

    /// Merkle construction failed.
    #[error("merkle: {0}")]
    Crypto(#[from] CryptoError),

    /// The prover collaborator failed.
    #[error("prover: {0}")]
    Prover(#[from] ProofError),
}

impl PipelineError {
    /// Whether this is the insolvency outcome rather than a fault.
    pub fn is_insolvency(&self) -> bool {
        matches!(self, Self::Insolvent(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_insolvency_is_insolvency() {
        let insolvent = PipelineError::from(InsolvencyError {
            total_reserves: 1,
            total_liabilities: 2,
        });
        assert!(insolvent.is_insolvency());
        assert!(!PipelineError::from(ParseError::EmptyInput).is_insolvency());
        assert!(!PipelineError::ReserveOverflow.is_insolvency());
        assert!(!PipelineError::from(ProofError::ProverError("down".into())).is_insolvency());
    }
}
