//! # Proof System Trait
//!
//! Defines the abstract interface for solvency provers. A real succinct
//! prover and the commitment-backed stand-in are interchangeable behind
//! [`ProofSystem`].
//!
//! ## Security Invariant
//!
//! The trait requires `Send + Sync` bounds for safe concurrent access.
//! Proving never mutates the statement; verification is a pure function of
//! the proof and the public inputs.
//!
//! A proof system owns the [`FieldHasher`] its circuit is built over. Callers
//! that derive public inputs (roots, commitments) must use
//! [`ProofSystem::hasher()`] so the published values and the proof artifact
//! are bound by the same hash.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use zkr_core::PublicInputs;
use zkr_crypto::FieldHasher;

/// Error during proof generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// The statement violates a circuit constraint.
    #[error("unsatisfiable statement: {0}")]
    Unsatisfiable(String),
    /// A public input lies outside what the circuit accepts.
    #[error("invalid public input: {0}")]
    InvalidInput(String),
    /// Internal prover error (toolchain missing, process failure).
    #[error("prover error: {0}")]
    ProverError(String),
}

/// Error during proof verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The proof artifact is malformed.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
    /// A public input lies outside what the verifier accepts.
    #[error("invalid public input: {0}")]
    InvalidInput(String),
}

/// Everything a prover needs: the public inputs and the private totals
/// they were derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvencyStatement {
    /// The values that will be published.
    pub public_inputs: PublicInputs,
    /// Private: sum of every liability amount.
    pub total_liabilities: u64,
    /// Private: sum of every reserve balance.
    pub total_reserves: u64,
}

/// Abstract interface for a solvency proof system.
pub trait ProofSystem: Send + Sync {
    /// The opaque artifact produced by this system.
    type Proof: Send + Sync;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// The hasher the circuit commits with.
    fn hasher(&self) -> &dyn FieldHasher;

    /// Generate a proof for `statement`.
    fn prove(&self, statement: &SolvencyStatement) -> Result<Self::Proof, ProofError>;

    /// Verify a proof against the public inputs alone.
    fn verify(
        &self,
        proof: &Self::Proof,
        public_inputs: &PublicInputs,
    ) -> Result<bool, VerifyError>;
}
