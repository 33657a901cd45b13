//! # zkr-zkp — Prover Collaborator Interface
//!
//! Succinct solvency proofs are produced by an external proving toolchain.
//! This crate defines the narrow interface zkReserves uses to talk to it and
//! ships one implementation that needs no external toolchain.
//!
//! ## Architecture
//!
//! - **Traits** (`traits.rs`): [`ProofSystem`] takes a [`SolvencyStatement`]
//!   (public inputs plus the private totals) and returns an opaque proof
//!   artifact; verification returns `bool`.
//!
//! - **Commitment** (`commitment.rs`): [`CommitmentProofSystem`] checks the
//!   same constraints the circuit asserts and emits the public commitment as
//!   its "proof". It provides no zero-knowledge property and exists for
//!   deployments that publish and check commitments only.
//!
//! ## Crate Policy
//!
//! - Depends on `zkr-core` and `zkr-crypto` internally.
//! - Prover failures are infrastructure errors ([`ProofError`]), never
//!   insolvency outcomes; the caller classifies solvency before proving.

pub mod commitment;
pub mod traits;

pub use commitment::{CommitmentProof, CommitmentProofSystem};
pub use traits::{ProofError, ProofSystem, SolvencyStatement, VerifyError};
