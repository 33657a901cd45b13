//! # zkr-ledger — Liability Ledger Processing
//!
//! Turns a private liability list and a set of reserve balances into a
//! published solvency claim.
//!
//! - **Parser** (`parser.rs`): `account_id,amount` text into ordered
//!   [`LiabilityRecord`](zkr_core::LiabilityRecord)s with a checked total.
//! - **Solvency** (`solvency.rs`): integer-only band classification.
//! - **Pipeline** (`pipeline.rs`): parse, build the tree, classify, compose
//!   the commitment, and hand the statement to a prover.
//!
//! Insolvency surfaces as [`PipelineError::Insolvent`], distinct from every
//! other failure.

pub mod error;
pub mod parser;
pub mod pipeline;
pub mod solvency;

pub use error::PipelineError;
pub use parser::{parse_liabilities, AmountPolicy, ParsedLiabilities};
pub use pipeline::{generate_proof, ProofOutput, ProofRequest};
pub use solvency::{classify_solvency, reserve_ratio_bps, sum_reserves};
