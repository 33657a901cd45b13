//! # zkr-core — Foundational Types for zkReserves
//!
//! This crate is the leaf of the zkReserves workspace. It defines the value
//! types every producer and verifier agrees on, and nothing else: no hashing,
//! no I/O, no clocks beyond [`Timestamp::now()`].
//!
//! ## Key Design Principles
//!
//! 1. **One numeric type per concept.** Liability and reserve amounts are
//!    `u64` end to end. Hash outputs, roots, entity ids, and commitments are
//!    [`FieldElement`]s: 32-byte big-endian integers below the modulus of a
//!    [`HashDomain`].
//!
//! 2. **The modulus is configuration.** [`HashDomain`] carries the modulus;
//!    nothing in the workspace hard-codes it outside [`HashDomain::default()`].
//!
//! 3. **Bands, not ratios.** [`ReserveBand`] is the only public solvency
//!    signal. The exact ratio never appears in [`PublicInputs`].
//!
//! 4. **Typed failure classes.** [`ParseError`], [`InsolvencyError`], and
//!    [`StructuralInputError`] are distinct types so callers branch on the
//!    variant, never on message text.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `zkr-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod band;
pub mod error;
pub mod field;
pub mod identity;
pub mod inputs;
pub mod liability;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use band::ReserveBand;
pub use error::{InsolvencyError, ParseError, ReservesError, StructuralInputError};
pub use field::{FieldElement, HashDomain, FIELD_BYTES, STARK_PRIME_HEX};
pub use identity::EntityId;
pub use inputs::{ProofCommitment, PublicInputs, PublishedProof};
pub use liability::{LiabilityCommitment, LiabilityRecord};
pub use temporal::Timestamp;
