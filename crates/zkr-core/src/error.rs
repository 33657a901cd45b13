//! # Error Types — Structured Error Hierarchy
//!
//! Defines the failure classes shared across zkReserves. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Parse errors carry the 1-based line number of the offending row.
//! - Insolvency is a business outcome, not a fault. It has its own type so
//!   callers can render "cannot prove" without inspecting message text.
//! - Structural errors name the field or path position that violated the
//!   input contract.
//! - Verification mismatches are not errors at all; verifiers return `bool`.

use thiserror::Error;

/// Top-level error type for zkReserves library operations.
#[derive(Error, Debug)]
pub enum ReservesError {
    /// Liability input could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Reserves do not cover liabilities.
    #[error("{0}")]
    Insolvent(#[from] InsolvencyError),

    /// An input violated its structural contract.
    #[error("structural input error: {0}")]
    Structural(#[from] StructuralInputError),
}

impl ReservesError {
    /// Whether this error is the expected insolvency outcome rather than a
    /// fault in the input or infrastructure.
    pub fn is_insolvency(&self) -> bool {
        matches!(self, Self::Insolvent(_))
    }
}

/// Error while parsing liability rows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No data rows remain after dropping blanks, comments, and the header.
    #[error("no data rows found in liability input")]
    EmptyInput,

    /// Every data row had fewer than two comma-separated fields.
    #[error("no valid rows parsed from liability input")]
    NoValidRows,

    /// The amount field is not a non-negative integer.
    #[error("line {line}: invalid amount {value:?}")]
    InvalidAmount {
        /// 1-based line number in the raw input.
        line: usize,
        /// The raw amount field.
        value: String,
    },

    /// The amount does not fit in 64 bits.
    #[error("line {line}: amount exceeds u64 range")]
    AmountOverflow {
        /// 1-based line number in the raw input.
        line: usize,
    },

    /// The running liability total overflowed.
    #[error("line {line}: total liability exceeds u64 range")]
    TotalOverflow {
        /// 1-based line number of the row that overflowed the total.
        line: usize,
    },
}

/// Reserves are below liabilities: no public inputs may be produced.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("insolvent: total reserves {total_reserves} < total liabilities {total_liabilities}")]
pub struct InsolvencyError {
    /// Sum of all reserve balances.
    pub total_reserves: u64,
    /// Sum of all liability amounts.
    pub total_liabilities: u64,
}

/// An input violated its structural contract (malformed hex, bad path side,
/// wrong positional arity, out-of-range value).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralInputError {
    /// A field is not valid hexadecimal.
    #[error("{field}: invalid hex {value:?}: {reason}")]
    InvalidHex {
        /// Name of the offending field.
        field: String,
        /// The raw value.
        value: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A field is not a valid unsigned integer.
    #[error("{field}: invalid integer {value:?}")]
    InvalidInteger {
        /// Name of the offending field.
        field: String,
        /// The raw value.
        value: String,
    },

    /// A value is not below the hash domain modulus.
    #[error("{field}: value {value} is outside the hash domain")]
    OutOfField {
        /// Name of the offending field.
        field: String,
        /// The value, hex-encoded.
        value: String,
    },

    /// A sibling path entry has a side other than `left` or `right`.
    #[error("path[{index}].side: expected \"left\" or \"right\", got {side:?}")]
    InvalidSide {
        /// Position of the entry in the path.
        index: usize,
        /// The raw side value.
        side: String,
    },

    /// A reserve band outside `0..=3`.
    #[error("reserve band must be 0..=3, got {0}")]
    InvalidBand(u64),

    /// A positional record has the wrong number of fields.
    #[error("expected {expected} positional fields, got {actual}")]
    FieldCount {
        /// Number of fields the record layout requires.
        expected: usize,
        /// Number of fields supplied.
        actual: usize,
    },

    /// The hash domain modulus is unusable.
    #[error("invalid hash domain modulus: {0}")]
    InvalidModulus(String),

    /// JSON document did not match the expected shape.
    #[error("malformed JSON: {0}")]
    Json(String),
}
