//! # Field Elements and the Hash Domain
//!
//! Every hash output in zkReserves (leaf hashes, Merkle nodes, roots, entity
//! ids, proof commitments) is an integer below the modulus of one
//! [`HashDomain`]. [`FieldElement`] stores such an integer as 32 big-endian
//! bytes, so byte order and numeric order coincide and `Ord` is numeric.
//!
//! ## Security Invariant
//!
//! A producer and a verifier agree on a root only if they reduce into the
//! same modulus. The modulus is therefore carried as a value (usually built
//! once from configuration) rather than a constant sprinkled through the
//! hashing code.
//!
//! ## Wire Format
//!
//! Field elements render as `0x`-prefixed lowercase hex without leading
//! zeros (`0x0` for zero). Parsing accepts upper or lower case, with or
//! without the `0x` prefix, and tolerates leading zeros.

use std::fmt;
use std::str::FromStr;

use malachite::Natural;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::StructuralInputError;

/// Width of a field element in bytes.
pub const FIELD_BYTES: usize = 32;

/// The 252-bit STARK prime `2^251 + 17·2^192 + 1`, the default modulus.
pub const STARK_PRIME_HEX: &str =
    "0x800000000000011000000000000000000000000000000000000000000000001";

/// An unsigned integer below 2^256, stored big-endian.
///
/// A `FieldElement` is only meaningful relative to a [`HashDomain`];
/// [`HashDomain::contains()`] checks that it lies below the modulus.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FieldElement([u8; FIELD_BYTES]);

impl FieldElement {
    /// The zero element.
    pub const ZERO: Self = Self([0u8; FIELD_BYTES]);

    /// Wrap 32 big-endian bytes.
    pub const fn from_be_bytes(bytes: [u8; FIELD_BYTES]) -> Self {
        Self(bytes)
    }

    /// Embed a `u64` without reduction.
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; FIELD_BYTES];
        bytes[FIELD_BYTES - 8..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// The raw big-endian bytes.
    pub fn as_be_bytes(&self) -> &[u8; FIELD_BYTES] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// The value as a `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        let (high, low) = self.0.split_at(FIELD_BYTES - 8);
        if high.iter().any(|b| *b != 0) {
            return None;
        }
        let mut buf = [0u8; 8];
        buf.copy_from_slice(low);
        Some(u64::from_be_bytes(buf))
    }

    /// Render as `0x`-prefixed lowercase hex without leading zeros.
    pub fn to_hex(&self) -> String {
        let full: String = self.0.iter().map(|b| format!("{b:02x}")).collect();
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{trimmed}")
        }
    }

    /// Render as 64 hex digits, zero-padded, `0x`-prefixed.
    pub fn to_padded_hex(&self) -> String {
        let full: String = self.0.iter().map(|b| format!("{b:02x}")).collect();
        format!("0x{full}")
    }

    /// Parse a hex string, naming `field` in any error.
    pub fn parse_hex(field: &str, value: &str) -> Result<Self, StructuralInputError> {
        let invalid = |reason: &str| StructuralInputError::InvalidHex {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(invalid("empty"));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("non-hex character"));
        }
        let significant = digits.trim_start_matches('0');
        if significant.len() > FIELD_BYTES * 2 {
            return Err(invalid("exceeds 256 bits"));
        }

        let padded = format!("{significant:0>64}");
        let mut bytes = [0u8; FIELD_BYTES];
        for (i, chunk) in padded.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|_| invalid("non-ascii"))?;
            bytes[i] = u8::from_str_radix(pair, 16).map_err(|_| invalid("non-hex character"))?;
        }
        Ok(Self(bytes))
    }

    fn to_natural(self) -> Natural {
        natural_from_be_bytes(&self.0)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self.to_hex())
    }
}

impl FromStr for FieldElement {
    type Err = StructuralInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex("value", s)
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex("value", &s).map_err(serde::de::Error::custom)
    }
}

/// The numeric range a hash function operates over: `[0, modulus)`.
///
/// The modulus must be at least 2^64 and fit in 256 bits. The floor keeps
/// every `u64` amount, block height, and timestamp distinct after embedding:
/// below it, amounts `a` and `a + p` would hash to the same leaf. Primality
/// is the caller's responsibility; the hashing code only needs reduction.
#[derive(Clone, PartialEq, Eq)]
pub struct HashDomain {
    modulus: FieldElement,
    natural: Natural,
}

impl HashDomain {
    /// Build a domain from its modulus.
    pub fn new(modulus: FieldElement) -> Result<Self, StructuralInputError> {
        let natural = modulus.to_natural();
        if natural <= Natural::from(u64::MAX) {
            return Err(StructuralInputError::InvalidModulus(format!(
                "modulus must be at least 2^64, got {modulus}"
            )));
        }
        Ok(Self { modulus, natural })
    }

    /// Build a domain from a hex modulus string.
    pub fn from_hex(modulus_hex: &str) -> Result<Self, StructuralInputError> {
        let modulus = FieldElement::parse_hex("modulus", modulus_hex)?;
        Self::new(modulus)
    }

    pub fn modulus(&self) -> FieldElement {
        self.modulus
    }

    /// Whether `value` lies in `[0, modulus)`.
    pub fn contains(&self, value: &FieldElement) -> bool {
        *value < self.modulus
    }

    /// Return `value` unchanged if it lies in the domain.
    pub fn check(
        &self,
        field: &str,
        value: FieldElement,
    ) -> Result<FieldElement, StructuralInputError> {
        if self.contains(&value) {
            Ok(value)
        } else {
            Err(StructuralInputError::OutOfField {
                field: field.to_string(),
                value: value.to_hex(),
            })
        }
    }

    /// Parse a hex string and check it lies in the domain.
    pub fn parse_element(
        &self,
        field: &str,
        value: &str,
    ) -> Result<FieldElement, StructuralInputError> {
        let element = FieldElement::parse_hex(field, value)?;
        self.check(field, element)
    }

    /// Interpret `bytes` as a big-endian integer of any length and reduce it
    /// modulo the domain modulus.
    pub fn reduce_be_bytes(&self, bytes: &[u8]) -> FieldElement {
        let value = natural_from_be_bytes(bytes);
        natural_to_field(&(&value % &self.natural))
    }

    /// Embed a `u64`. Every domain modulus is at least 2^64, so the value is
    /// never reduced.
    pub fn element_from_u64(&self, value: u64) -> FieldElement {
        FieldElement::from_u64(value)
    }
}

impl Default for HashDomain {
    /// The STARK prime domain.
    fn default() -> Self {
        let mut bytes = [0u8; FIELD_BYTES];
        bytes[0] = 0x08;
        bytes[7] = 0x11;
        bytes[FIELD_BYTES - 1] = 0x01;
        let modulus = FieldElement::from_be_bytes(bytes);
        Self {
            modulus,
            natural: modulus.to_natural(),
        }
    }
}

impl fmt::Debug for HashDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashDomain")
            .field("modulus", &self.modulus.to_hex())
            .finish()
    }
}

fn natural_from_be_bytes(bytes: &[u8]) -> Natural {
    let radix = Natural::from(256u32);
    bytes.iter().fold(Natural::from(0u32), |acc, b| {
        acc * &radix + Natural::from(u32::from(*b))
    })
}

/// Convert a value known to be below 2^256 into a field element.
fn natural_to_field(value: &Natural) -> FieldElement {
    let mut be: Vec<u8> = Vec::with_capacity(FIELD_BYTES);
    for limb in value.to_limbs_asc().iter().rev() {
        be.extend_from_slice(&limb.to_be_bytes());
    }
    let first_nonzero = be.iter().position(|b| *b != 0).unwrap_or(be.len());
    let significant = &be[first_nonzero..];

    let mut bytes = [0u8; FIELD_BYTES];
    let take = significant.len().min(FIELD_BYTES);
    bytes[FIELD_BYTES - take..].copy_from_slice(&significant[significant.len() - take..]);
    FieldElement(bytes)
}
