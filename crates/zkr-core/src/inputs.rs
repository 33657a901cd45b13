//! # Public Inputs and Proof Commitments
//!
//! [`PublicInputs`] is everything a solvency claim reveals. Its JSON form is
//! the wire contract shared with the registry and with auditors:
//!
//! ```json
//! {
//!   "entity_id": "0x64656d6f",
//!   "block_height": 880412,
//!   "liability_merkle_root": "0x3f1c…",
//!   "reserve_ratio_band": 2,
//!   "proof_timestamp": 1760000000
//! }
//! ```
//!
//! ## Security Invariant
//!
//! [`PublicInputs::ordered_elements()`] fixes the order in which the five
//! fields enter the commitment hash. Reordering yields a different,
//! non-interoperable commitment.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::band::ReserveBand;
use crate::error::StructuralInputError;
use crate::field::{FieldElement, HashDomain};
use crate::identity::EntityId;

/// The five public values bound by a proof commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicInputs {
    /// Registry id of the reporting entity.
    pub entity_id: EntityId,
    /// Reference block height at which reserves were observed.
    pub block_height: u64,
    /// Merkle root over the liability leaves.
    #[serde(rename = "liability_merkle_root")]
    pub liability_root: FieldElement,
    /// Public solvency band.
    #[serde(rename = "reserve_ratio_band")]
    pub band: ReserveBand,
    /// Unix seconds at which the claim was produced.
    pub proof_timestamp: u64,
}

impl PublicInputs {
    /// The five inputs as field elements, in commitment order:
    /// `(entity_id, block_height, liability_root, band, proof_timestamp)`.
    pub fn ordered_elements(&self, domain: &HashDomain) -> [FieldElement; 5] {
        [
            self.entity_id.0,
            domain.element_from_u64(self.block_height),
            self.liability_root,
            domain.element_from_u64(u64::from(self.band.as_u8())),
            domain.element_from_u64(self.proof_timestamp),
        ]
    }

    /// Check that the field-element inputs lie inside `domain`.
    pub fn validate(&self, domain: &HashDomain) -> Result<(), StructuralInputError> {
        domain.check("entity_id", self.entity_id.0)?;
        domain.check("liability_merkle_root", self.liability_root)?;
        Ok(())
    }
}

/// The single public value binding a set of [`PublicInputs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProofCommitment(pub FieldElement);

impl ProofCommitment {
    /// Parse from hex.
    pub fn parse_hex(value: &str) -> Result<Self, StructuralInputError> {
        FieldElement::parse_hex("proof_commitment", value).map(Self)
    }

    pub fn as_field(&self) -> &FieldElement {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl fmt::Display for ProofCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The public output of one solvency claim: the five inputs plus the
/// commitment that binds them. This is the JSON document handed to the
/// registry and to auditors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublishedProof {
    #[serde(flatten)]
    pub public_inputs: PublicInputs,
    pub proof_commitment: ProofCommitment,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PublicInputs {
        PublicInputs {
            entity_id: EntityId(FieldElement::from_u64(0x6465_6d6f)),
            block_height: 880_412,
            liability_root: FieldElement::from_u64(0xabcdef),
            band: ReserveBand::Comfortable,
            proof_timestamp: 1_760_000_000,
        }
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["entity_id"], "0x64656d6f");
        assert_eq!(json["block_height"], 880_412);
        assert_eq!(json["liability_merkle_root"], "0xabcdef");
        assert_eq!(json["reserve_ratio_band"], 2);
        assert_eq!(json["proof_timestamp"], 1_760_000_000u64);
    }

    #[test]
    fn test_wire_roundtrip() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: PublicInputs = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_ordered_elements_order() {
        let domain = HashDomain::default();
        let elems = sample().ordered_elements(&domain);
        assert_eq!(elems[0], FieldElement::from_u64(0x6465_6d6f));
        assert_eq!(elems[1], FieldElement::from_u64(880_412));
        assert_eq!(elems[2], FieldElement::from_u64(0xabcdef));
        assert_eq!(elems[3], FieldElement::from_u64(2));
        assert_eq!(elems[4], FieldElement::from_u64(1_760_000_000));
    }

    #[test]
    fn test_validate_rejects_out_of_domain_root() {
        let domain = HashDomain::default();
        let mut inputs = sample();
        inputs.liability_root = domain.modulus();
        let err = inputs.validate(&domain).unwrap_err();
        assert!(err.to_string().contains("liability_merkle_root"));
    }

    #[test]
    fn test_published_proof_is_flat() {
        let published = PublishedProof {
            public_inputs: sample(),
            proof_commitment: ProofCommitment(FieldElement::from_u64(0x1234)),
        };
        let json = serde_json::to_value(published).unwrap();
        assert_eq!(json["reserve_ratio_band"], 2);
        assert_eq!(json["proof_commitment"], "0x1234");
        let back: PublishedProof = serde_json::from_value(json).unwrap();
        assert_eq!(back, published);
    }
}
