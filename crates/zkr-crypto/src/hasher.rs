//! # System-Wide Field Hasher
//!
//! Every leaf hash, Merkle node, entity id, and proof commitment in
//! zkReserves is produced by one [`FieldHasher`]. A producer and a verifier
//! that disagree on the hasher silently disagree on every root, so the
//! hasher is chosen once (from configuration) and passed by reference to
//! every operation.
//!
//! ## Algorithm
//!
//! [`Sha256FieldHasher`] computes
//!
//! ```text
//! HashN(x_1, …, x_n) = SHA256(u64_be(n) || be32(x_1) || … || be32(x_n)) mod p
//! ```
//!
//! where `be32` is the 32-byte big-endian encoding and `p` is the modulus of
//! the configured [`HashDomain`]. The arity prefix keeps `Hash2(a, b)` and
//! `Hash5(a, b, …)` from colliding on shared prefixes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use zkr_core::{FieldElement, HashDomain};

/// The hash function family a [`FieldHasher`] implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256 reduced into the hash domain.
    #[default]
    Sha256,
}

impl HashAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }

    /// Instantiate the hasher for this algorithm over `domain`.
    pub fn hasher(&self, domain: HashDomain) -> Box<dyn FieldHasher> {
        match self {
            Self::Sha256 => Box::new(Sha256FieldHasher::new(domain)),
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed collision-resistant hash over ordered tuples of field elements.
///
/// Implementations must be deterministic and must return values inside
/// [`FieldHasher::domain()`].
pub trait FieldHasher: Send + Sync {
    /// Which algorithm this is.
    fn algorithm(&self) -> HashAlgorithm;

    /// The domain all outputs are reduced into.
    fn domain(&self) -> &HashDomain;

    /// Hash an ordered tuple of any arity.
    fn hash_many(&self, inputs: &[FieldElement]) -> FieldElement;

    /// `Hash2(left, right)`.
    fn hash2(&self, left: &FieldElement, right: &FieldElement) -> FieldElement {
        self.hash_many(&[*left, *right])
    }
}

/// SHA-256 reduced modulo the domain modulus.
#[derive(Debug, Clone, Default)]
pub struct Sha256FieldHasher {
    domain: HashDomain,
}

impl Sha256FieldHasher {
    pub fn new(domain: HashDomain) -> Self {
        Self { domain }
    }
}

impl FieldHasher for Sha256FieldHasher {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Sha256
    }

    fn domain(&self) -> &HashDomain {
        &self.domain
    }

    fn hash_many(&self, inputs: &[FieldElement]) -> FieldElement {
        let mut hasher = Sha256::new();
        hasher.update((inputs.len() as u64).to_be_bytes());
        for input in inputs {
            hasher.update(input.as_be_bytes());
        }
        let digest = hasher.finalize();
        self.domain.reduce_be_bytes(&digest)
    }
}
