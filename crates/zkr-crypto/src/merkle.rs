//! # Liability Merkle Tree
//!
//! Folds an ordered sequence of leaf hashes into a single root and produces
//! sibling paths that let a customer check their own leaf against a
//! published root without seeing any other leaf.
//!
//! ## Algorithm
//!
//! - One leaf: the root *is* the leaf; no hashing.
//! - Otherwise each level pairs `(2i, 2i+1)` into `Hash2(left, right)`.
//!   When a level has odd length its last node is paired with itself:
//!   `Hash2(last, last)`. Nodes are never dropped or zero-padded.
//! - Level `n+1` therefore has `ceil(len(level_n) / 2)` entries.
//!
//! ## Inclusion Paths
//!
//! A path is the sequence of siblings from leaf to root. Each entry says on
//! which side the sibling sits:
//!
//! - `left`:  `next = Hash2(sibling, running)`
//! - `right`: `next = Hash2(running, sibling)`
//!
//! A self-paired node contributes itself as a `right` sibling.
//!
//! ## Security Invariant
//!
//! The self-pairing rule is part of the interoperability contract: zero
//! padding, or promoting the odd node unhashed, changes every root over an
//! odd-sized level.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use zkr_core::{
    FieldElement, HashDomain, LiabilityCommitment, LiabilityRecord, StructuralInputError,
};

use crate::error::CryptoError;
use crate::hasher::FieldHasher;
use crate::leaf::{leaf_hash, leaf_hash_parts};

// ---------------------------------------------------------------------------
// Path representation
// ---------------------------------------------------------------------------

/// Which side of the running hash a sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathSide {
    Left,
    Right,
}

impl PathSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// One step of an inclusion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiblingPathEntry {
    /// Which side the sibling is on.
    pub side: PathSide,
    /// The sibling hash.
    pub hash: FieldElement,
}

// ---------------------------------------------------------------------------
// Tree construction
// ---------------------------------------------------------------------------

/// Hash one level into the next, pairing an odd last node with itself.
fn fold_level(hasher: &dyn FieldHasher, level: &[FieldElement]) -> Vec<FieldElement> {
    level
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            hasher.hash2(left, right)
        })
        .collect()
}

/// Compute the root of an ordered, non-empty leaf sequence.
pub fn compute_merkle_root(
    hasher: &dyn FieldHasher,
    leaves: &[FieldElement],
) -> Result<FieldElement, CryptoError> {
    let mut level = match leaves {
        [] => return Err(CryptoError::EmptyLeaves),
        [single] => return Ok(*single),
        _ => fold_level(hasher, leaves),
    };
    while level.len() > 1 {
        level = fold_level(hasher, &level);
    }
    Ok(level[0])
}

/// A fully materialized Merkle tree: every level from leaves to root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<FieldElement>>,
}

impl MerkleTree {
    /// Build the tree over already-hashed leaves.
    pub fn build(
        hasher: &dyn FieldHasher,
        leaves: Vec<FieldElement>,
    ) -> Result<Self, CryptoError> {
        if leaves.is_empty() {
            return Err(CryptoError::EmptyLeaves);
        }
        let mut levels = vec![leaves];
        while let Some(top) = levels.last() {
            if top.len() <= 1 {
                break;
            }
            let next = fold_level(hasher, top);
            levels.push(next);
        }
        tracing::debug!(
            leaf_count = levels[0].len(),
            depth = levels.len() - 1,
            "built liability Merkle tree"
        );
        Ok(Self { levels })
    }

    /// Hash each record into a leaf and build the tree.
    pub fn from_records(
        hasher: &dyn FieldHasher,
        records: &[LiabilityRecord],
    ) -> Result<Self, CryptoError> {
        let leaves = records.iter().map(|r| leaf_hash(hasher, r)).collect();
        Self::build(hasher, leaves)
    }

    /// The root hash.
    pub fn root(&self) -> FieldElement {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or(FieldElement::ZERO)
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Number of hashing levels above the leaves.
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Every level, leaves first.
    pub fn levels(&self) -> &[Vec<FieldElement>] {
        &self.levels
    }

    /// The leaf hashes in input order.
    pub fn leaves(&self) -> &[FieldElement] {
        self.levels.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Summarize the tree together with the liability total it was built from.
    pub fn liability_commitment(&self, total_liability: u64) -> LiabilityCommitment {
        LiabilityCommitment {
            root: self.root(),
            leaf_count: self.leaf_count(),
            total_liability,
        }
    }

    /// Sibling path from leaf `index` to the root.
    pub fn inclusion_path(&self, index: usize) -> Result<Vec<SiblingPathEntry>, CryptoError> {
        let leaf_count = self.leaf_count();
        if index >= leaf_count {
            return Err(CryptoError::LeafIndexOutOfRange { index, leaf_count });
        }

        let mut path = Vec::with_capacity(self.depth());
        let mut pos = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_pos = pos ^ 1;
            let entry = if sibling_pos < level.len() {
                let side = if sibling_pos < pos {
                    PathSide::Left
                } else {
                    PathSide::Right
                };
                SiblingPathEntry {
                    side,
                    hash: level[sibling_pos],
                }
            } else {
                // Odd tail: the node was paired with itself.
                SiblingPathEntry {
                    side: PathSide::Right,
                    hash: level[pos],
                }
            };
            path.push(entry);
            pos /= 2;
        }
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Inclusion verification
// ---------------------------------------------------------------------------

/// Recompute the root from one `(account_id, amount)` leaf and its sibling
/// path, and compare it to `expected_root`.
///
/// Returns `Ok(false)` on any mismatch. Errors only when an input lies
/// outside the hash domain.
pub fn verify_inclusion(
    hasher: &dyn FieldHasher,
    account_id: &str,
    amount: u64,
    path: &[SiblingPathEntry],
    expected_root: &FieldElement,
) -> Result<bool, StructuralInputError> {
    let domain = hasher.domain();
    domain.check("expected_root", *expected_root)?;
    for (i, entry) in path.iter().enumerate() {
        domain.check(&format!("path[{i}].hash"), entry.hash)?;
    }

    let leaf = leaf_hash_parts(hasher, account_id, amount);
    let computed = path.iter().fold(leaf, |running, entry| match entry.side {
        PathSide::Left => hasher.hash2(&entry.hash, &running),
        PathSide::Right => hasher.hash2(&running, &entry.hash),
    });

    let included = computed == *expected_root;
    tracing::debug!(
        path_len = path.len(),
        computed_root = %computed,
        expected_root = %expected_root,
        included,
        "inclusion check"
    );
    Ok(included)
}

/// Parse the JSON sibling-path format:
/// `[{"side": "left" | "right", "hash": "0x<hex>"}, …]`.
///
/// Blank input is an empty path (single-leaf tree). Every entry is checked
/// for shape, side, hex syntax, and domain membership; errors name the
/// offending position.
pub fn parse_sibling_path(
    domain: &HashDomain,
    json: &str,
) -> Result<Vec<SiblingPathEntry>, StructuralInputError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value =
        serde_json::from_str(json).map_err(|e| StructuralInputError::Json(e.to_string()))?;
    let entries = value
        .as_array()
        .ok_or_else(|| StructuralInputError::Json("sibling path must be a JSON array".into()))?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| parse_path_entry(domain, i, entry))
        .collect()
}

fn parse_path_entry(
    domain: &HashDomain,
    index: usize,
    entry: &Value,
) -> Result<SiblingPathEntry, StructuralInputError> {
    let obj = entry.as_object().ok_or_else(|| {
        StructuralInputError::Json(format!("path[{index}] must be an object"))
    })?;

    let side_raw = obj.get("side").and_then(Value::as_str).ok_or_else(|| {
        StructuralInputError::Json(format!("path[{index}].side must be a string"))
    })?;
    let side = match side_raw.trim().to_ascii_lowercase().as_str() {
        "left" => PathSide::Left,
        "right" => PathSide::Right,
        _ => {
            return Err(StructuralInputError::InvalidSide {
                index,
                side: side_raw.to_string(),
            })
        }
    };

    let field = format!("path[{index}].hash");
    let hash_raw = obj
        .get("hash")
        .and_then(Value::as_str)
        .ok_or_else(|| StructuralInputError::Json(format!("{field} must be a string")))?;
    let hash = domain.parse_element(&field, hash_raw)?;

    Ok(SiblingPathEntry { side, hash })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Sha256FieldHasher;

    fn records() -> Vec<LiabilityRecord> {
        vec![
            LiabilityRecord::new("alice", 20_000),
            LiabilityRecord::new("bob", 30_000),
            LiabilityRecord::new("carol", 15_000),
            LiabilityRecord::new("dave", 12_000),
            LiabilityRecord::new("eve", 8_000),
        ]
    }

    fn leaves(hasher: &dyn FieldHasher, n: u64) -> Vec<FieldElement> {
        (0..n)
            .map(|i| leaf_hash(hasher, &LiabilityRecord::new(format!("acct-{i}"), i * 100)))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Root computation
    // -----------------------------------------------------------------------

    #[test]
    fn test_empty_leaves_rejected() {
        let hasher = Sha256FieldHasher::default();
        assert_eq!(compute_merkle_root(&hasher, &[]), Err(CryptoError::EmptyLeaves));
        assert_eq!(MerkleTree::build(&hasher, vec![]), Err(CryptoError::EmptyLeaves));
    }

    #[test]
    fn test_single_leaf_is_root() {
        let hasher = Sha256FieldHasher::default();
        let leaf = leaf_hash(&hasher, &LiabilityRecord::new("solo", 1));
        assert_eq!(compute_merkle_root(&hasher, &[leaf]).unwrap(), leaf);
        let tree = MerkleTree::build(&hasher, vec![leaf]).unwrap();
        assert_eq!(tree.root(), leaf);
        assert_eq!(tree.depth(), 0);
        assert!(tree.inclusion_path(0).unwrap().is_empty());
    }

    #[test]
    fn test_three_leaves_self_pair_third() {
        let hasher = Sha256FieldHasher::default();
        let l = leaves(&hasher, 3);
        let expected = hasher.hash2(&hasher.hash2(&l[0], &l[1]), &hasher.hash2(&l[2], &l[2]));
        assert_eq!(compute_merkle_root(&hasher, &l).unwrap(), expected);

        // Zero padding would give a different root.
        let padded = hasher.hash2(
            &hasher.hash2(&l[0], &l[1]),
            &hasher.hash2(&l[2], &FieldElement::ZERO),
        );
        assert_ne!(expected, padded);
    }

    #[test]
    fn test_three_record_known_vector() {
        let hasher = Sha256FieldHasher::default();
        let tree = MerkleTree::from_records(&hasher, &records()[..3]).unwrap();
        assert_eq!(
            tree.root().to_hex(),
            "0x3d14221a87c2ca9801f04a48e8e42709a8f575e4d92b05ccc961c3e0d0e7dd0"
        );
    }

    #[test]
    fn test_five_record_known_vector() {
        let hasher = Sha256FieldHasher::default();
        let tree = MerkleTree::from_records(&hasher, &records()).unwrap();
        assert_eq!(
            tree.root().to_hex(),
            "0x53c64a9aaaa1129e5cb1464c486fb7ee7bb7ba216da6f49ff75468ab95369b"
        );
        assert_eq!(tree.leaf_count(), 5);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_level_sizes_halve_rounding_up() {
        let hasher = Sha256FieldHasher::default();
        let tree = MerkleTree::build(&hasher, leaves(&hasher, 11)).unwrap();
        let sizes: Vec<usize> = tree.levels().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![11, 6, 3, 2, 1]);
    }

    #[test]
    fn test_tree_matches_streaming_root() {
        let hasher = Sha256FieldHasher::default();
        for n in 1..=17 {
            let l = leaves(&hasher, n);
            let tree = MerkleTree::build(&hasher, l.clone()).unwrap();
            assert_eq!(tree.root(), compute_merkle_root(&hasher, &l).unwrap(), "n={n}");
        }
    }

    #[test]
    fn test_root_is_order_sensitive() {
        let hasher = Sha256FieldHasher::default();
        let mut l = leaves(&hasher, 4);
        let before = compute_merkle_root(&hasher, &l).unwrap();
        l.swap(1, 2);
        assert_ne!(before, compute_merkle_root(&hasher, &l).unwrap());
    }

    #[test]
    fn test_liability_commitment_summary() {
        let hasher = Sha256FieldHasher::default();
        let tree = MerkleTree::from_records(&hasher, &records()).unwrap();
        let c = tree.liability_commitment(85_000);
        assert_eq!(c.root, tree.root());
        assert_eq!(c.leaf_count, 5);
        assert_eq!(c.total_liability, 85_000);
    }

    // -----------------------------------------------------------------------
    // Inclusion paths
    // -----------------------------------------------------------------------

    #[test]
    fn test_all_paths_verify_for_various_sizes() {
        let hasher = Sha256FieldHasher::default();
        for size in [1u64, 2, 3, 4, 5, 7, 8, 9, 15, 16, 17] {
            let recs: Vec<LiabilityRecord> = (0..size)
                .map(|i| LiabilityRecord::new(format!("user-{i}"), 1_000 + i))
                .collect();
            let tree = MerkleTree::from_records(&hasher, &recs).unwrap();
            let root = tree.root();
            for (idx, rec) in recs.iter().enumerate() {
                let path = tree.inclusion_path(idx).unwrap();
                assert_eq!(path.len(), tree.depth());
                assert!(
                    verify_inclusion(&hasher, &rec.account_id, rec.amount, &path, &root).unwrap(),
                    "inclusion failed at size={size}, idx={idx}"
                );
            }
        }
    }

    #[test]
    fn test_odd_tail_path_uses_self_as_right_sibling() {
        let hasher = Sha256FieldHasher::default();
        let tree = MerkleTree::from_records(&hasher, &records()[..3]).unwrap();
        let path = tree.inclusion_path(2).unwrap();
        assert_eq!(path[0].side, PathSide::Right);
        assert_eq!(path[0].hash, tree.leaves()[2]);
        assert_eq!(path[1].side, PathSide::Left);
    }

    #[test]
    fn test_corrupted_sibling_fails() {
        let hasher = Sha256FieldHasher::default();
        let recs = records();
        let tree = MerkleTree::from_records(&hasher, &recs).unwrap();
        let mut path = tree.inclusion_path(3).unwrap();
        path[0].hash = FieldElement::from_u64(12345);
        assert!(!verify_inclusion(&hasher, "dave", 12_000, &path, &tree.root()).unwrap());
    }

    #[test]
    fn test_wrong_amount_or_side_fails() {
        let hasher = Sha256FieldHasher::default();
        let tree = MerkleTree::from_records(&hasher, &records()).unwrap();
        let path = tree.inclusion_path(1).unwrap();
        assert!(!verify_inclusion(&hasher, "bob", 30_001, &path, &tree.root()).unwrap());

        let mut flipped = path.clone();
        flipped[0].side = PathSide::Right;
        assert!(!verify_inclusion(&hasher, "bob", 30_000, &flipped, &tree.root()).unwrap());
    }

    #[test]
    fn test_path_index_out_of_range() {
        let hasher = Sha256FieldHasher::default();
        let tree = MerkleTree::from_records(&hasher, &records()).unwrap();
        assert_eq!(
            tree.inclusion_path(5),
            Err(CryptoError::LeafIndexOutOfRange {
                index: 5,
                leaf_count: 5
            })
        );
    }

    #[test]
    fn test_out_of_domain_sibling_is_structural_error() {
        let hasher = Sha256FieldHasher::default();
        let tree = MerkleTree::from_records(&hasher, &records()).unwrap();
        let mut path = tree.inclusion_path(0).unwrap();
        path[1].hash = hasher.domain().modulus();
        let err = verify_inclusion(&hasher, "alice", 20_000, &path, &tree.root()).unwrap_err();
        assert!(err.to_string().contains("path[1].hash"));
    }

    // -----------------------------------------------------------------------
    // JSON path parsing
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_path_json_roundtrip() {
        let hasher = Sha256FieldHasher::default();
        let tree = MerkleTree::from_records(&hasher, &records()).unwrap();
        let path = tree.inclusion_path(4).unwrap();
        let json = serde_json::to_string(&path).unwrap();
        assert!(json.contains("\"side\":\"right\"") || json.contains("\"side\":\"left\""));
        let parsed = parse_sibling_path(hasher.domain(), &json).unwrap();
        assert_eq!(parsed, path);
        assert!(verify_inclusion(&hasher, "eve", 8_000, &parsed, &tree.root()).unwrap());
    }

    #[test]
    fn test_parse_blank_path_is_empty() {
        let domain = HashDomain::default();
        assert!(parse_sibling_path(&domain, "  ").unwrap().is_empty());
        assert!(parse_sibling_path(&domain, "[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_side() {
        let domain = HashDomain::default();
        let err = parse_sibling_path(&domain, r#"[{"side":"up","hash":"0x1"}]"#).unwrap_err();
        assert_eq!(
            err,
            StructuralInputError::InvalidSide {
                index: 0,
                side: "up".into()
            }
        );
    }

    #[test]
    fn test_parse_rejects_non_hex_hash() {
        let domain = HashDomain::default();
        let json = r#"[{"side":"left","hash":"0x1"},{"side":"right","hash":"banana"}]"#;
        let err = parse_sibling_path(&domain, json).unwrap_err();
        assert!(err.to_string().contains("path[1].hash"));
    }

    #[test]
    fn test_parse_rejects_wrong_shapes() {
        let domain = HashDomain::default();
        assert!(parse_sibling_path(&domain, "{}").is_err());
        assert!(parse_sibling_path(&domain, "[1, 2]").is_err());
        assert!(parse_sibling_path(&domain, r#"[{"side":"left"}]"#).is_err());
        assert!(parse_sibling_path(&domain, r#"[{"side":"left","hash":5}]"#).is_err());
        assert!(parse_sibling_path(&domain, "not json").is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_root_is_deterministic(amounts in proptest::collection::vec(0u64..1_000_000, 1..40)) {
            let hasher = Sha256FieldHasher::default();
            let recs: Vec<LiabilityRecord> = amounts
                .iter()
                .enumerate()
                .map(|(i, a)| LiabilityRecord::new(format!("p-{i}"), *a))
                .collect();
            let a = MerkleTree::from_records(&hasher, &recs).unwrap();
            let b = MerkleTree::from_records(&hasher, &recs).unwrap();
            proptest::prop_assert_eq!(a.root(), b.root());
        }
    }
}
