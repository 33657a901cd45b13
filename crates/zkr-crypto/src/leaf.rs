//! # Leaf Encoding
//!
//! Turns one liability record into one leaf hash:
//!
//! ```text
//! id_encoded = bytes(account_id) as big-endian integer mod p
//! leaf       = Hash2(id_encoded, amount)
//! ```
//!
//! The account id is hashed as its UTF-8 bytes, so two ids that differ only
//! in a character outside ASCII still encode differently.

use zkr_core::{EntityId, FieldElement, LiabilityRecord};

use crate::hasher::FieldHasher;

/// Encode an arbitrary account id string into the hash domain.
pub fn encode_account_id(hasher: &dyn FieldHasher, account_id: &str) -> FieldElement {
    hasher.domain().reduce_be_bytes(account_id.as_bytes())
}

/// `Hash2(encode(account_id), amount)`.
pub fn leaf_hash(hasher: &dyn FieldHasher, record: &LiabilityRecord) -> FieldElement {
    leaf_hash_parts(hasher, &record.account_id, record.amount)
}

pub(crate) fn leaf_hash_parts(
    hasher: &dyn FieldHasher,
    account_id: &str,
    amount: u64,
) -> FieldElement {
    let id = encode_account_id(hasher, account_id);
    let amount = hasher.domain().element_from_u64(amount);
    hasher.hash2(&id, &amount)
}

/// Derive a registry entity id: `Hash2(encode(name), registrant)`.
///
/// `registrant` is the registering account, already a field element.
pub fn compute_entity_id(
    hasher: &dyn FieldHasher,
    name: &str,
    registrant: &FieldElement,
) -> EntityId {
    let name = encode_account_id(hasher, name.trim());
    EntityId(hasher.hash2(&name, registrant))
}
