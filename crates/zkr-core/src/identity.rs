//! # Entity Identity
//!
//! An entity is identified on the registry by a field element. Wrapping it
//! prevents passing a liability root or commitment where an entity id is
//! expected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StructuralInputError;
use crate::field::FieldElement;

/// Registry identifier of a reporting entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub FieldElement);

impl EntityId {
    /// Parse from hex.
    pub fn parse_hex(value: &str) -> Result<Self, StructuralInputError> {
        FieldElement::parse_hex("entity_id", value).map(Self)
    }

    /// Access the inner field element.
    pub fn as_field(&self) -> &FieldElement {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<FieldElement> for EntityId {
    fn from(value: FieldElement) -> Self {
        Self(value)
    }
}
