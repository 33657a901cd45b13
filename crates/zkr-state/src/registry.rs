//! # Registry Read Contract
//!
//! The on-chain registry is an external collaborator. zkReserves only reads
//! it, through [`RegistryReader`]. Connection settings travel as an explicit
//! [`RegistryConfig`] value; nothing here reads process-wide state.
//!
//! [`SnapshotRegistry`] serves records from a JSON export of the registry:
//!
//! ```json
//! {
//!   "entities": [
//!     {
//!       "entity_id": "0x6b72616b656e",
//!       "name": "Kraken",
//!       "proof_record": ["0x6b72616b656e", "0xd6d80", "0x3d14…", "0x2",
//!                        "0x6968c6c0", "0x1", "0x698f53c0", "0x3"]
//!     }
//!   ]
//! }
//! ```
//!
//! `proof_record` is the registry's positional layout, decoded with
//! [`ProofRecord::from_positional`]. An entry without one has never proven.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use zkr_core::{EntityId, StructuralInputError};

use crate::lifecycle::ProofRecord;

/// Errors reading the registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The snapshot file could not be read.
    #[error("failed to read registry snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON of the expected shape.
    #[error("malformed registry snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored record failed positional decoding.
    #[error("entity {entity_id}: {source}")]
    Record {
        entity_id: String,
        #[source]
        source: StructuralInputError,
    },

    /// A record's embedded id disagrees with the entity it is filed under.
    #[error("entity {expected}: proof record belongs to {actual}")]
    EntityMismatch { expected: EntityId, actual: EntityId },

    /// No reader can be built from the configuration.
    #[error("registry not configured: {0}")]
    NotConfigured(String),
}

/// Where registry reads come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// JSON-RPC endpoint of the chain hosting the registry.
    pub rpc_url: Option<String>,
    /// Registry contract address.
    pub registry_address: Option<String>,
    /// Local JSON snapshot to read instead of the chain.
    pub snapshot: Option<PathBuf>,
}

impl RegistryConfig {
    /// Build the reader this configuration describes.
    pub fn open(&self) -> Result<Box<dyn RegistryReader>, RegistryError> {
        match (&self.snapshot, &self.rpc_url) {
            (Some(path), _) => Ok(Box::new(SnapshotRegistry::from_path(path)?)),
            (None, Some(url)) => Err(RegistryError::NotConfigured(format!(
                "live reads from {url} are not supported; set registry.snapshot"
            ))),
            (None, None) => Err(RegistryError::NotConfigured(
                "set registry.snapshot".to_string(),
            )),
        }
    }
}

/// One registered entity and its latest proof record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub entity_id: EntityId,
    pub name: Option<String>,
    pub record: ProofRecord,
}

/// Read access to the registry.
pub trait RegistryReader: Send + Sync {
    /// Every registered entity.
    fn entries(&self) -> Result<Vec<RegistryEntry>, RegistryError>;

    /// The latest proof record for one entity, or `None` if unregistered.
    fn proof_record(&self, entity_id: &EntityId) -> Result<Option<ProofRecord>, RegistryError> {
        Ok(self
            .entries()?
            .into_iter()
            .find(|e| e.entity_id == *entity_id)
            .map(|e| e.record))
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    entities: Vec<SnapshotEntity>,
}

#[derive(Debug, Deserialize)]
struct SnapshotEntity {
    entity_id: EntityId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    proof_record: Option<Vec<String>>,
}

/// A registry served from a decoded JSON snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRegistry {
    entries: Vec<RegistryEntry>,
}

impl SnapshotRegistry {
    /// Read and decode a snapshot file.
    pub fn from_path(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            entities = registry.entries.len(),
            "loaded registry snapshot"
        );
        Ok(registry)
    }

    /// Decode a snapshot document. Every record is decoded eagerly so a
    /// malformed entry fails the load rather than a later read.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let file: SnapshotFile = serde_json::from_str(json)?;
        let entries = file
            .entities
            .into_iter()
            .map(decode_entity)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn from_entries(entries: Vec<RegistryEntry>) -> Self {
        Self { entries }
    }
}

fn decode_entity(raw: SnapshotEntity) -> Result<RegistryEntry, RegistryError> {
    let record = match raw.proof_record {
        None => ProofRecord::never_proven(raw.entity_id),
        Some(fields) => {
            let record =
                ProofRecord::from_positional(&fields).map_err(|source| RegistryError::Record {
                    entity_id: raw.entity_id.to_string(),
                    source,
                })?;
            if record.entity_id != raw.entity_id {
                return Err(RegistryError::EntityMismatch {
                    expected: raw.entity_id,
                    actual: record.entity_id,
                });
            }
            record
        }
    };
    Ok(RegistryEntry {
        entity_id: raw.entity_id,
        name: raw.name,
        record,
    })
}

impl RegistryReader for SnapshotRegistry {
    fn entries(&self) -> Result<Vec<RegistryEntry>, RegistryError> {
        Ok(self.entries.clone())
    }

    fn proof_record(&self, entity_id: &EntityId) -> Result<Option<ProofRecord>, RegistryError> {
        Ok(self
            .entries
            .iter()
            .find(|e| e.entity_id == *entity_id)
            .map(|e| e.record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkr_core::{FieldElement, ReserveBand};

    const SNAPSHOT: &str = r#"{
        "entities": [
            {
                "entity_id": "0x6b72616b656e",
                "name": "Kraken",
                "proof_record": ["0x6b72616b656e", "0xd6d80", "0xabc", "0x2",
                                 "0x6968c6c0", "0x1", "0x698f53c0", "0x3"]
            },
            { "entity_id": "0x6e6577", "name": "Newcomer" }
        ]
    }"#;

    #[test]
    fn test_snapshot_decodes_entries() {
        let registry = SnapshotRegistry::from_json(SNAPSHOT).unwrap();
        let entries = registry.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name.as_deref(), Some("Kraken"));
        assert_eq!(entries[0].record.band, ReserveBand::Comfortable);
        assert_eq!(entries[0].record.submission_count, 3);
        assert!(!entries[1].record.is_valid);
        assert_eq!(entries[1].record.proof_timestamp, 0);
    }

    #[test]
    fn test_proof_record_lookup() {
        let registry = SnapshotRegistry::from_json(SNAPSHOT).unwrap();
        let id = EntityId(FieldElement::from_u64(0x6b72_616b_656e));
        let record = registry.proof_record(&id).unwrap().unwrap();
        assert_eq!(record.block_height, 880_000);
        let unknown = EntityId(FieldElement::from_u64(1));
        assert!(registry.proof_record(&unknown).unwrap().is_none());
    }

    #[test]
    fn test_bad_record_names_entity() {
        let json = r#"{"entities":[{"entity_id":"0x1","proof_record":["0x1","0x2"]}]}"#;
        let err = SnapshotRegistry::from_json(json).unwrap_err();
        assert!(matches!(err, RegistryError::Record { .. }));
        assert!(err.to_string().contains("0x1"));
    }

    #[test]
    fn test_mismatched_record_rejected() {
        let json = r#"{"entities":[{"entity_id":"0x1","proof_record":
            ["0x2","0x0","0x0","0x0","0x0","0x0","0x0","0x0"]}]}"#;
        assert!(matches!(
            SnapshotRegistry::from_json(json),
            Err(RegistryError::EntityMismatch { .. })
        ));
    }

    #[test]
    fn test_config_requires_snapshot() {
        let cfg = RegistryConfig {
            rpc_url: Some("https://rpc.example".into()),
            ..Default::default()
        };
        assert!(matches!(cfg.open(), Err(RegistryError::NotConfigured(_))));
        assert!(matches!(
            RegistryConfig::default().open(),
            Err(RegistryError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_config_opens_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        std::fs::write(&path, SNAPSHOT).unwrap();
        let cfg = RegistryConfig {
            snapshot: Some(path),
            ..Default::default()
        };
        let reader = cfg.open().unwrap();
        assert_eq!(reader.entries().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_snapshot_is_io_error() {
        let err = SnapshotRegistry::from_path(Path::new("/nonexistent/registry.json"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
    }
}
