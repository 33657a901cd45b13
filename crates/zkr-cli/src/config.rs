//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`. Every section has defaults, so
//! an empty file (or no file) is a valid configuration.
//!
//! ```yaml
//! hash:
//!   algorithm: sha256
//!   modulus: "0x800000000000011000000000000000000000000000000000000000000000001"
//! parser:
//!   amount_policy: strict          # or strip_non_digits
//! lifecycle:
//!   expiry_warning_secs: 259200
//! registry:
//!   snapshot: registry.json        # relative to this file
//!   rpc_url: https://rpc.example
//!   registry_address: "0x04a1…"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use zkr_core::HashDomain;
use zkr_crypto::{FieldHasher, HashAlgorithm};
use zkr_ledger::AmountPolicy;
use zkr_state::{ExpiryPolicy, RegistryConfig, EXPIRY_WARNING_WINDOW_SECS};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZkrConfig {
    pub hash: HashSettings,
    pub parser: ParserSettings,
    pub lifecycle: LifecycleSettings,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashSettings {
    pub algorithm: HashAlgorithm,
    /// Hex modulus of the hash domain. Unset means the STARK prime.
    pub modulus: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    pub amount_policy: AmountPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleSettings {
    pub expiry_warning_secs: u64,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            expiry_warning_secs: EXPIRY_WARNING_WINDOW_SECS,
        }
    }
}

impl ZkrConfig {
    /// Load from `path`, or return defaults when no path is given.
    ///
    /// A relative `registry.snapshot` is resolved against the config file's
    /// directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let mut config = Self::from_yaml(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;

        if let (Some(snapshot), Some(dir)) = (&config.registry.snapshot, path.parent()) {
            config.registry.snapshot = Some(crate::resolve_path(snapshot, dir));
        }
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// The hash domain the configured modulus describes.
    pub fn domain(&self) -> Result<HashDomain> {
        match &self.hash.modulus {
            None => Ok(HashDomain::default()),
            Some(hex) => HashDomain::from_hex(hex).context("hash.modulus"),
        }
    }

    /// The system-wide hasher.
    pub fn hasher(&self) -> Result<Box<dyn FieldHasher>> {
        Ok(self.hash.algorithm.hasher(self.domain()?))
    }

    pub fn expiry_policy(&self) -> ExpiryPolicy {
        ExpiryPolicy {
            warning_window_secs: self.lifecycle.expiry_warning_secs,
        }
    }
}
