//! # zkr-cli — CLI Tool for zkReserves
//!
//! Provides the `zkr` command-line interface over the commitment and
//! verification engine.
//!
//! ## Subcommands
//!
//! - `zkr root` — Merkle root, leaf count, and total of a liability list.
//! - `zkr path` — Inclusion path for one account.
//! - `zkr prove` — Full pipeline: publishable public inputs and commitment.
//! - `zkr verify commitment` / `zkr verify inclusion` — Independent checks.
//! - `zkr status` — Lifecycle status of registry records.
//! - `zkr entity-id` — Derive a registry entity id.
//!
//! ```bash
//! zkr root liabilities.csv
//! zkr path liabilities.csv --account alice > alice-path.json
//! zkr prove liabilities.csv --entity-id 0x6b72616b656e --block-height 880412 --reserves 60000,40000
//! zkr verify commitment proof.json
//! zkr verify inclusion --account alice --amount 20000 --path-file alice-path.json --root 0x…
//! ```
//!
//! ## Exit Codes
//!
//! `0` success, `1` failure or verification mismatch, `2` reserves do not
//! cover liabilities.

pub mod config;
pub mod entity;
pub mod prove;
pub mod status;
pub mod tree;
pub mod verify;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use config::ZkrConfig;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_INSOLVENT: u8 = 2;

/// Resolve a path that may be relative to `base`.
///
/// If the path is absolute, returns it as-is. If relative and the file
/// exists relative to `base`, uses that. Otherwise returns the path
/// relative to the current directory.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let based = base.join(path);
    if based.exists() {
        based
    } else {
        path.to_path_buf()
    }
}

/// Read a UTF-8 input file.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Pretty JSON for stdout.
pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}
