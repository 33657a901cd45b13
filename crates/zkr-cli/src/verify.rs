//! # Verify Subcommands
//!
//! Independent checks any third party can run without trusting the
//! producer:
//!
//! - `zkr verify commitment FILE` recomputes the commitment from the five
//!   public inputs in FILE and compares it to the claimed one (from FILE's
//!   `proof_commitment`, or `--commitment`).
//! - `zkr verify inclusion` recomputes a root from one account's leaf and
//!   sibling path and compares it to the published root.
//!
//! Mismatches print `FAIL: …` and exit 1. Malformed input is an error.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use zkr_core::{ProofCommitment, PublicInputs};
use zkr_crypto::{
    parse_sibling_path, verify_commitment, verify_inclusion, CommitmentCheck, FieldHasher,
};

use crate::config::ZkrConfig;

/// Arguments for `zkr verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(subcommand)]
    pub command: VerifyCommand,
}

/// Verify subcommands.
#[derive(Subcommand, Debug)]
pub enum VerifyCommand {
    /// Check a proof commitment against its public inputs.
    Commitment {
        /// JSON document with the five public inputs.
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Claimed commitment (hex). Overrides `proof_commitment` in FILE.
        #[arg(long)]
        commitment: Option<String>,
    },

    /// Check that one account is included under a published root.
    Inclusion {
        /// Account identifier exactly as it appears in the liability list.
        #[arg(long)]
        account: String,
        /// Liability amount for the account.
        #[arg(long)]
        amount: u64,
        /// File holding the sibling path (or the output of `zkr path`).
        #[arg(long, required_unless_present = "path")]
        path_file: Option<PathBuf>,
        /// Sibling path as inline JSON.
        #[arg(long, conflicts_with = "path_file")]
        path: Option<String>,
        /// Published liability root (hex).
        #[arg(long)]
        root: String,
    },
}

/// Execute `zkr verify`.
pub fn run_verify(args: &VerifyArgs, config: &ZkrConfig) -> Result<u8> {
    let hasher = config.hasher()?;
    match &args.command {
        VerifyCommand::Commitment { file, commitment } => {
            let doc = crate::read_text(file)?;
            cmd_commitment(hasher.as_ref(), &doc, commitment.as_deref())
        }
        VerifyCommand::Inclusion {
            account,
            amount,
            path_file,
            path,
            root,
        } => {
            let path_json = match (path_file, path) {
                (Some(file), _) => crate::read_text(file)?,
                (None, Some(inline)) => inline.clone(),
                (None, None) => return Err(anyhow!("--path-file or --path is required")),
            };
            cmd_inclusion(hasher.as_ref(), account, *amount, &path_json, root)
        }
    }
}

/// Recompute and compare a commitment. Returns the check and the claimed
/// value it was compared against.
pub fn check_commitment(
    hasher: &dyn FieldHasher,
    doc: &str,
    claimed_override: Option<&str>,
) -> Result<(CommitmentCheck, ProofCommitment)> {
    let value: Value = serde_json::from_str(doc).context("public inputs are not valid JSON")?;
    let inputs: PublicInputs =
        serde_json::from_value(value.clone()).context("malformed public inputs")?;
    inputs.validate(hasher.domain())?;

    let claimed_hex = match claimed_override {
        Some(hex) => hex.to_string(),
        None => value
            .get("proof_commitment")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("no proof_commitment in document and no --commitment given"))?
            .to_string(),
    };
    let claimed = ProofCommitment::parse_hex(&claimed_hex)?;
    Ok((verify_commitment(hasher, &inputs, &claimed), claimed))
}

/// Recompute a root from one leaf and its path. Accepts a bare path array
/// or an object with a `path` field.
pub fn check_inclusion(
    hasher: &dyn FieldHasher,
    account: &str,
    amount: u64,
    path_json: &str,
    root_hex: &str,
) -> Result<bool> {
    let root = hasher.domain().parse_element("root", root_hex)?;
    let path_json = match serde_json::from_str::<Value>(path_json) {
        Ok(Value::Object(obj)) => match obj.get("path") {
            Some(path) => path.to_string(),
            None => return Err(anyhow!("path document has no \"path\" field")),
        },
        _ => path_json.to_string(),
    };
    let path = parse_sibling_path(hasher.domain(), &path_json)?;
    Ok(verify_inclusion(hasher, account, amount, &path, &root)?)
}

fn cmd_commitment(hasher: &dyn FieldHasher, doc: &str, claimed: Option<&str>) -> Result<u8> {
    let (check, claimed) = check_commitment(hasher, doc, claimed)?;
    if check.is_valid {
        println!("OK: commitment matches {claimed}");
        Ok(crate::EXIT_OK)
    } else {
        println!(
            "FAIL: commitment mismatch: claimed {claimed}, recomputed {}",
            check.expected
        );
        Ok(crate::EXIT_FAILURE)
    }
}

fn cmd_inclusion(
    hasher: &dyn FieldHasher,
    account: &str,
    amount: u64,
    path_json: &str,
    root_hex: &str,
) -> Result<u8> {
    if check_inclusion(hasher, account, amount, path_json, root_hex)? {
        println!("OK: {account} is included under root {root_hex}");
        Ok(crate::EXIT_OK)
    } else {
        println!("FAIL: {account} with amount {amount} is not included under root {root_hex}");
        Ok(crate::EXIT_FAILURE)
    }
}
