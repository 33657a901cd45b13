//! # Root and Path Subcommands
//!
//! `zkr root` prints the liability commitment of a list. `zkr path` prints
//! one account's inclusion path in the JSON sibling-path format, ready for
//! `zkr verify inclusion`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use zkr_core::FieldElement;
use zkr_crypto::{FieldHasher, MerkleTree, SiblingPathEntry};
use zkr_ledger::{parse_liabilities, AmountPolicy, ParsedLiabilities};

use crate::config::ZkrConfig;

/// Arguments for `zkr root`.
#[derive(Args, Debug)]
pub struct RootArgs {
    /// Liability list, one `account_id,amount` row per line.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Strip non-digit characters from amounts instead of rejecting them.
    #[arg(long)]
    pub lenient_amounts: bool,
}

/// Arguments for `zkr path`.
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Liability list, one `account_id,amount` row per line.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Account to build the path for (first matching row).
    #[arg(long, required_unless_present = "index")]
    pub account: Option<String>,

    /// Zero-based row index to build the path for.
    #[arg(long, conflicts_with = "account")]
    pub index: Option<usize>,

    /// Strip non-digit characters from amounts instead of rejecting them.
    #[arg(long)]
    pub lenient_amounts: bool,
}

/// One account's inclusion proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InclusionProof {
    pub account_id: String,
    pub amount: u64,
    pub leaf_index: usize,
    pub root: FieldElement,
    pub path: Vec<SiblingPathEntry>,
}

pub(crate) fn amount_policy(lenient: bool, config: &ZkrConfig) -> AmountPolicy {
    if lenient {
        AmountPolicy::StripNonDigits
    } else {
        config.parser.amount_policy
    }
}

/// Parse a liability list and build its tree.
pub fn build_tree(
    hasher: &dyn FieldHasher,
    text: &str,
    policy: AmountPolicy,
) -> Result<(ParsedLiabilities, MerkleTree)> {
    let parsed = parse_liabilities(text, policy).context("invalid liability list")?;
    let tree = MerkleTree::from_records(hasher, &parsed.records)?;
    Ok((parsed, tree))
}

/// Build the inclusion proof for the row selected by `account` or `index`.
pub fn inclusion_proof(
    parsed: &ParsedLiabilities,
    tree: &MerkleTree,
    account: Option<&str>,
    index: Option<usize>,
) -> Result<InclusionProof> {
    let leaf_index = match (account, index) {
        (_, Some(i)) => i,
        (Some(account), None) => match parsed.records.iter().position(|r| r.account_id == account) {
            Some(i) => i,
            None => bail!("account {account:?} not found in liability list"),
        },
        (None, None) => bail!("either --account or --index is required"),
    };
    let path = tree.inclusion_path(leaf_index)?;
    let record = &parsed.records[leaf_index];
    Ok(InclusionProof {
        account_id: record.account_id.clone(),
        amount: record.amount,
        leaf_index,
        root: tree.root(),
        path,
    })
}

/// Execute `zkr root`.
pub fn run_root(args: &RootArgs, config: &ZkrConfig) -> Result<u8> {
    let hasher = config.hasher()?;
    let text = crate::read_text(&args.csv)?;
    let (parsed, tree) = build_tree(
        hasher.as_ref(),
        &text,
        amount_policy(args.lenient_amounts, config),
    )?;
    let commitment = tree.liability_commitment(parsed.total_liability);
    println!("{}", crate::to_json(&commitment)?);
    Ok(crate::EXIT_OK)
}

/// Execute `zkr path`.
pub fn run_path(args: &PathArgs, config: &ZkrConfig) -> Result<u8> {
    let hasher = config.hasher()?;
    let text = crate::read_text(&args.csv)?;
    let (parsed, tree) = build_tree(
        hasher.as_ref(),
        &text,
        amount_policy(args.lenient_amounts, config),
    )?;
    let proof = inclusion_proof(&parsed, &tree, args.account.as_deref(), args.index)?;
    println!("{}", crate::to_json(&proof)?);
    Ok(crate::EXIT_OK)
}
