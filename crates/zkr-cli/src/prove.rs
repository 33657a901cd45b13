//! # Prove Subcommand
//!
//! Runs the proof pipeline over a liability list and a set of reserve
//! balances, then prints the publishable document:
//!
//! ```json
//! {
//!   "entity_id": "0x6b72616b656e",
//!   "block_height": 880412,
//!   "liability_merkle_root": "0x53c6…",
//!   "reserve_ratio_band": 2,
//!   "proof_timestamp": 1768478400,
//!   "proof_commitment": "0x…"
//! }
//! ```
//!
//! Insolvency prints `INSOLVENT: …` and exits with code 2; nothing is
//! written to `--out`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use zkr_core::{EntityId, Timestamp};
use zkr_ledger::{generate_proof, ProofRequest};
use zkr_zkp::CommitmentProofSystem;

use crate::config::ZkrConfig;
use crate::tree::amount_policy;

/// Arguments for `zkr prove`.
#[derive(Args, Debug)]
pub struct ProveArgs {
    /// Liability list, one `account_id,amount` row per line.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Registry entity id (hex).
    #[arg(long)]
    pub entity_id: String,

    /// Reference block height the reserve balances were read at.
    #[arg(long)]
    pub block_height: u64,

    /// Reserve wallet balances, comma-separated, same unit as liabilities.
    #[arg(long, value_delimiter = ',', required = true)]
    pub reserves: Vec<u64>,

    /// Proof timestamp in unix seconds. Defaults to now.
    #[arg(long)]
    pub timestamp: Option<u64>,

    /// Also write the published document to this file.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Strip non-digit characters from amounts instead of rejecting them.
    #[arg(long)]
    pub lenient_amounts: bool,
}

/// Execute `zkr prove`.
pub fn run_prove(args: &ProveArgs, config: &ZkrConfig) -> Result<u8> {
    let prover = CommitmentProofSystem::new(config.hasher()?);
    let entity_id = EntityId::parse_hex(&args.entity_id)?;
    let timestamp = match args.timestamp {
        Some(secs) => Timestamp::from_unix_secs(secs)?,
        None => Timestamp::now(),
    };
    let text = crate::read_text(&args.csv)?;

    let request = ProofRequest {
        entity_id,
        block_height: args.block_height,
        liabilities_csv: &text,
        reserve_balances: &args.reserves,
        timestamp,
        amount_policy: amount_policy(args.lenient_amounts, config),
    };

    let output = match generate_proof(&prover, &request) {
        Ok(output) => output,
        Err(e) if e.is_insolvency() => {
            println!("INSOLVENT: {e}");
            return Ok(crate::EXIT_INSOLVENT);
        }
        Err(e) => return Err(e).context("proof generation failed"),
    };

    tracing::info!(
        leaf_count = output.liability.leaf_count,
        ratio_bps = output.ratio_bps,
        "private ratio (not published)"
    );

    let json = crate::to_json(&output.published())?;
    if let Some(out) = &args.out {
        std::fs::write(out, format!("{json}\n"))
            .with_context(|| format!("failed to write {}", out.display()))?;
    }
    println!("{json}");
    Ok(crate::EXIT_OK)
}
