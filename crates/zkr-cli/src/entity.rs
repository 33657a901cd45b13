//! # Entity Id Subcommand
//!
//! Derives the registry id an entity registers under:
//! `Hash2(encode(name), registrant)`.

use anyhow::Result;
use clap::Args;

use zkr_crypto::compute_entity_id;

use crate::config::ZkrConfig;

/// Arguments for `zkr entity-id`.
#[derive(Args, Debug)]
pub struct EntityIdArgs {
    /// Entity display name. Surrounding whitespace is ignored.
    #[arg(long)]
    pub name: String,

    /// Registering account address (hex).
    #[arg(long)]
    pub registrant: String,
}

/// Execute `zkr entity-id`.
pub fn run_entity_id(args: &EntityIdArgs, config: &ZkrConfig) -> Result<u8> {
    let hasher = config.hasher()?;
    let registrant = hasher.domain().parse_element("registrant", &args.registrant)?;
    let id = compute_entity_id(hasher.as_ref(), &args.name, &registrant);
    println!("{id}");
    Ok(crate::EXIT_OK)
}
