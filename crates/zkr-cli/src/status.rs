//! # Status Subcommand
//!
//! Reads proof records from the configured registry and prints each
//! entity's lifecycle status, followed by an ecosystem health summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use zkr_core::{EntityId, ReserveBand, Timestamp};
use zkr_state::{
    EcosystemHealth, ExpiryPolicy, ProofStatus, RegistryConfig, RegistryEntry, RegistryReader,
};

use crate::config::ZkrConfig;

/// Arguments for `zkr status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Only show this entity (hex id).
    #[arg(long)]
    pub entity_id: Option<String>,

    /// Registry snapshot file. Overrides `registry.snapshot`.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Classify as of this unix time instead of now.
    #[arg(long)]
    pub now: Option<u64>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// One entity's classified record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityStatus {
    pub entity_id: EntityId,
    pub name: Option<String>,
    pub status: ProofStatus,
    pub band: ReserveBand,
    pub proof_timestamp: u64,
    pub expiry_timestamp: u64,
    pub days_until_expiry: u64,
    pub submission_count: u64,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    entities: Vec<EntityStatus>,
    health: EcosystemHealth,
    valid_percentage: u8,
}

/// Classify every entry at `now`.
pub fn classify_entries(
    entries: &[RegistryEntry],
    now: Timestamp,
    policy: &ExpiryPolicy,
) -> Vec<EntityStatus> {
    entries
        .iter()
        .map(|entry| EntityStatus {
            entity_id: entry.entity_id,
            name: entry.name.clone(),
            status: entry.record.status(now, policy),
            band: entry.record.band,
            proof_timestamp: entry.record.proof_timestamp,
            expiry_timestamp: entry.record.expiry_timestamp,
            days_until_expiry: entry.record.days_until_expiry(now),
            submission_count: entry.record.submission_count,
        })
        .collect()
}

/// Execute `zkr status`.
pub fn run_status(args: &StatusArgs, config: &ZkrConfig) -> Result<u8> {
    let registry_config = match &args.snapshot {
        Some(snapshot) => RegistryConfig {
            snapshot: Some(snapshot.clone()),
            ..config.registry.clone()
        },
        None => config.registry.clone(),
    };
    let reader = registry_config.open().context("cannot open registry")?;
    let now = match args.now {
        Some(secs) => Timestamp::from_unix_secs(secs)?,
        None => Timestamp::now(),
    };
    let policy = config.expiry_policy();

    let mut entries = reader.entries()?;
    if let Some(id) = &args.entity_id {
        let id = EntityId::parse_hex(id)?;
        entries.retain(|e| e.entity_id == id);
        if entries.is_empty() {
            println!("NOT FOUND: entity {id} is not registered");
            return Ok(crate::EXIT_FAILURE);
        }
    }

    let statuses = classify_entries(&entries, now, &policy);
    let health = EcosystemHealth::from_records(entries.iter().map(|e| &e.record), now, &policy);

    if args.json {
        let report = StatusReport {
            entities: statuses,
            valid_percentage: health.valid_percentage(),
            health,
        };
        println!("{}", crate::to_json(&report)?);
    } else {
        for s in &statuses {
            println!("{}", format_line(s));
        }
        println!(
            "Ecosystem: {}/{} entities with a valid proof ({}%), {} expiring, {} expired, {} never proven",
            health.valid(),
            health.total,
            health.valid_percentage(),
            health.expiring,
            health.expired,
            health.never_proven,
        );
    }
    Ok(crate::EXIT_OK)
}

fn format_line(s: &EntityStatus) -> String {
    let name = s.name.as_deref().unwrap_or("-");
    match s.status {
        ProofStatus::NeverProven => format!("{}  {name}  {}", s.entity_id, s.status),
        ProofStatus::Expired => format!("{}  {name}  {}  {}", s.entity_id, s.status, s.band),
        ProofStatus::Active | ProofStatus::Expiring => format!(
            "{}  {name}  {}  {}  expires in {} days",
            s.entity_id, s.status, s.band, s.days_until_expiry
        ),
    }
}
