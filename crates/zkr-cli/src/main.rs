//! # zkr CLI entry point
//!
//! Parses command-line arguments, loads configuration, installs logging,
//! and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zkr_cli::entity::{run_entity_id, EntityIdArgs};
use zkr_cli::prove::{run_prove, ProveArgs};
use zkr_cli::status::{run_status, StatusArgs};
use zkr_cli::tree::{run_path, run_root, PathArgs, RootArgs};
use zkr_cli::verify::{run_verify, VerifyArgs};
use zkr_cli::{ZkrConfig, EXIT_FAILURE};

/// zkReserves CLI
///
/// Commits a private liability list to a Merkle root, classifies solvency
/// into a public band, binds the public inputs into a single commitment,
/// and lets anyone re-derive and check those values.
#[derive(Parser, Debug)]
#[command(name = "zkr", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the Merkle root, leaf count, and total of a liability list.
    Root(RootArgs),

    /// Print one account's inclusion path.
    Path(PathArgs),

    /// Generate public inputs and a proof commitment.
    Prove(ProveArgs),

    /// Verify a commitment or an inclusion path.
    Verify(VerifyArgs),

    /// Show lifecycle status of registry proof records.
    Status(StatusArgs),

    /// Derive a registry entity id.
    EntityId(EntityIdArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level. Logs go to stderr so
    // stdout carries only command output.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "zkr starting");

    let config = match ZkrConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let result = match &cli.command {
        Commands::Root(args) => run_root(args, &config),
        Commands::Path(args) => run_path(args, &config),
        Commands::Prove(args) => run_prove(args, &config),
        Commands::Verify(args) => run_verify(args, &config),
        Commands::Status(args) => run_status(args, &config),
        Commands::EntityId(args) => run_entity_id(args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
