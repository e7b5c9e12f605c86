//! Operator tool for the vote ledger.
//!
//! `init` creates the genesis chain file at first deployment, `verify`
//! audits an existing chain's hashes and links, and `stats` prints the
//! public counts.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use ballot_ledger::{AnonymousTally, VoteLedger};
use ballot_node::{init_logging, LogFormat, NodeConfig};
use ballot_store::ChainStore;
use ballot_store_file::{FileChainStore, FileTallyStore};

#[derive(Parser)]
#[command(name = "ballot-daemon", about = "Vote ledger operator tool")]
struct Cli {
    /// Data directory holding the chain and tally files
    /// (defaults to the config file's value, then "./ballot_data").
    #[arg(long, env = "BALLOT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "BALLOT_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON instead of human-readable lines.
    #[arg(long, env = "BALLOT_LOG_JSON")]
    log_json: bool,

    /// Path to a TOML configuration file. If provided, file settings are
    /// used as the base; CLI flags override the data directory.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create the genesis chain file. Refuses to overwrite an existing chain.
    Init,
    /// Audit the persisted chain: recompute every hash, check every link.
    Verify,
    /// Print total participation and per-party ballot counts.
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Human
    };
    init_logging(format, &cli.log_level);

    let mut config = match &cli.config {
        Some(path) => NodeConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => NodeConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }

    match cli.command {
        Command::Init => init(&config),
        Command::Verify => verify(&config),
        Command::Stats => stats(&config),
    }
}

fn init(config: &NodeConfig) -> anyhow::Result<()> {
    let path = config.chain_path();
    let store = FileChainStore::new(&path);
    if store.load().context("reading existing chain")?.is_some() {
        bail!("chain file already exists at {}", path.display());
    }
    let ledger = VoteLedger::open(Box::new(store), config.block_capacity)?;
    println!("Genesis chain created at {}", path.display());
    println!("Genesis block hash: {}", ledger.latest_hash());
    Ok(())
}

fn verify(config: &NodeConfig) -> anyhow::Result<()> {
    let path = config.chain_path();
    let store = FileChainStore::new(&path);
    let Some(blocks) = store.load().context("reading chain")? else {
        bail!("no chain file at {}", path.display());
    };
    let records: u64 = blocks.iter().map(|b| b.records.len() as u64).sum();
    ballot_chain::integrity::verify_blocks(&blocks)
        .with_context(|| format!("chain at {} failed verification", path.display()))?;
    println!(
        "Chain OK: {} blocks, {} participation records, tail hash {}",
        blocks.len(),
        records,
        blocks.last().map(|b| b.hash.to_string()).unwrap_or_default()
    );
    Ok(())
}

fn stats(config: &NodeConfig) -> anyhow::Result<()> {
    let ledger = VoteLedger::open(
        Box::new(FileChainStore::new(config.chain_path())),
        config.block_capacity,
    )?;
    let tally = AnonymousTally::new(Box::new(FileTallyStore::new(config.tally_path())));

    println!("Total votes: {}", ledger.count());
    println!("Tallied ballots: {}", tally.total()?);
    for (code, count) in tally.count_by_party()? {
        let name = config
            .parties
            .iter()
            .find(|p| p.code == code.as_str())
            .map(|p| p.name.as_str())
            .unwrap_or("unknown party");
        println!("  {code} ({name}): {count}");
    }
    Ok(())
}
