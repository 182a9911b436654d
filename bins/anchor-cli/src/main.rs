//! anchor-cli — Inspect and exercise the checkpoint subsystem.
//!
//! Loads the node configuration, builds the checkpoint datasets once, and
//! answers checkpoint queries against them and against a JSON block-index
//! snapshot.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use anchor_checkpoints::{Checkpoints, NetworkSelector};
use anchor_core::constants::NetworkType;
use anchor_core::types::Hash256;
use anchor_node_lib::{NodeConfig, SharedBlockIndex, SyncStatus};

/// Checkpoint trust anchors and verification progress.
#[derive(Parser, Debug)]
#[command(name = "anchor-cli", version, about = "Checkpoint trust anchors and sync progress")]
struct Cli {
    #[command(flatten)]
    opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    /// Config file (TOML, JSON, YAML; format by extension)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the test network (checkpoints are never enforced there)
    #[arg(long, global = true)]
    testnet: bool,

    /// Disable checkpoint enforcement
    #[arg(long, global = true)]
    no_checkpoints: bool,

    /// JSON dataset replacing the compiled-in mainnet checkpoints
    #[arg(long, global = true)]
    checkpoints_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format ("text" or "json")
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the active checkpoint dataset.
    List,
    /// Check a block hash against the checkpoint at a height.
    Check {
        height: u64,
        /// Block hash, 64 hex digits with optional 0x prefix
        hash: String,
    },
    /// Print the total blocks estimate.
    Total,
    /// Find the deepest checkpoint present in a block-index snapshot.
    LastCheckpoint {
        /// JSON array of block index entries
        index: PathBuf,
    },
    /// Print checkpoint and verification status for a block-index snapshot.
    Status {
        /// JSON array of block index entries
        index: PathBuf,
    },
}

impl GlobalOpts {
    /// Layer command-line flags over the loaded configuration.
    fn into_config(self) -> Result<NodeConfig> {
        let mut config = NodeConfig::load(self.config.as_deref())
            .context("failed to load configuration")?;

        if self.testnet {
            config.network = NetworkType::Testnet;
        }
        if self.no_checkpoints {
            config.checkpoints_enabled = false;
        }
        if let Some(path) = self.checkpoints_file {
            config.checkpoints_file = Some(path);
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match cli.opts.into_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    };

    init_logging(&config.log_level, &config.log_format);

    match run(&config, cli.command) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("{e:#}");
            process::exit(1);
        }
    }
}

/// Execute one command. `Ok(false)` means a checkpoint rejection.
fn run(config: &NodeConfig, command: Commands) -> Result<bool> {
    info!("network: {}", config.network);
    info!("checkpoints_enabled: {}", config.checkpoints_enabled);
    info!("data_dir: {:?}", config.network_data_dir());

    // A dataset that fails its integrity check aborts startup here.
    let selector: NetworkSelector = config
        .load_selector()
        .context("checkpoint dataset failed integrity check")?;
    let checkpoints = selector.checkpoints(config.policy());

    match command {
        Commands::List => list(&checkpoints),
        Commands::Check { height, hash } => {
            let hash = Hash256::from_hex(&hash).context("invalid block hash")?;
            return Ok(check(&checkpoints, height, &hash));
        }
        Commands::Total => println!("{}", checkpoints.total_blocks_estimate()),
        Commands::LastCheckpoint { index } => {
            let index = load_index(&index)?;
            match index.with_read(|map| checkpoints.find_last_checkpoint(map).cloned()) {
                Some(entry) => println!("{} {}", entry.height, entry.hash),
                None => println!("none"),
            }
        }
        Commands::Status { index } => {
            let index = load_index(&index)?;
            let estimator = checkpoints.estimator();
            let status = SyncStatus::collect(&checkpoints, &estimator, &index);
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(true)
}

fn list(checkpoints: &Checkpoints<'_>) {
    let dataset = checkpoints.dataset();
    for entry in dataset.entries() {
        println!("{:>8} {}", entry.height, entry.block_hash);
    }

    let ts = dataset.last_checkpoint_timestamp();
    let when = i64::try_from(ts)
        .ok()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| ts.to_string());
    println!("last checkpoint time: {when}");
    println!("last checkpoint txs:  {}", dataset.last_checkpoint_tx_count());
    println!("estimated txs/day:    {}", dataset.estimated_tx_per_day());
    println!("enforced:             {}", checkpoints.policy().is_enforced());
}

fn check(checkpoints: &Checkpoints<'_>, height: u64, hash: &Hash256) -> bool {
    match checkpoints.check_checkpoint(height, hash) {
        Ok(()) => {
            println!("accepted");
            true
        }
        Err(e) => {
            println!("rejected: {e}");
            false
        }
    }
}

fn load_index(path: &Path) -> Result<SharedBlockIndex> {
    SharedBlockIndex::load_json(path)
        .with_context(|| format!("failed to load block index {}", path.display()))
}

/// Install the global subscriber. `RUST_LOG` wins over `level_str`.
///
/// `format = "json"` emits one JSON object per event; anything else is
/// plain text. Events go to stderr, stdout carries command output only.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
