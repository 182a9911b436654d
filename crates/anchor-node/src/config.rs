//! Node configuration for the Anchor checkpoint subsystem.
//!
//! Provides [`NodeConfig`] with defaults for network, checkpoint enforcement,
//! data directory and logging. [`NodeConfig::load`] layers a config file and
//! `ANCHOR_*` environment variables over the defaults; command-line flags are
//! applied on top by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use anchor_checkpoints::{CheckpointDataset, EnforcementPolicy, NetworkSelector};
use anchor_core::constants::{NetworkType, DEFAULT_CHECKPOINTS_ENABLED};
use anchor_core::error::ConfigError;

use crate::error::NodeError;

/// Prefix for environment overrides, e.g. `ANCHOR_CHECKPOINTS_ENABLED=false`.
pub const ENV_PREFIX: &str = "ANCHOR";

/// Configuration for the checkpoint subsystem of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Network whose checkpoint dataset is active.
    pub network: NetworkType,
    /// Enforce checkpoints. Has no effect on testnet, which never enforces.
    pub checkpoints_enabled: bool,
    /// JSON dataset replacing the compiled-in mainnet checkpoints.
    pub checkpoints_file: Option<PathBuf>,
    /// Root directory for all persistent data.
    pub data_dir: PathBuf,
    /// Log level filter string (e.g. "info", "debug", "anchor_checkpoints=trace").
    pub log_level: String,
    /// Log output format: "text" or "json".
    pub log_format: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("anchor");

        Self {
            network: NetworkType::default(),
            checkpoints_enabled: DEFAULT_CHECKPOINTS_ENABLED,
            checkpoints_file: None,
            data_dir,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl NodeConfig {
    /// Load configuration: defaults, then `path` (format chosen by file
    /// extension), then `ANCHOR_*` environment variables.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Source`] if the file is missing or unreadable, or a
    /// value has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// [`load`](Self::load) reading `ANCHOR_*` variables from `env` instead
    /// of the process environment when it is `Some`.
    fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .and_then(|c| c.try_deserialize::<NodeConfig>())
            .map_err(|e| ConfigError::Source(e.to_string()))
    }

    /// Enforcement policy captured from this configuration.
    pub fn policy(&self) -> EnforcementPolicy {
        EnforcementPolicy::new(self.network, self.checkpoints_enabled)
    }

    /// Per-network data directory.
    pub fn network_data_dir(&self) -> PathBuf {
        self.data_dir.join(self.network.data_dir_suffix())
    }

    /// Build the dataset selector, applying `checkpoints_file` if set.
    ///
    /// # Errors
    ///
    /// Any [`DatasetError`](anchor_core::error::DatasetError) from the
    /// compiled-in tables or the override file, or an I/O error reading it.
    /// All of them are fatal at startup.
    pub fn load_selector(&self) -> Result<NetworkSelector, NodeError> {
        let selector = NetworkSelector::builtin()?;
        let Some(path) = &self.checkpoints_file else {
            return Ok(selector);
        };

        let json = std::fs::read_to_string(path).map_err(|source| NodeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = CheckpointDataset::from_json_str(&json)?;
        info!("loaded checkpoints from {}", path.display());
        Ok(selector.with_mainnet_override(dataset))
    }
}
