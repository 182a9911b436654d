//! Protocol constants and network selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Seconds in one day; the unit of `estimated_tx_per_day`.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// How many times slower transactions after the last checkpoint are expected
/// to verify compared with those before it.
///
/// Tuned empirically: reindexing from a fast disk on a slow CPU can approach
/// 20, downloading over a slow link on a fast multicore machine is close to 1.
/// Only the progress estimate uses it.
pub const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

/// Whether checkpoint enforcement is on when nothing configures it.
pub const DEFAULT_CHECKPOINTS_ENABLED: bool = true;

/// Network type: Mainnet or Testnet.
///
/// Selects the checkpoint dataset and whether checkpoints are enforced at all.
/// Testnet never enforces checkpoints.
///
/// # Examples
///
/// ```
/// use anchor_core::constants::NetworkType;
/// let net = NetworkType::default();
/// assert_eq!(net, NetworkType::Mainnet);
/// assert!(!net.is_test_network());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Production network.
    #[default]
    Mainnet,
    /// Public test network. Checkpoints are never enforced here.
    Testnet,
}

impl NetworkType {
    /// True for networks on which checkpoints are not enforced.
    pub fn is_test_network(&self) -> bool {
        matches!(self, Self::Testnet)
    }

    /// Short lowercase name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }

    /// Subdirectory name appended to the base data directory path.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_core::constants::NetworkType;
    /// assert_eq!(NetworkType::Testnet.data_dir_suffix(), "testnet");
    /// ```
    pub fn data_dir_suffix(&self) -> &'static str {
        self.name()
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(Self::Mainnet),
            "test" | "testnet" => Ok(Self::Testnet),
            _ => Err(ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}
