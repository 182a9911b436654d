//! Enforcement policy captured once at construction.

use anchor_core::constants::{NetworkType, DEFAULT_CHECKPOINTS_ENABLED};

/// Whether checkpoints are enforced, decided once from the active network
/// and the "checkpoints enabled" configuration flag.
///
/// # Examples
///
/// ```
/// use anchor_checkpoints::EnforcementPolicy;
/// use anchor_core::constants::NetworkType;
///
/// assert!(EnforcementPolicy::new(NetworkType::Mainnet, true).is_enforced());
/// assert!(!EnforcementPolicy::new(NetworkType::Mainnet, false).is_enforced());
/// assert!(!EnforcementPolicy::new(NetworkType::Testnet, true).is_enforced());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnforcementPolicy {
    network: NetworkType,
    checkpoints_enabled: bool,
}

impl EnforcementPolicy {
    pub fn new(network: NetworkType, checkpoints_enabled: bool) -> Self {
        Self {
            network,
            checkpoints_enabled,
        }
    }

    /// Default policy for `network` with checkpoints enabled.
    pub fn for_network(network: NetworkType) -> Self {
        Self::new(network, DEFAULT_CHECKPOINTS_ENABLED)
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    pub fn checkpoints_enabled(&self) -> bool {
        self.checkpoints_enabled
    }

    /// True only on a non-test network with checkpoints enabled.
    pub fn is_enforced(&self) -> bool {
        !self.network.is_test_network() && self.checkpoints_enabled
    }
}

impl Default for EnforcementPolicy {
    fn default() -> Self {
        Self::for_network(NetworkType::default())
    }
}
