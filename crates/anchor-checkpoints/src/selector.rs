//! Network → dataset selection.
//!
//! [`NetworkSelector`] owns one [`CheckpointDataset`] per network and lends
//! them out by reference. Selection is a plain match on an explicit
//! [`NetworkType`]; there is no process-wide "active network" to consult.

use tracing::info;

use anchor_core::constants::NetworkType;
use anchor_core::error::DatasetError;

use crate::dataset::CheckpointDataset;
use crate::policy::EnforcementPolicy;
use crate::Checkpoints;

/// Owner of the per-network checkpoint datasets.
#[derive(Clone, Debug)]
pub struct NetworkSelector {
    mainnet: CheckpointDataset,
    testnet: CheckpointDataset,
}

impl NetworkSelector {
    /// Build the compiled-in datasets for every supported network.
    ///
    /// # Errors
    ///
    /// Returns the [`DatasetError`] of the first compiled-in table that fails
    /// its integrity check. Callers must treat this as fatal at startup.
    pub fn builtin() -> Result<Self, DatasetError> {
        Ok(Self {
            mainnet: CheckpointDataset::mainnet()?,
            testnet: CheckpointDataset::testnet()?,
        })
    }

    /// Assemble a selector from explicit datasets.
    pub fn from_datasets(mainnet: CheckpointDataset, testnet: CheckpointDataset) -> Self {
        Self { mainnet, testnet }
    }

    /// Replace the mainnet dataset with an externally loaded one.
    pub fn with_mainnet_override(mut self, dataset: CheckpointDataset) -> Self {
        info!(
            "overriding mainnet checkpoints: {} entries, max height {:?}",
            dataset.len(),
            dataset.max_height()
        );
        self.mainnet = dataset;
        self
    }

    /// Dataset for `network`.
    pub fn select(&self, network: NetworkType) -> &CheckpointDataset {
        match network {
            NetworkType::Mainnet => &self.mainnet,
            NetworkType::Testnet => &self.testnet,
        }
    }

    /// Checkpoint operations bound to the dataset selected by `policy`.
    pub fn checkpoints(&self, policy: EnforcementPolicy) -> Checkpoints<'_> {
        Checkpoints::new(self.select(policy.network()), policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_core::types::Hash256;

    #[test]
    fn builtin_selects_per_network() {
        let selector = NetworkSelector::builtin().unwrap();
        assert_eq!(selector.select(NetworkType::Mainnet).max_height(), Some(25890));
        assert_eq!(selector.select(NetworkType::Testnet).max_height(), Some(35000));
    }

    #[test]
    fn selection_is_stable() {
        let selector = NetworkSelector::builtin().unwrap();
        let a = selector.select(NetworkType::Mainnet);
        let b = selector.select(NetworkType::Mainnet);
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn mainnet_override_replaces_only_mainnet() {
        let custom = CheckpointDataset::new([(7, Hash256([7; 32]))], 10, 20, 1.0).unwrap();
        let selector = NetworkSelector::builtin()
            .unwrap()
            .with_mainnet_override(custom.clone());

        assert_eq!(selector.select(NetworkType::Mainnet), &custom);
        assert_eq!(selector.select(NetworkType::Testnet).max_height(), Some(35000));
    }

    #[test]
    fn checkpoints_bind_policy_network() {
        let selector = NetworkSelector::builtin().unwrap();
        let cp = selector.checkpoints(EnforcementPolicy::for_network(NetworkType::Testnet));
        assert_eq!(cp.dataset().max_height(), Some(35000));
        assert_eq!(cp.policy().network(), NetworkType::Testnet);
    }
}
