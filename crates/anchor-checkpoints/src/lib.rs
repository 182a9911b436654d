//! # anchor-checkpoints — Checkpoint trust anchors and sync progress.
//!
//! This crate supplies the validation engine with a yes/no veto for blocks at
//! checkpointed heights and a progress number for status displays:
//! - [`CheckpointDataset`] — immutable per-network table of trusted
//!   `(height, hash)` pairs plus sync-rate metadata
//! - [`NetworkSelector`] — owns the datasets, picks one per network
//! - [`CheckpointValidator`] — `check_block` and `total_blocks_estimate`
//! - [`LastCheckpointLocator`] — deepest checkpoint present in the local
//!   block index, and the reorg floor it implies
//! - [`ProgressEstimator`] — heuristic verification progress in `[0, 1]`
//!
//! Nothing here blocks, allocates per call, or mutates shared state. All
//! types borrow the dataset immutably and are safe to share across threads.

pub mod checkpoint;
pub mod data;
pub mod dataset;
pub mod locator;
pub mod policy;
pub mod progress;
pub mod selector;

pub use checkpoint::CheckpointValidator;
pub use dataset::{CheckpointDataset, CheckpointEntry};
pub use locator::LastCheckpointLocator;
pub use policy::EnforcementPolicy;
pub use progress::{clamp_progress, ProgressEstimator, VerificationWork};
pub use selector::NetworkSelector;

use anchor_core::error::BlockError;
use anchor_core::traits::BlockIndexLookup;
use anchor_core::types::{BlockIndexEntry, Hash256};

/// All checkpoint operations bound to one dataset and one policy.
#[derive(Clone, Copy, Debug)]
pub struct Checkpoints<'a> {
    dataset: &'a CheckpointDataset,
    policy: EnforcementPolicy,
}

impl<'a> Checkpoints<'a> {
    pub fn new(dataset: &'a CheckpointDataset, policy: EnforcementPolicy) -> Self {
        Self { dataset, policy }
    }

    pub fn dataset(&self) -> &'a CheckpointDataset {
        self.dataset
    }

    pub fn policy(&self) -> EnforcementPolicy {
        self.policy
    }

    pub fn validator(&self) -> CheckpointValidator<'a> {
        CheckpointValidator::new(self.dataset, self.policy)
    }

    pub fn locator(&self) -> LastCheckpointLocator<'a> {
        LastCheckpointLocator::new(self.dataset, self.policy)
    }

    /// Progress estimator on the system clock.
    ///
    /// Reads the active network's dataset regardless of the enforcement
    /// policy, so testnet progress still has metadata to work from.
    pub fn estimator(&self) -> ProgressEstimator<'a> {
        ProgressEstimator::new(self.dataset)
    }

    /// See [`CheckpointValidator::check_block`].
    pub fn check_block(&self, height: u64, hash: &Hash256) -> bool {
        self.validator().check_block(height, hash)
    }

    /// See [`CheckpointValidator::check_checkpoint`].
    pub fn check_checkpoint(&self, height: u64, hash: &Hash256) -> Result<(), BlockError> {
        self.validator().check_checkpoint(height, hash)
    }

    /// See [`CheckpointValidator::total_blocks_estimate`].
    pub fn total_blocks_estimate(&self) -> u64 {
        self.validator().total_blocks_estimate()
    }

    /// See [`LastCheckpointLocator::find_last_checkpoint`].
    pub fn find_last_checkpoint<'i, I>(&self, index: &'i I) -> Option<&'i BlockIndexEntry>
    where
        I: BlockIndexLookup + ?Sized,
    {
        self.locator().find_last_checkpoint(index)
    }

    /// See [`LastCheckpointLocator::check_reorg`].
    pub fn check_reorg<I>(&self, fork_height: u64, index: &I) -> Result<(), BlockError>
    where
        I: BlockIndexLookup + ?Sized,
    {
        self.locator().check_reorg(fork_height, index)
    }

    /// See [`ProgressEstimator::estimate_progress`].
    pub fn estimate_progress(&self, entry: Option<&BlockIndexEntry>) -> f64 {
        self.estimator().estimate_progress(entry)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use anchor_core::constants::NetworkType;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn components_are_shareable_across_threads() {
        assert_send_sync::<CheckpointDataset>();
        assert_send_sync::<NetworkSelector>();
        assert_send_sync::<Checkpoints<'static>>();
        assert_send_sync::<CheckpointValidator<'static>>();
        assert_send_sync::<LastCheckpointLocator<'static>>();
        assert_send_sync::<ProgressEstimator<'static>>();
    }

    #[test]
    fn facade_delegates_to_components() {
        let selector = NetworkSelector::builtin().unwrap();
        let cp = selector.checkpoints(EnforcementPolicy::default());
        let tip = *cp.dataset().get(25890).unwrap();

        assert!(cp.check_block(25890, &tip));
        assert!(!cp.check_block(25890, &Hash256::ZERO));
        assert_eq!(cp.total_blocks_estimate(), 25890);
        assert_eq!(cp.estimate_progress(None), 0.0);

        let entry = BlockIndexEntry {
            height: 25890,
            hash: tip,
            timestamp: 1_394_847_232,
            chain_tx_count: 80_219,
        };
        let index: HashMap<_, _> = [(tip, entry)].into_iter().collect();
        assert_eq!(cp.find_last_checkpoint(&index).map(|e| e.height), Some(25890));
        assert!(cp.check_reorg(25889, &index).is_err());
    }

    #[test]
    fn concurrent_readers_share_one_dataset() {
        let selector = NetworkSelector::builtin().unwrap();
        let cp = selector.checkpoints(EnforcementPolicy::for_network(NetworkType::Mainnet));
        let tip = *cp.dataset().get(25890).unwrap();

        std::thread::scope(|s| {
            let validator = s.spawn(|| {
                (0..1_000).all(|h| cp.check_block(h, &Hash256::ZERO) == cp.dataset().get(h).is_none())
            });
            let status = s.spawn(|| cp.estimate_progress(None));
            assert!(validator.join().unwrap());
            assert_eq!(status.join().unwrap(), 0.0);
        });
        assert!(cp.check_block(25890, &tip));
    }
}
