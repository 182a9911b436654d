//! Deepest locally-present checkpoint, and the reorg floor it implies.
//!
//! The validation engine uses [`LastCheckpointLocator::find_last_checkpoint`]
//! at startup and before accepting a reorganization: blocks at or below the
//! deepest checkpoint it already has are never disconnected.

use tracing::{debug, warn};

use anchor_core::error::BlockError;
use anchor_core::traits::BlockIndexLookup;
use anchor_core::types::BlockIndexEntry;

use crate::dataset::CheckpointDataset;
use crate::policy::EnforcementPolicy;

/// Finds the highest checkpoint whose block is already in the local index.
#[derive(Clone, Copy, Debug)]
pub struct LastCheckpointLocator<'a> {
    dataset: &'a CheckpointDataset,
    policy: EnforcementPolicy,
}

impl<'a> LastCheckpointLocator<'a> {
    pub fn new(dataset: &'a CheckpointDataset, policy: EnforcementPolicy) -> Self {
        Self { dataset, policy }
    }

    /// Local index entry of the highest checkpoint present in `index`.
    ///
    /// Scans checkpoints from the highest height down, so the deepest trust
    /// anchor wins even when lower ones are also present. Returns `None` when
    /// checkpoints are not enforced or no checkpoint hash is in the index.
    ///
    /// The scan is one logical read of `index`; the caller holds any lock
    /// guarding it for the duration of the call.
    pub fn find_last_checkpoint<'i, I>(&self, index: &'i I) -> Option<&'i BlockIndexEntry>
    where
        I: BlockIndexLookup + ?Sized,
    {
        if !self.policy.is_enforced() {
            return None;
        }

        let found = self
            .dataset
            .entries()
            .rev()
            .find_map(|cp| index.lookup(&cp.block_hash));
        if let Some(entry) = found {
            debug!("last local checkpoint: height={} hash={}", entry.height, entry.hash);
        }
        found
    }

    /// Reject a reorganization that would disconnect a local checkpoint.
    ///
    /// `fork_height` is the height of the last block both branches share.
    /// Blocks above it are disconnected, so the reorg is refused when the
    /// deepest local checkpoint sits above the fork point.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::ReorgBelowCheckpoint`] when checkpoints are
    /// enforced and the reorg would unwind past the last local checkpoint.
    pub fn check_reorg<I>(&self, fork_height: u64, index: &I) -> Result<(), BlockError>
    where
        I: BlockIndexLookup + ?Sized,
    {
        match self.find_last_checkpoint(index) {
            Some(cp) if fork_height < cp.height => {
                warn!(
                    "rejecting reorg from fork point {} past checkpoint at {}",
                    fork_height, cp.height
                );
                Err(BlockError::ReorgBelowCheckpoint {
                    fork_height,
                    checkpoint_height: cp.height,
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use anchor_core::constants::NetworkType;
    use anchor_core::types::Hash256;

    fn test_dataset() -> CheckpointDataset {
        CheckpointDataset::new(
            [(10, Hash256([0x10; 32])), (20, Hash256([0x20; 32])), (30, Hash256([0x30; 32]))],
            0,
            0,
            1.0,
        )
        .unwrap()
    }

    fn entry(height: u64, seed: u8) -> BlockIndexEntry {
        BlockIndexEntry {
            height,
            hash: Hash256([seed; 32]),
            timestamp: 1_000 + height,
            chain_tx_count: height,
        }
    }

    fn index_of(entries: &[BlockIndexEntry]) -> HashMap<Hash256, BlockIndexEntry> {
        entries.iter().map(|e| (e.hash, e.clone())).collect()
    }

    fn enforced() -> EnforcementPolicy {
        EnforcementPolicy::new(NetworkType::Mainnet, true)
    }

    // ------------------------------------------------------------------
    // find_last_checkpoint
    // ------------------------------------------------------------------

    #[test]
    fn highest_present_checkpoint_wins() {
        let ds = test_dataset();
        let index = index_of(&[entry(10, 0x10), entry(20, 0x20), entry(25, 0x25)]);
        let found = LastCheckpointLocator::new(&ds, enforced()).find_last_checkpoint(&index);
        assert_eq!(found.map(|e| e.height), Some(20));
    }

    #[test]
    fn gaps_in_local_index_are_skipped() {
        let ds = test_dataset();
        let index = index_of(&[entry(10, 0x10), entry(30, 0x30)]);
        let found = LastCheckpointLocator::new(&ds, enforced()).find_last_checkpoint(&index);
        assert_eq!(found.map(|e| e.height), Some(30));
    }

    #[test]
    fn returns_the_local_entry_itself() {
        let ds = test_dataset();
        let index = index_of(&[entry(10, 0x10)]);
        let found = LastCheckpointLocator::new(&ds, enforced()).find_last_checkpoint(&index);
        assert!(std::ptr::eq(found.unwrap(), &index[&Hash256([0x10; 32])]));
    }

    #[test]
    fn none_when_no_checkpoint_is_local() {
        let ds = test_dataset();
        let index = index_of(&[entry(11, 0x11), entry(21, 0x21)]);
        assert!(LastCheckpointLocator::new(&ds, enforced()).find_last_checkpoint(&index).is_none());

        let empty: HashMap<Hash256, BlockIndexEntry> = HashMap::new();
        assert!(LastCheckpointLocator::new(&ds, enforced()).find_last_checkpoint(&empty).is_none());
    }

    #[test]
    fn none_when_not_enforced() {
        let ds = test_dataset();
        let index = index_of(&[entry(30, 0x30)]);
        for policy in [
            EnforcementPolicy::new(NetworkType::Testnet, true),
            EnforcementPolicy::new(NetworkType::Mainnet, false),
        ] {
            assert!(LastCheckpointLocator::new(&ds, policy).find_last_checkpoint(&index).is_none());
        }
    }

    // ------------------------------------------------------------------
    // check_reorg
    // ------------------------------------------------------------------

    #[test]
    fn reorg_above_last_checkpoint_is_allowed() {
        let ds = test_dataset();
        let index = index_of(&[entry(20, 0x20)]);
        let locator = LastCheckpointLocator::new(&ds, enforced());
        assert!(locator.check_reorg(20, &index).is_ok());
        assert!(locator.check_reorg(100, &index).is_ok());
    }

    #[test]
    fn reorg_past_last_checkpoint_is_rejected() {
        let ds = test_dataset();
        let index = index_of(&[entry(20, 0x20)]);
        let err = LastCheckpointLocator::new(&ds, enforced())
            .check_reorg(19, &index)
            .unwrap_err();
        assert_eq!(
            err,
            BlockError::ReorgBelowCheckpoint {
                fork_height: 19,
                checkpoint_height: 20,
            }
        );
    }

    #[test]
    fn reorg_unrestricted_without_local_checkpoint_or_enforcement() {
        let ds = test_dataset();
        let none_local = index_of(&[entry(5, 0x05)]);
        assert!(LastCheckpointLocator::new(&ds, enforced()).check_reorg(0, &none_local).is_ok());

        let index = index_of(&[entry(30, 0x30)]);
        let disabled = EnforcementPolicy::new(NetworkType::Mainnet, false);
        assert!(LastCheckpointLocator::new(&ds, disabled).check_reorg(0, &index).is_ok());
    }
}
