//! Sync status report for status and UI layers.

use serde::Serialize;
use tracing::debug;

use anchor_checkpoints::{clamp_progress, Checkpoints, ProgressEstimator};
use anchor_core::constants::NetworkType;
use anchor_core::types::Hash256;

use crate::index::{tip_of, SharedBlockIndex};

/// A checkpoint block present in the local index.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CheckpointRef {
    pub height: u64,
    pub hash: Hash256,
}

/// Snapshot of checkpoint and verification state.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SyncStatus {
    pub network: NetworkType,
    pub checkpoints_enabled: bool,
    /// Lower bound on chain height from the checkpoint table; 0 when not enforced.
    pub total_blocks_estimate: u64,
    /// Deepest checkpoint already in the local index.
    pub last_checkpoint: Option<CheckpointRef>,
    pub tip_height: Option<u64>,
    /// Estimated verification progress, clamped to `[0, 1]`.
    pub verification_progress: f64,
}

impl SyncStatus {
    /// Collect the status. The checkpoint scan and tip lookup share one read
    /// lock on `index`.
    pub fn collect(
        checkpoints: &Checkpoints<'_>,
        estimator: &ProgressEstimator<'_>,
        index: &SharedBlockIndex,
    ) -> Self {
        let (last_checkpoint, tip) = index.with_read(|map| {
            let last = checkpoints.find_last_checkpoint(map).map(|e| CheckpointRef {
                height: e.height,
                hash: e.hash,
            });
            (last, tip_of(map).cloned())
        });

        let raw = estimator.estimate_progress(tip.as_ref());
        debug!("raw verification progress {raw}");

        let policy = checkpoints.policy();
        Self {
            network: policy.network(),
            checkpoints_enabled: policy.checkpoints_enabled(),
            total_blocks_estimate: checkpoints.total_blocks_estimate(),
            last_checkpoint,
            tip_height: tip.map(|e| e.height),
            verification_progress: clamp_progress(raw),
        }
    }
}
