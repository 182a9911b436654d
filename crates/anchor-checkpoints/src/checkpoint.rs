//! Checkpoint verification.
//!
//! Verifies that blocks at checkpoint heights match the expected hash.
//!
//! # Attack vectors
//!
//! - **Long-range rewrite:** Without checkpoints an attacker with sufficient
//!   hash power could rewrite arbitrarily deep history. A block at a
//!   checkpointed height whose hash differs from the pinned one is rejected
//!   outright, however much work is built on top of it.
//!
//! - **Eclipse during initial sync:** A node fed a fake history by every peer
//!   it knows still refuses that history once it reaches the first checkpoint.
//!
//! - **Checkpoint spoofing:** The checkpoint list is compiled into the binary.
//!   An attacker would need to distribute a modified binary to exploit this,
//!   which is outside our threat model.
//!
//! # Usage
//!
//! The validation engine calls [`CheckpointValidator::check_block`] (or
//! [`CheckpointValidator::check_checkpoint`] to propagate a [`BlockError`])
//! inline for every block it connects. A rejection is final: the branch
//! containing that block is invalid forever, not merely less preferred.

use tracing::warn;

use anchor_core::error::BlockError;
use anchor_core::types::Hash256;

use crate::dataset::CheckpointDataset;
use crate::policy::EnforcementPolicy;

/// Answers "is this hash acceptable at this height?".
#[derive(Clone, Copy, Debug)]
pub struct CheckpointValidator<'a> {
    dataset: &'a CheckpointDataset,
    policy: EnforcementPolicy,
}

impl<'a> CheckpointValidator<'a> {
    pub fn new(dataset: &'a CheckpointDataset, policy: EnforcementPolicy) -> Self {
        Self { dataset, policy }
    }

    /// Whether `hash` is acceptable at `height`.
    ///
    /// Always `true` on the test network, when checkpoints are disabled, or
    /// when `height` is not checkpointed. Otherwise `true` exactly when
    /// `hash` equals the pinned hash.
    pub fn check_block(&self, height: u64, hash: &Hash256) -> bool {
        self.check_checkpoint(height, hash).is_ok()
    }

    /// Like [`check_block`](Self::check_block) but reports the mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::CheckpointMismatch`] when checkpoints are
    /// enforced and the hash does not match the checkpoint at `height`.
    pub fn check_checkpoint(&self, height: u64, hash: &Hash256) -> Result<(), BlockError> {
        if !self.policy.is_enforced() {
            return Ok(());
        }

        match self.dataset.get(height) {
            Some(expected) if expected != hash => {
                warn!(
                    "checkpoint mismatch at height {}: expected {}, got {}",
                    height, expected, hash
                );
                Err(BlockError::CheckpointMismatch {
                    height,
                    expected: *expected,
                    got: *hash,
                })
            }
            _ => Ok(()),
        }
    }

    /// Greatest checkpointed height, as a lower bound on the chain height
    /// before the real tip is known.
    ///
    /// Returns 0 when checkpoints are not enforced or the dataset is empty.
    /// Only a hint for progress displays, never authoritative.
    pub fn total_blocks_estimate(&self) -> u64 {
        if !self.policy.is_enforced() {
            return 0;
        }
        self.dataset.max_height().unwrap_or(0)
    }
}
