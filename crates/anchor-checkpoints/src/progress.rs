//! Verification-progress estimation.
//!
//! Work is counted per transaction: 1.0 for each transaction up to the last
//! checkpoint, and [`SIGCHECK_VERIFICATION_FACTOR`] for each one after it.
//! Transactions the node has not seen yet are extrapolated from the wall
//! clock and the dataset's expected transactions per day.
//!
//! The result is a display heuristic. Clock skew can push the estimate
//! slightly outside `[0, 1]`; pass it through [`clamp_progress`] before
//! showing it.

use std::fmt;

use anchor_core::constants::{SECONDS_PER_DAY, SIGCHECK_VERIFICATION_FACTOR};
use anchor_core::types::BlockIndexEntry;

use crate::dataset::CheckpointDataset;

/// Verification work done up to a block and estimated to remain after it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerificationWork {
    pub before: f64,
    pub after: f64,
}

impl VerificationWork {
    /// `before / (before + after)`, unclamped.
    pub fn ratio(&self) -> f64 {
        self.before / (self.before + self.after)
    }
}

/// Estimates how far through verifying history a block index entry is.
pub struct ProgressEstimator<'a> {
    dataset: &'a CheckpointDataset,
    clock: Box<dyn Fn() -> u64 + Send + Sync>,
}

impl fmt::Debug for ProgressEstimator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressEstimator")
            .field("dataset", &self.dataset)
            .finish_non_exhaustive()
    }
}

impl<'a> ProgressEstimator<'a> {
    /// Create an estimator reading the system clock.
    pub fn new(dataset: &'a CheckpointDataset) -> Self {
        Self::with_clock(dataset, system_now)
    }

    /// Create an estimator with a custom clock (unix seconds) for testing.
    pub fn with_clock(
        dataset: &'a CheckpointDataset,
        clock: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            dataset,
            clock: Box::new(clock),
        }
    }

    /// Estimated fraction of verification work done at `entry`.
    ///
    /// Returns 0.0 for `None`. The value is not clamped.
    pub fn estimate_progress(&self, entry: Option<&BlockIndexEntry>) -> f64 {
        match entry {
            Some(entry) => self.estimate_progress_at(entry, (self.clock)()),
            None => 0.0,
        }
    }

    /// [`estimate_progress`](Self::estimate_progress) at an explicit `now`.
    pub fn estimate_progress_at(&self, entry: &BlockIndexEntry, now: u64) -> f64 {
        self.work_at(entry, now).ratio()
    }

    /// Split of verification work around `entry` at time `now`.
    ///
    /// Time differences are taken in floating point so a clock behind the
    /// block or checkpoint timestamp yields a negative remainder instead of
    /// wrapping.
    pub fn work_at(&self, entry: &BlockIndexEntry, now: u64) -> VerificationWork {
        let ds = self.dataset;
        let checkpoint_txs = ds.last_checkpoint_tx_count();
        let per_second = ds.estimated_tx_per_day() / SECONDS_PER_DAY;

        if entry.chain_tx_count <= checkpoint_txs {
            let cheap_before = entry.chain_tx_count as f64;
            let cheap_after = (checkpoint_txs - entry.chain_tx_count) as f64;
            let expensive_after =
                (now as f64 - ds.last_checkpoint_timestamp() as f64) * per_second;
            VerificationWork {
                before: cheap_before,
                after: cheap_after + expensive_after * SIGCHECK_VERIFICATION_FACTOR,
            }
        } else {
            let cheap_before = checkpoint_txs as f64;
            let expensive_before = (entry.chain_tx_count - checkpoint_txs) as f64;
            let expensive_after = (now as f64 - entry.timestamp as f64) * per_second;
            VerificationWork {
                before: cheap_before + expensive_before * SIGCHECK_VERIFICATION_FACTOR,
                after: expensive_after * SIGCHECK_VERIFICATION_FACTOR,
            }
        }
    }
}

/// Clamp a raw estimate into `[0, 1]` for display. NaN maps to 0.0.
///
/// # Examples
///
/// ```
/// use anchor_checkpoints::progress::clamp_progress;
/// assert_eq!(clamp_progress(1.02), 1.0);
/// assert_eq!(clamp_progress(-0.1), 0.0);
/// assert_eq!(clamp_progress(f64::NAN), 0.0);
/// assert_eq!(clamp_progress(0.25), 0.25);
/// ```
pub fn clamp_progress(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 1.0)
    }
}

fn system_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}
