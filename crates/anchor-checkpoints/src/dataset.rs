//! Per-network checkpoint datasets.
//!
//! A [`CheckpointDataset`] is the immutable table of trusted
//! `(height, block hash)` pairs for one network, plus the metadata the
//! progress estimator needs about the last checkpoint. Datasets are built
//! once at startup and never mutated.
//!
//! Every constructor runs the same integrity check. A malformed table is a
//! startup-fatal [`DatasetError`]; nothing here falls back to an empty
//! dataset, because an empty dataset silently disables enforcement.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use anchor_core::error::DatasetError;
use anchor_core::types::Hash256;

use crate::data;

/// A single trusted `(height, block hash)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckpointEntry {
    pub height: u64,
    pub block_hash: Hash256,
}

/// Immutable checkpoint table for one network.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckpointDataset {
    entries: BTreeMap<u64, Hash256>,
    last_checkpoint_timestamp: u64,
    last_checkpoint_tx_count: u64,
    estimated_tx_per_day: f64,
}

/// On-disk layout accepted by [`CheckpointDataset::from_json_str`].
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DatasetFile {
    checkpoints: Vec<CheckpointRecord>,
    last_checkpoint_timestamp: u64,
    last_checkpoint_tx_count: u64,
    estimated_tx_per_day: f64,
}

/// Hashes stay as text here so a bad one reports its height.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CheckpointRecord {
    height: u64,
    hash: String,
}

impl CheckpointDataset {
    /// Build a dataset from `(height, hash)` pairs in any order.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::DuplicateHeight`] if a height appears twice
    /// - [`DatasetError::InvalidRate`] if `estimated_tx_per_day` is negative,
    ///   NaN or infinite
    pub fn new(
        entries: impl IntoIterator<Item = (u64, Hash256)>,
        last_checkpoint_timestamp: u64,
        last_checkpoint_tx_count: u64,
        estimated_tx_per_day: f64,
    ) -> Result<Self, DatasetError> {
        if !estimated_tx_per_day.is_finite() || estimated_tx_per_day < 0.0 {
            return Err(DatasetError::InvalidRate(estimated_tx_per_day));
        }

        let mut map = BTreeMap::new();
        for (height, hash) in entries {
            if map.insert(height, hash).is_some() {
                return Err(DatasetError::DuplicateHeight(height));
            }
        }

        debug!(
            checkpoints = map.len(),
            max_height = map.keys().next_back().copied().unwrap_or(0),
            "built checkpoint dataset"
        );

        Ok(Self {
            entries: map,
            last_checkpoint_timestamp,
            last_checkpoint_tx_count,
            estimated_tx_per_day,
        })
    }

    /// Build a dataset from a static table of hex-encoded hashes.
    ///
    /// # Errors
    ///
    /// Everything [`new`](Self::new) rejects, plus
    /// [`DatasetError::InvalidHash`] for non-canonical hash text.
    pub fn from_table(
        table: &[(u64, &str)],
        last_checkpoint_timestamp: u64,
        last_checkpoint_tx_count: u64,
        estimated_tx_per_day: f64,
    ) -> Result<Self, DatasetError> {
        let entries = table
            .iter()
            .map(|&(height, text)| parse_entry(height, text))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(
            entries,
            last_checkpoint_timestamp,
            last_checkpoint_tx_count,
            estimated_tx_per_day,
        )
    }

    /// Load a dataset from its JSON representation.
    ///
    /// # Errors
    ///
    /// [`DatasetError::Malformed`] if the document does not parse, otherwise
    /// the same integrity failures as [`from_table`](Self::from_table).
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let file: DatasetFile =
            serde_json::from_str(json).map_err(|e| DatasetError::Malformed(e.to_string()))?;
        let entries = file
            .checkpoints
            .iter()
            .map(|r| parse_entry(r.height, &r.hash))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(
            entries,
            file.last_checkpoint_timestamp,
            file.last_checkpoint_tx_count,
            file.estimated_tx_per_day,
        )
    }

    /// The compiled-in mainnet dataset.
    pub fn mainnet() -> Result<Self, DatasetError> {
        Self::from_table(
            data::MAINNET_CHECKPOINTS,
            data::MAINNET_LAST_CHECKPOINT_TIMESTAMP,
            data::MAINNET_LAST_CHECKPOINT_TX_COUNT,
            data::MAINNET_TX_PER_DAY,
        )
    }

    /// The compiled-in testnet dataset.
    pub fn testnet() -> Result<Self, DatasetError> {
        Self::from_table(
            data::TESTNET_CHECKPOINTS,
            data::TESTNET_LAST_CHECKPOINT_TIMESTAMP,
            data::TESTNET_LAST_CHECKPOINT_TX_COUNT,
            data::TESTNET_TX_PER_DAY,
        )
    }

    /// Stored hash at `height`, if that height is checkpointed.
    pub fn get(&self, height: u64) -> Option<&Hash256> {
        self.entries.get(&height)
    }

    /// Entries in ascending height order. Reverse with `.rev()`.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = CheckpointEntry> + '_ {
        self.entries.iter().map(|(&height, &block_hash)| CheckpointEntry { height, block_hash })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Greatest checkpointed height, or `None` for an empty dataset.
    pub fn max_height(&self) -> Option<u64> {
        self.entries.keys().next_back().copied()
    }

    /// Unix timestamp of the last checkpoint block.
    pub fn last_checkpoint_timestamp(&self) -> u64 {
        self.last_checkpoint_timestamp
    }

    /// Transactions from genesis up to and including the last checkpoint.
    pub fn last_checkpoint_tx_count(&self) -> u64 {
        self.last_checkpoint_tx_count
    }

    /// Expected transactions per day after the last checkpoint.
    pub fn estimated_tx_per_day(&self) -> f64 {
        self.estimated_tx_per_day
    }
}

fn parse_entry(height: u64, text: &str) -> Result<(u64, Hash256), DatasetError> {
    Hash256::from_hex(text)
        .map(|hash| (height, hash))
        .map_err(|source| DatasetError::InvalidHash { height, source })
}
