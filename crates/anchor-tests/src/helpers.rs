//! Shared test helpers for E2E and property tests.

use anchor_checkpoints::CheckpointDataset;
use anchor_core::types::{BlockIndexEntry, Hash256};
use anchor_node_lib::SharedBlockIndex;

/// Mainnet last-checkpoint timestamp, repeated here to build fixtures.
pub const MAINNET_CP_TIME: u64 = 1_394_847_232;

/// Mainnet cumulative transactions at the last checkpoint.
pub const MAINNET_CP_TXS: u64 = 80_219;

pub const DAY: u64 = 86_400;

/// Hash filled with one byte.
pub fn hash(seed: u8) -> Hash256 {
    Hash256([seed; 32])
}

/// Deterministic hash unique per height, never equal to a real block hash.
pub fn synthetic_hash(height: u64) -> Hash256 {
    let mut bytes = [0xEEu8; 32];
    bytes[24..].copy_from_slice(&height.to_be_bytes());
    Hash256(bytes)
}

/// Index entry with a synthetic hash.
pub fn entry(height: u64, timestamp: u64, chain_tx_count: u64) -> BlockIndexEntry {
    BlockIndexEntry {
        height,
        hash: synthetic_hash(height),
        timestamp,
        chain_tx_count,
    }
}

/// Linear chain `0..=tip` where blocks at checkpointed heights carry the
/// dataset's hash. Timestamps end at `tip_time`, one minute apart.
pub fn chain_through(dataset: &CheckpointDataset, tip: u64, tip_time: u64) -> Vec<BlockIndexEntry> {
    (0..=tip)
        .map(|height| {
            let mut e = entry(height, tip_time - (tip - height) * 60, height * 3);
            if let Some(cp) = dataset.get(height) {
                e.hash = *cp;
            }
            e
        })
        .collect()
}

/// Shared index holding exactly the given entries.
pub fn index_of(entries: impl IntoIterator<Item = BlockIndexEntry>) -> SharedBlockIndex {
    SharedBlockIndex::from_entries(entries)
}
