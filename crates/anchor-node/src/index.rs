//! Shared in-memory block index.
//!
//! [`SharedBlockIndex`] is the read-mostly `hash → entry` map the checkpoint
//! subsystem reads through. Writers take the lock briefly per entry; readers
//! that scan (the last-checkpoint search) hold one read lock for the whole
//! scan via [`SharedBlockIndex::with_read`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use anchor_checkpoints::Checkpoints;
use anchor_core::error::BlockError;
use anchor_core::types::{BlockIndexEntry, Hash256};

use crate::error::NodeError;

pub type BlockIndexMap = HashMap<Hash256, BlockIndexEntry>;

/// Cloneable handle to a block index behind a `RwLock`.
#[derive(Clone, Debug, Default)]
pub struct SharedBlockIndex {
    inner: Arc<RwLock<BlockIndexMap>>,
}

impl SharedBlockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from entries. Later duplicates of a hash replace
    /// earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = BlockIndexEntry>) -> Self {
        let map: BlockIndexMap = entries.into_iter().map(|e| (e.hash, e)).collect();
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Load a JSON snapshot: an array of block index entries.
    ///
    /// # Errors
    ///
    /// [`NodeError::Io`] if the file cannot be read, [`NodeError::Snapshot`]
    /// if it is not a valid entry array.
    pub fn load_json(path: &Path) -> Result<Self, NodeError> {
        let json = std::fs::read_to_string(path).map_err(|source| NodeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let entries: Vec<BlockIndexEntry> =
            serde_json::from_str(&json).map_err(|e| NodeError::Snapshot(e.to_string()))?;
        debug!("loaded {} block index entries from {}", entries.len(), path.display());
        Ok(Self::from_entries(entries))
    }

    /// Insert an entry, returning the one it replaced.
    pub fn insert(&self, entry: BlockIndexEntry) -> Option<BlockIndexEntry> {
        self.inner.write().insert(entry.hash, entry)
    }

    /// Insert an entry only if it passes the checkpoint check at its height.
    ///
    /// # Errors
    ///
    /// [`BlockError::CheckpointMismatch`] if the block contradicts a
    /// checkpoint; the index is left untouched.
    pub fn insert_checked(
        &self,
        entry: BlockIndexEntry,
        checkpoints: &Checkpoints<'_>,
    ) -> Result<(), BlockError> {
        checkpoints.check_checkpoint(entry.height, &entry.hash)?;
        self.insert(entry);
        Ok(())
    }

    pub fn get(&self, hash: &Hash256) -> Option<BlockIndexEntry> {
        self.inner.read().get(hash).cloned()
    }

    pub fn contains(&self, hash: &Hash256) -> bool {
        self.inner.read().contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Entry with the most cumulative transactions (ties: greatest height).
    pub fn tip(&self) -> Option<BlockIndexEntry> {
        self.with_read(|map| tip_of(map).cloned())
    }

    /// Run `f` under a single read lock.
    pub fn with_read<R>(&self, f: impl FnOnce(&BlockIndexMap) -> R) -> R {
        let guard = self.inner.read();
        f(&*guard)
    }
}

/// Best entry in `map` by `(chain_tx_count, height)`.
pub fn tip_of(map: &BlockIndexMap) -> Option<&BlockIndexEntry> {
    map.values().max_by_key(|e| (e.chain_tx_count, e.height))
}
