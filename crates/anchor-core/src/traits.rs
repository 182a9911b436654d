//! Trait interfaces consumed by the checkpoint subsystem.
//!
//! - [`BlockIndexLookup`] — hash → block-index entry membership, implemented
//!   by whatever map the validation engine keeps its block index in.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::types::{BlockIndexEntry, Hash256};

/// Read-only lookup into the node's block index.
///
/// Implementors are owned by the validation engine. A caller that scans the
/// index through this trait must hold whatever lock guards the underlying
/// map for the whole scan.
pub trait BlockIndexLookup {
    /// Get the entry for a block hash. Returns `None` if the block is not
    /// in the local index.
    fn lookup(&self, hash: &Hash256) -> Option<&BlockIndexEntry>;

    /// Whether the block is present in the local index.
    ///
    /// Default implementation delegates to [`lookup`](Self::lookup).
    fn contains(&self, hash: &Hash256) -> bool {
        self.lookup(hash).is_some()
    }
}

impl<S: BuildHasher> BlockIndexLookup for HashMap<Hash256, BlockIndexEntry, S> {
    fn lookup(&self, hash: &Hash256) -> Option<&BlockIndexEntry> {
        self.get(hash)
    }
}

impl BlockIndexLookup for BTreeMap<Hash256, BlockIndexEntry> {
    fn lookup(&self, hash: &Hash256) -> Option<&BlockIndexEntry> {
        self.get(hash)
    }
}

impl<T: BlockIndexLookup + ?Sized> BlockIndexLookup for &T {
    fn lookup(&self, hash: &Hash256) -> Option<&BlockIndexEntry> {
        (**self).lookup(hash)
    }
}
