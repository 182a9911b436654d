//! Property-based tests for checkpoint invariants.
//!
//! Each property uses 256 cases with proptest shrinking to produce minimal
//! failing examples.
//!
//! Invariants covered:
//! - Heights without a checkpoint never reject a block
//! - Checkpointed heights accept exactly the pinned hash
//! - Nothing is rejected when enforcement is off
//! - Progress never decreases along a chain
//! - The locator returns the highest checkpoint present in the index
//! - The total blocks estimate is the greatest checkpointed height

use std::collections::{BTreeMap, HashMap};

use proptest::prelude::*;

use anchor_checkpoints::{
    clamp_progress, CheckpointDataset, EnforcementPolicy, NetworkSelector, ProgressEstimator,
};
use anchor_core::constants::NetworkType;
use anchor_core::types::{BlockIndexEntry, Hash256};
use anchor_tests::helpers::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_hash() -> impl Strategy<Value = Hash256> {
    any::<[u8; 32]>().prop_map(Hash256)
}

fn arb_network() -> impl Strategy<Value = NetworkType> {
    prop_oneof![Just(NetworkType::Mainnet), Just(NetworkType::Testnet)]
}

fn arb_dataset() -> impl Strategy<Value = CheckpointDataset> {
    proptest::collection::btree_map(0u64..1_000_000, arb_hash(), 0..32).prop_map(
        |entries: BTreeMap<u64, Hash256>| {
            CheckpointDataset::new(entries, MAINNET_CP_TIME, MAINNET_CP_TXS, 1000.0).unwrap()
        },
    )
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn absent_heights_always_accept(height in 0u64..100_000, hash in arb_hash()) {
        let selector = NetworkSelector::builtin().unwrap();
        let cp = selector.checkpoints(EnforcementPolicy::default());
        prop_assume!(cp.dataset().get(height).is_none());
        prop_assert!(cp.check_block(height, &hash));
    }

    #[test]
    fn checkpointed_heights_accept_only_pinned(index in 0usize..17, hash in arb_hash()) {
        let selector = NetworkSelector::builtin().unwrap();
        let cp = selector.checkpoints(EnforcementPolicy::default());
        let pinned = cp.dataset().entries().nth(index).unwrap();

        prop_assert!(cp.check_block(pinned.height, &pinned.block_hash));
        prop_assert_eq!(cp.check_block(pinned.height, &hash), hash == pinned.block_hash);
    }

    #[test]
    fn unenforced_accepts_everything(
        network in arb_network(),
        enabled in any::<bool>(),
        height in 0u64..30_000,
        hash in arb_hash(),
    ) {
        let policy = EnforcementPolicy::new(network, enabled);
        prop_assume!(!policy.is_enforced());

        let selector = NetworkSelector::builtin().unwrap();
        let cp = selector.checkpoints(policy);
        prop_assert!(cp.check_block(height, &hash));
        prop_assert_eq!(cp.total_blocks_estimate(), 0);
    }

    #[test]
    fn total_estimate_is_max_height(ds in arb_dataset()) {
        let cp = anchor_checkpoints::Checkpoints::new(&ds, EnforcementPolicy::default());
        prop_assert_eq!(cp.total_blocks_estimate(), ds.max_height().unwrap_or(0));
        if let Some(top) = ds.entries().next_back() {
            prop_assert!(cp.check_block(top.height, &top.block_hash));
        }
    }
}

// ---------------------------------------------------------------------------
// Last checkpoint
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn locator_returns_highest_present(mask in 0u32..(1 << 17), noise in 0u64..64) {
        let selector = NetworkSelector::builtin().unwrap();
        let cp = selector.checkpoints(EnforcementPolicy::default());

        let chosen: Vec<_> = cp
            .dataset()
            .entries()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, e)| e)
            .collect();

        let mut index: HashMap<Hash256, BlockIndexEntry> = (0..noise)
            .map(|h| entry(h, MAINNET_CP_TIME, h))
            .map(|e| (e.hash, e))
            .collect();
        for c in &chosen {
            let mut e = entry(c.height, MAINNET_CP_TIME, c.height);
            e.hash = c.block_hash;
            index.insert(e.hash, e);
        }

        let found = cp.find_last_checkpoint(&index).map(|e| e.height);
        prop_assert_eq!(found, chosen.last().map(|c| c.height));

        if let Some(h) = found {
            prop_assert!(cp.check_reorg(h, &index).is_ok());
            prop_assert!(h == 0 || cp.check_reorg(h - 1, &index).is_err());
        }
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn progress_is_monotonic(
        tx_a in 0u64..200_000,
        tx_b in 0u64..200_000,
        off_a in 0u64..(60 * DAY),
        off_b in 0u64..(60 * DAY),
    ) {
        let ds = CheckpointDataset::mainnet().unwrap();
        let now = MAINNET_CP_TIME + 60 * DAY;
        let est = ProgressEstimator::with_clock(&ds, move || now);

        // Later blocks carry more transactions and later timestamps, all
        // between the last checkpoint and now.
        let (lo_tx, hi_tx) = (tx_a.min(tx_b), tx_a.max(tx_b));
        let (lo_t, hi_t) = (off_a.min(off_b), off_a.max(off_b));
        let lo = entry(1, MAINNET_CP_TIME + lo_t, lo_tx);
        let hi = entry(2, MAINNET_CP_TIME + hi_t, hi_tx);

        let p_lo = est.estimate_progress(Some(&lo));
        let p_hi = est.estimate_progress(Some(&hi));
        prop_assert!(p_lo <= p_hi + 1e-12, "{} > {}", p_lo, p_hi);
    }

    #[test]
    fn clamped_progress_in_unit_interval(
        tx in 0u64..1_000_000,
        ts in 0u64..(MAINNET_CP_TIME * 2),
        now in 0u64..(MAINNET_CP_TIME * 2),
    ) {
        let ds = CheckpointDataset::mainnet().unwrap();
        let est = ProgressEstimator::new(&ds);
        let p = clamp_progress(est.estimate_progress_at(&entry(1, ts, tx), now));
        prop_assert!((0.0..=1.0).contains(&p));
    }
}
