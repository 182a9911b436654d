//! Compiled-in checkpoint tables.
//!
//! What makes a good checkpoint block:
//! - surrounded by blocks with reasonable timestamps (no earlier block with a
//!   later timestamp, no later block with an earlier one);
//! - contains no strange transactions.
//!
//! The metadata constants describe the last checkpoint of each table and are
//! only used for progress estimation. `*_LAST_CHECKPOINT_TX_COUNT` is the
//! cumulative transaction count from genesis up to that block.

/// Mainnet `(height, block hash)` pairs, ascending by height.
pub const MAINNET_CHECKPOINTS: &[(u64, &str)] = &[
    (4, "0xfe508d41b7dc2c3079e827d4230e6f7ddebca43c9afc721c1e6431f78d6ff1de"),
    (5, "0x7fc79021dbfa30255ade9bb8d898640516d9c771c3342a9b889ce380c52c6c1f"),
    (5000, "0xec268a9cfe87adb4d10a147a544493406c80e00a3e6868641e520b184e7ddce3"),
    (10000, "0x29c63023c3b8a36b59837734a9c16133a4ef08d9a0e95f639a830c56e415070d"),
    (20000, "0x3a0c072b76a298dabffc4f825a084c0f86dc55fe58f9bf31cc7e21bbfb2ead52"),
    (22500, "0xfd3c87eae2e9be72499978155844598a8675eff7a61c90f9aebcedc94e1b217f"),
    (22544, "0x6dd1a90cc56cf4a46c8c47528c4861c255e86d5f97fcee53ce356174e15c3045"),
    (22554, "0xb13e8b128989f9a9fc1a4c1e547330d0b34d3f60189c00391a116922fa4fcb8c"),
    (22600, "0x9e2d7f2fdab36c3e2b6f0455470cd957c12172ad7877f7c8e414fd736469c8d2"),
    (22650, "0x7afbd354496346819b8a214693af70e1431bfadbf68d49a688ae27539fc6b37e"),
    (22700, "0x35154b803fa5700b69f8081aa6d7c798c1e7fd027971252598a18549092a1291"),
    (22750, "0x67e6eca7d46c1a612b7638e7a503e6dbc7cca4da493f4267833a6f1c9a655a35"),
    (22800, "0x49e84c3b5c261966c37c101ac7691886bd641a382f514c2221735088b1b2beea"),
    (22850, "0xc44cec57381a97c3983df0ef1fcf150669dd1794943202d89b805f423a65516f"),
    (22900, "0x44de4c262de678a23554dd06a6f57270815ea9d145f6c542ab2a8dfbd2ca242c"),
    (22950, "0xcecc4ab30b39fc09bf85eb191e64c1660ab2206c5f80953694997ec5c2db5338"),
    (25890, "0x4806f91100ae83904aa0113cc3acda8fe6ac422186243719a68b76c98e7487c2"),
];

/// Unix timestamp of the last mainnet checkpoint block.
pub const MAINNET_LAST_CHECKPOINT_TIMESTAMP: u64 = 1_394_847_232;
pub const MAINNET_LAST_CHECKPOINT_TX_COUNT: u64 = 80_219;
/// Estimated mainnet transactions per day after the last checkpoint.
pub const MAINNET_TX_PER_DAY: f64 = 1000.0;

/// Testnet `(height, block hash)` pairs. Never enforced; the table exists so
/// testnet progress estimation has metadata to work from.
pub const TESTNET_CHECKPOINTS: &[(u64, &str)] = &[
    (546, "000000002a936ca763904c3c35fce2f3556c559c0214345d31b1bcebf76acb70"),
    (35000, "2af959ab4f12111ce947479bfcef16702485f04afd95210aa90fde7d1e4a64ad"),
];

pub const TESTNET_LAST_CHECKPOINT_TIMESTAMP: u64 = 1_369_685_559;
pub const TESTNET_LAST_CHECKPOINT_TX_COUNT: u64 = 37_581;
pub const TESTNET_TX_PER_DAY: f64 = 300.0;
