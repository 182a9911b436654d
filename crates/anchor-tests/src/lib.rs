//! Cross-crate test suite for Anchor checkpoints.
//!
//! Integration tests live under `tests/`. They drive the compiled-in
//! datasets through validation, last-checkpoint lookup, reorg checks and
//! progress estimation, and try to slip forged blocks past the anchors.

pub mod helpers;
