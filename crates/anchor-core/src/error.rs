//! Error types for the Anchor checkpoint subsystem.
use thiserror::Error;

use crate::types::Hash256;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashParseError {
    #[error("expected 64 hex digits, got {0}")] InvalidLength(usize),
    #[error("invalid hex: {0}")] InvalidHex(String),
}

/// Integrity failures while building a checkpoint dataset.
///
/// Always fatal at startup: a dataset that fails these checks must never be
/// replaced by an empty one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("duplicate checkpoint height: {0}")] DuplicateHeight(u64),
    #[error("invalid hash at height {height}: {source}")] InvalidHash { height: u64, source: HashParseError },
    #[error("invalid transaction rate: {0}")] InvalidRate(f64),
    #[error("malformed dataset: {0}")] Malformed(String),
}

/// Consensus verdicts raised by checkpoint enforcement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("checkpoint mismatch at height {height}: expected {expected}, got {got}")]
    CheckpointMismatch { height: u64, expected: Hash256, got: Hash256 },
    #[error("reorg from fork point {fork_height} would disconnect checkpoint at {checkpoint_height}")]
    ReorgBelowCheckpoint { fork_height: u64, checkpoint_height: u64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown network: {0}")] UnknownNetwork(String),
    #[error("config source: {0}")] Source(String),
}
