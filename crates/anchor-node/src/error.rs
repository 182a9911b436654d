//! Error types for node-side composition.
use thiserror::Error;

use anchor_core::error::{BlockError, ConfigError, DatasetError};

#[derive(Error, Debug)]
pub enum NodeError {
    #[error(transparent)] Config(#[from] ConfigError),
    #[error(transparent)] Dataset(#[from] DatasetError),
    #[error(transparent)] Block(#[from] BlockError),
    #[error("reading {path}: {source}")] Io { path: String, source: std::io::Error },
    #[error("block index snapshot: {0}")] Snapshot(String),
}
