//! # anchor-node — Node-side composition of the checkpoint subsystem.
//!
//! - [`config::NodeConfig`] — layered configuration and dataset selection
//! - [`index::SharedBlockIndex`] — read-locked in-memory block index
//! - [`status::SyncStatus`] — checkpoint and progress report for status/UI layers

pub mod config;
pub mod error;
pub mod index;
pub mod status;

pub use config::NodeConfig;
pub use error::NodeError;
pub use index::SharedBlockIndex;
pub use status::{CheckpointRef, SyncStatus};
