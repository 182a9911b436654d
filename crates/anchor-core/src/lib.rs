//! # anchor-core
//! Foundation types and traits for the Anchor checkpoint subsystem.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
