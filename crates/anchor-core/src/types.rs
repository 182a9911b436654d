//! Core types: block hashes and the read-only block-index entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::HashParseError;

/// A 32-byte block hash.
///
/// Bytes are kept in the order they are written in hex, so [`Display`] and
/// [`FromStr`] agree with each other and with the compiled-in checkpoint
/// tables.
///
/// [`Display`]: fmt::Display
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// The zero hash (32 zero bytes).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create a Hash256 from a byte array.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Parse a canonical hex encoding: exactly 64 hex digits, optionally
    /// prefixed with `0x`.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_core::types::Hash256;
    /// let h = Hash256::from_hex(&format!("0x{}", "ab".repeat(32))).unwrap();
    /// assert_eq!(h, Hash256([0xAB; 32]));
    /// assert!(Hash256::from_hex("0x1234").is_err());
    /// ```
    pub fn from_hex(s: &str) -> Result<Self, HashParseError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 64 {
            return Err(HashParseError::InvalidLength(digits.len()));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| HashParseError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Hash256 {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// One entry of the node's block index, as seen by the checkpoint subsystem.
///
/// Owned by the block-index store. This crate only reads the fields; the
/// checkpoint code never constructs, stores, or frees these in production.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BlockIndexEntry {
    /// Height of the block above genesis.
    pub height: u64,
    /// Block header hash.
    pub hash: Hash256,
    /// Unix timestamp in seconds from the block header.
    pub timestamp: u64,
    /// Total number of transactions from genesis up to and including this block.
    pub chain_tx_count: u64,
}
