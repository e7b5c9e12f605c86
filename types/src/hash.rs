//! Block hash type for the participation chain.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A 32-byte block hash — links each block to its predecessor.
///
/// Serializes as a lowercase hex string. The genesis sentinel
/// ([`BlockHash::ZERO`]) serializes as the literal `"0"`, matching the
/// on-disk shape the chain file has always used.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockHash([u8; 32]);

impl Default for BlockHash {
    fn default() -> Self {
        Self::ZERO
    }
}

impl BlockHash {
    /// The genesis sentinel — a block with no predecessor.
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Hex rendering used both for display and for the canonical hash input.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse the serialized form: `"0"` for the sentinel, else 64 hex chars.
    pub fn from_hex(s: &str) -> Result<Self, ParseHashError> {
        if s == "0" {
            return Ok(Self::ZERO);
        }
        if s.len() != 64 {
            return Err(ParseHashError::Length(s.len()));
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            let hi = hex_val(chunk[0]).ok_or(ParseHashError::Digit)?;
            let lo = hex_val(chunk[1]).ok_or(ParseHashError::Digit)?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

/// Error parsing a block hash from its string form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseHashError {
    Length(usize),
    Digit,
}

impl fmt::Display for ParseHashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(n) => write!(f, "expected 64 hex chars or \"0\", got {n} chars"),
            Self::Digit => write!(f, "invalid hex digit"),
        }
    }
}

impl std::error::Error for ParseHashError {}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Serialize for BlockHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_zero() {
            serializer.serialize_str("0")
        } else {
            serializer.serialize_str(&self.to_hex())
        }
    }
}

impl<'de> Deserialize<'de> for BlockHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(D::Error::custom)
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash(")?;
        for b in &self.0[..4] {
            write!(f, "{:02x}", b)?;
        }
        write!(f, "\u{2026})")
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

// Inline hex encoding to avoid adding the `hex` crate as a dependency of types.
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
