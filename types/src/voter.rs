//! Voter reference — the durable identifier used to detect double-voting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A voter's durable identifier (e.g. a national identity card number).
///
/// This is the key the ledger deduplicates on. It never appears in a tally
/// entry — the anonymity separation depends on that.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoterRef(String);

impl VoterRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VoterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VoterRef({})", self.0)
    }
}

impl fmt::Display for VoterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
