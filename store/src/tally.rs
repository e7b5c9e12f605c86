//! Anonymous tally storage trait.

use std::collections::BTreeMap;

use ballot_types::{BlockHash, PartyCode, Timestamp};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Identifier of a single tally row.
pub type TallyId = u64;

/// A recorded ballot selection, linked only to a chain block hash.
///
/// No field links back to a voter reference — the anonymity separation
/// between "who voted" (the chain) and "what was voted" (the tally) is
/// enforced by this shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyEntry {
    pub tally_id: TallyId,
    pub party_code: PartyCode,
    pub recorded_at: Timestamp,
    /// Reference to the chain block proving a participation occurred. Not
    /// unique: a block can back every ballot recorded while it was the tail.
    pub block_hash: BlockHash,
}

/// Durable storage of ballot selections, append-only.
pub trait TallyStore: Send + Sync {
    /// Insert one tally row. Each call represents exactly one ballot.
    fn record(&self, party: &PartyCode, block_hash: &BlockHash) -> Result<TallyId, StoreError>;

    /// Aggregate counts per party for public reporting.
    fn count_by_party(&self) -> Result<BTreeMap<PartyCode, u64>, StoreError>;

    /// Count of all entries.
    fn total(&self) -> Result<u64, StoreError>;
}
