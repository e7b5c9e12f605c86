//! The anonymous tally — ballot selections keyed by block hash only.

use std::collections::BTreeMap;

use ballot_store::{StoreError, TallyId, TallyStore};
use ballot_types::{BlockHash, PartyCode};

/// Stores the declared party selection for each successfully recorded vote.
///
/// Entries reference the ledger block that proves a participation occurred,
/// never the voter. With no cast in flight, `total()` equals the ledger's
/// participation count.
pub struct AnonymousTally {
    store: Box<dyn TallyStore>,
}

impl AnonymousTally {
    pub fn new(store: Box<dyn TallyStore>) -> Self {
        Self { store }
    }

    /// Record one ballot. A sealed block may back multiple entries, since
    /// several participations can share a block.
    pub fn record(&self, party: &PartyCode, block_hash: &BlockHash) -> Result<TallyId, StoreError> {
        let tally_id = self.store.record(party, block_hash)?;
        tracing::info!(tally_id, party = %party, "ballot tallied");
        Ok(tally_id)
    }

    /// Per-party aggregate for public reporting.
    pub fn count_by_party(&self) -> Result<BTreeMap<PartyCode, u64>, StoreError> {
        self.store.count_by_party()
    }

    /// Count of all recorded ballots.
    pub fn total(&self) -> Result<u64, StoreError> {
        self.store.total()
    }
}
