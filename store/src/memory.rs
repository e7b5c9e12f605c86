//! In-memory backends for tests.
//!
//! Both stores carry a fail-next switch so the rollback and reconciliation
//! paths in the crates above can be exercised without touching a disk.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use ballot_chain::Block;
use ballot_types::{BlockHash, PartyCode, Timestamp};

use crate::chain::ChainStore;
use crate::tally::{TallyEntry, TallyId, TallyStore};
use crate::StoreError;

/// In-memory chain store.
#[derive(Default)]
pub struct MemoryChainStore {
    blocks: Mutex<Option<Vec<Block>>>,
    fail_next_save: AtomicBool,
}

impl MemoryChainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `save` call fail with a backend error.
    pub fn fail_next_save(&self) {
        self.fail_next_save.store(true, Ordering::SeqCst);
    }

    /// The persisted blocks as last saved, for assertions.
    pub fn persisted(&self) -> Option<Vec<Block>> {
        self.blocks.lock().expect("memory store lock").clone()
    }
}

impl ChainStore for MemoryChainStore {
    fn load(&self) -> Result<Option<Vec<Block>>, StoreError> {
        Ok(self.blocks.lock().expect("memory store lock").clone())
    }

    fn save(&self, blocks: &[Block]) -> Result<(), StoreError> {
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Backend("injected save failure".into()));
        }
        *self.blocks.lock().expect("memory store lock") = Some(blocks.to_vec());
        Ok(())
    }
}

/// In-memory tally store.
#[derive(Default)]
pub struct MemoryTallyStore {
    entries: Mutex<Vec<TallyEntry>>,
    fail_next_record: AtomicBool,
}

impl MemoryTallyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `record` call fail with a backend error.
    pub fn fail_next_record(&self) {
        self.fail_next_record.store(true, Ordering::SeqCst);
    }

    pub fn entries(&self) -> Vec<TallyEntry> {
        self.entries.lock().expect("memory store lock").clone()
    }
}

impl TallyStore for MemoryTallyStore {
    fn record(&self, party: &PartyCode, block_hash: &BlockHash) -> Result<TallyId, StoreError> {
        if self.fail_next_record.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Backend("injected record failure".into()));
        }
        let mut entries = self.entries.lock().expect("memory store lock");
        let tally_id = entries.len() as TallyId + 1;
        entries.push(TallyEntry {
            tally_id,
            party_code: party.clone(),
            recorded_at: Timestamp::now(),
            block_hash: *block_hash,
        });
        Ok(tally_id)
    }

    fn count_by_party(&self) -> Result<BTreeMap<PartyCode, u64>, StoreError> {
        let entries = self.entries.lock().expect("memory store lock");
        let mut counts = BTreeMap::new();
        for entry in entries.iter() {
            *counts.entry(entry.party_code.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn total(&self) -> Result<u64, StoreError> {
        Ok(self.entries.lock().expect("memory store lock").len() as u64)
    }
}
