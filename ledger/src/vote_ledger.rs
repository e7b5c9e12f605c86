//! The concurrent vote ledger.

use std::sync::RwLock;

use ballot_chain::{AppendOutcome, HashChain};
use ballot_store::ChainStore;
use ballot_types::{BlockHash, VoterRef};

use crate::LedgerError;

/// What a successful participation append yields: the hash of the block now
/// holding the record and the record's 1-based position in the election.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Participation {
    pub block_hash: BlockHash,
    pub position: u64,
}

/// The authoritative "who has voted" ledger.
///
/// Sole owner and sole mutator of the chain. All access goes through one
/// process-wide `RwLock`: reads share it, `record_participation` holds it
/// exclusively across check, append, and save, which is what makes the
/// no-double-vote guarantee hold under concurrency.
pub struct VoteLedger {
    chain: RwLock<HashChain>,
    store: Box<dyn ChainStore>,
}

impl VoteLedger {
    /// Open the ledger from persistent storage.
    ///
    /// An absent chain means first startup: a genesis chain is created and
    /// persisted. A chain that loads but fails integrity verification, or a
    /// file that cannot be parsed, is an error — startup must not quietly
    /// erase recorded votes.
    pub fn open(store: Box<dyn ChainStore>, capacity: usize) -> Result<Self, LedgerError> {
        let chain = match store.load()? {
            Some(blocks) => {
                let chain = HashChain::from_blocks(blocks, capacity);
                chain.verify_integrity()?;
                tracing::info!(
                    blocks = chain.block_count(),
                    records = chain.count(),
                    "chain loaded"
                );
                chain
            }
            None => {
                let chain = HashChain::new_genesis(capacity);
                store.save(chain.blocks())?;
                tracing::info!("no persisted chain found, genesis created");
                chain
            }
        };
        Ok(Self {
            chain: RwLock::new(chain),
            store,
        })
    }

    /// Whether this voter already has a participation record.
    pub fn has_voted(&self, voter_ref: &VoterRef) -> bool {
        self.read().has_voted(voter_ref)
    }

    /// Total participation records.
    pub fn count(&self) -> u64 {
        self.read().count()
    }

    /// Hash of the current tail block.
    pub fn latest_hash(&self) -> BlockHash {
        self.read().latest_hash()
    }

    /// Number of blocks, genesis included.
    pub fn block_count(&self) -> usize {
        self.read().block_count()
    }

    /// Snapshot of the blocks, for reporting and audits.
    pub fn blocks_snapshot(&self) -> Vec<ballot_chain::Block> {
        self.read().blocks().to_vec()
    }

    /// Atomically record that a voter participated.
    ///
    /// Holds the write lock across the has-voted re-check, the append, and
    /// the save. Returns `Ok(None)` if the voter had already voted — an
    /// expected outcome, not an error. On a save failure nothing becomes
    /// visible: the append is applied to a working copy and the live chain
    /// is replaced only after the save succeeds, so memory and disk never
    /// diverge.
    pub fn record_participation(
        &self,
        voter_ref: &VoterRef,
    ) -> Result<Option<Participation>, LedgerError> {
        let mut chain = self.chain.write().expect("ledger lock poisoned");

        let mut candidate = chain.clone();
        match candidate.append(voter_ref) {
            AppendOutcome::AlreadyRecorded => {
                tracing::debug!(voter = %voter_ref, "participation rejected, already voted");
                Ok(None)
            }
            AppendOutcome::Appended {
                block_hash,
                position,
            } => {
                self.store.save(candidate.blocks())?;
                *chain = candidate;
                tracing::info!(block = %block_hash, position, "participation recorded");
                Ok(Some(Participation {
                    block_hash,
                    position,
                }))
            }
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashChain> {
        self.chain.read().expect("ledger lock poisoned")
    }
}
