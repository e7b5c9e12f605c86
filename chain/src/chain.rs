//! The hash chain — append-only batches of participation records.

use ballot_types::{BlockHash, Timestamp, VoterRef};

use crate::block::{Block, ParticipationRecord};
use crate::integrity::{verify_blocks, IntegrityError};

/// Records batched per block before the block is sealed and a new one opened.
///
/// Bounding the batch size bounds the cost of recomputing the open block's
/// hash on each append.
pub const DEFAULT_BLOCK_CAPACITY: usize = 10;

/// Result of attempting to append a participation record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppendOutcome {
    /// A new record was written.
    Appended {
        /// Hash of the block now holding the record.
        block_hash: BlockHash,
        /// 1-based position of the record across the whole chain.
        position: u64,
    },
    /// The voter already has a record somewhere in the chain; nothing changed.
    AlreadyRecorded,
}

/// An append-only chain of participation blocks.
///
/// Pure in-memory structure — persistence and locking live in the crates
/// above. The only block ever mutated is the tail, and only until it reaches
/// capacity; every earlier block is sealed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashChain {
    blocks: Vec<Block>,
    capacity: usize,
}

impl HashChain {
    /// Create a fresh chain holding only a genesis block.
    pub fn new_genesis(capacity: usize) -> Self {
        assert!(capacity > 0, "block capacity must be positive");
        Self {
            blocks: vec![Block::genesis(Timestamp::now())],
            capacity,
        }
    }

    /// Rebuild a chain from persisted blocks.
    ///
    /// Does not validate — callers that load from storage run
    /// [`HashChain::verify_integrity`] before trusting the result.
    pub fn from_blocks(blocks: Vec<Block>, capacity: usize) -> Self {
        assert!(capacity > 0, "block capacity must be positive");
        Self { blocks, capacity }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of blocks, genesis included.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Total participation records across all blocks.
    pub fn count(&self) -> u64 {
        self.blocks.iter().map(|b| b.records.len() as u64).sum()
    }

    /// Hash of the tail block.
    pub fn latest_hash(&self) -> BlockHash {
        // A chain always holds at least the genesis block.
        self.blocks.last().map(|b| b.hash).unwrap_or(BlockHash::ZERO)
    }

    /// Whether any block holds a record for this voter.
    ///
    /// Linear scan over all records — election-scale data is bounded and a
    /// false negative here would permit a double vote.
    pub fn has_voted(&self, voter_ref: &VoterRef) -> bool {
        self.blocks
            .iter()
            .flat_map(|b| &b.records)
            .any(|r| &r.voter_ref == voter_ref)
    }

    /// Append a participation record stamped with the current time.
    pub fn append(&mut self, voter_ref: &VoterRef) -> AppendOutcome {
        self.append_at(voter_ref, Timestamp::now())
    }

    /// Append a participation record with an explicit timestamp.
    ///
    /// Rejects idempotently if the voter already appears anywhere in the
    /// chain. Otherwise the record lands in the tail block if it still has
    /// room; a full tail is sealed and a new block opened with
    /// `previous_hash` pointing at the sealed block.
    pub fn append_at(&mut self, voter_ref: &VoterRef, now: Timestamp) -> AppendOutcome {
        if self.has_voted(voter_ref) {
            return AppendOutcome::AlreadyRecorded;
        }

        let record = ParticipationRecord {
            voter_ref: voter_ref.clone(),
            timestamp: now,
            participation_id: format!("vote-{}-{}", self.blocks.len(), voter_ref),
        };

        let tail_full = self
            .blocks
            .last()
            .map(|b| b.records.len() >= self.capacity)
            .unwrap_or(true);

        if tail_full {
            let previous_hash = self.latest_hash();
            let mut block = Block {
                index: self.blocks.len() as u64,
                timestamp: now,
                records: vec![record],
                previous_hash,
                hash: BlockHash::ZERO,
            };
            block.hash = block.compute_hash();
            self.blocks.push(block);
        } else {
            let tail = self
                .blocks
                .last_mut()
                .expect("chain always holds a genesis block");
            tail.records.push(record);
            tail.hash = tail.compute_hash();
        }

        AppendOutcome::Appended {
            block_hash: self.latest_hash(),
            position: self.count(),
        }
    }

    /// Verify every block hash and every predecessor link.
    pub fn verify_integrity(&self) -> Result<(), IntegrityError> {
        verify_blocks(&self.blocks)
    }
}
