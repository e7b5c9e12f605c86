//! Participation records and the blocks that batch them.

use ballot_crypto::hash_block;
use ballot_types::{BlockHash, Timestamp, VoterRef};
use serde::{Deserialize, Serialize};

/// Proof that a specific voter cast a vote, without recording their choice.
///
/// Immutable once written. Created exactly once per voter, at the moment of
/// successful vote casting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationRecord {
    /// The voter's durable identifier (e.g. national ID).
    pub voter_ref: VoterRef,
    /// When the participation was recorded.
    pub timestamp: Timestamp,
    /// Unique record id, derived from the block index at creation time.
    pub participation_id: String,
}

/// A batch of participation records sealed together with a chaining hash.
///
/// Invariant: `hash == compute_hash()` over the canonical serialization of
/// `index`, `previous_hash`, `records`, and `timestamp`. Only the chain's
/// tail block is ever mutated; once a successor exists the block is sealed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: Timestamp,
    pub records: Vec<ParticipationRecord>,
    pub previous_hash: BlockHash,
    pub hash: BlockHash,
}

impl Block {
    /// Create the genesis block: index 0, no records, sentinel predecessor.
    pub fn genesis(timestamp: Timestamp) -> Self {
        let mut block = Self {
            index: 0,
            timestamp,
            records: Vec::new(),
            previous_hash: BlockHash::ZERO,
            hash: BlockHash::ZERO,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Compute this block's SHA-256 hash over its canonical serialization.
    ///
    /// The canonical input has a stable field order and fixed-width integer
    /// encoding, so the hash never drifts across serializations. The genesis
    /// sentinel contributes the literal byte `"0"`.
    pub fn compute_hash(&self) -> BlockHash {
        hash_block(&self.canonical_bytes())
    }

    fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(128 + self.records.len() * 64);
        buf.extend_from_slice(&self.index.to_le_bytes());
        if self.previous_hash.is_zero() {
            buf.extend_from_slice(b"0");
        } else {
            buf.extend_from_slice(self.previous_hash.to_hex().as_bytes());
        }
        for record in &self.records {
            buf.extend_from_slice(record.voter_ref.as_str().as_bytes());
            buf.push(0);
            buf.extend_from_slice(&record.timestamp.as_secs().to_le_bytes());
            buf.extend_from_slice(record.participation_id.as_bytes());
            buf.push(0);
        }
        buf.extend_from_slice(&self.timestamp.as_secs().to_le_bytes());
        buf
    }
}
