//! Chain integrity verification — recompute every hash, check every link.

use thiserror::Error;

use crate::block::Block;

/// A violation found while auditing a chain's blocks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("chain has no genesis block")]
    Empty,

    #[error("genesis block malformed: index {index}, previous_hash zero: {previous_is_zero}")]
    BadGenesis { index: u64, previous_is_zero: bool },

    #[error("block {found} found where index {expected} was expected")]
    IndexGap { expected: u64, found: u64 },

    #[error("block {index} hash does not match its contents")]
    HashMismatch { index: u64 },

    #[error("block {index} previous_hash does not match its predecessor")]
    LinkMismatch { index: u64 },
}

/// Audit a sequence of blocks: genesis shape, contiguous indices, stored
/// hashes matching recomputed hashes, and every predecessor link intact.
pub fn verify_blocks(blocks: &[Block]) -> Result<(), IntegrityError> {
    let genesis = blocks.first().ok_or(IntegrityError::Empty)?;
    if genesis.index != 0 || !genesis.previous_hash.is_zero() {
        return Err(IntegrityError::BadGenesis {
            index: genesis.index,
            previous_is_zero: genesis.previous_hash.is_zero(),
        });
    }

    let mut previous_hash = None;
    for (i, block) in blocks.iter().enumerate() {
        let expected = i as u64;
        if block.index != expected {
            return Err(IntegrityError::IndexGap {
                expected,
                found: block.index,
            });
        }
        if let Some(prev) = previous_hash {
            if block.previous_hash != prev {
                return Err(IntegrityError::LinkMismatch { index: block.index });
            }
        }
        if block.hash != block.compute_hash() {
            return Err(IntegrityError::HashMismatch { index: block.index });
        }
        previous_hash = Some(block.hash);
    }
    Ok(())
}
