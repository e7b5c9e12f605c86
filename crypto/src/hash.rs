//! SHA-256 hashing for blocks.

use ballot_types::BlockHash;
use sha2::{Digest, Sha256};

/// Compute a SHA-256 hash of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash canonical block bytes to produce the block's `BlockHash`.
pub fn hash_block(block_bytes: &[u8]) -> BlockHash {
    BlockHash::new(sha256(block_bytes))
}
