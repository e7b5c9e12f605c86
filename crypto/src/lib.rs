//! SHA-256 hashing for ledger blocks.

pub mod hash;

pub use hash::{hash_block, sha256, sha256_multi};
