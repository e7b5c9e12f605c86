//! Hash-chained participation ledger — pure data structure, no I/O.
//!
//! Participation records are batched into blocks of bounded size. Each block
//! carries a SHA-256 hash over a canonical serialization of its fields and
//! the hash of its predecessor, so any mutation of a sealed block is
//! detectable by recomputing the chain.

pub mod block;
pub mod chain;
pub mod integrity;

pub use block::{Block, ParticipationRecord};
pub use chain::{AppendOutcome, HashChain, DEFAULT_BLOCK_CAPACITY};
pub use integrity::IntegrityError;
