//! JSON file storage backend for the vote ledger.
//!
//! Implements the storage traits from `ballot-store` with one JSON file per
//! store. Writes go to a temporary file in the same directory and are
//! renamed over the canonical path, so a crash mid-write never leaves a
//! torn file where the canonical one was.

pub mod atomic;
pub mod chain;
pub mod tally;

pub use chain::FileChainStore;
pub use tally::FileTallyStore;
