//! Abstract storage traits for the vote ledger.
//!
//! Every storage backend (JSON files, in-memory for testing) implements
//! these traits. The rest of the codebase depends only on the traits.

pub mod chain;
pub mod error;
pub mod memory;
pub mod tally;

pub use chain::ChainStore;
pub use error::StoreError;
pub use memory::{MemoryChainStore, MemoryTallyStore};
pub use tally::{TallyEntry, TallyId, TallyStore};
