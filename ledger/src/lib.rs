//! The vote ledger — the externally visible ledger API.
//!
//! [`VoteLedger`] combines the pure hash chain with a persistence backend
//! behind a single lock, turning a maybe-racy data structure into a safe
//! concurrent service. [`AnonymousTally`] is its sibling store for ballot
//! selections, keyed only by block hash.

pub mod error;
pub mod tally;
pub mod vote_ledger;

pub use error::LedgerError;
pub use tally::AnonymousTally;
pub use vote_ledger::{Participation, VoteLedger};
