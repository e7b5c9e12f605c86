//! Fundamental types for the ballotchain vote ledger.
//!
//! These are the leaf types every other crate builds on: the voter's durable
//! identifier, the opaque party code, the block digest, and timestamps.
//! No I/O happens here.

pub mod hash;
pub mod party;
pub mod time;
pub mod voter;

pub use hash::BlockHash;
pub use party::PartyCode;
pub use time::Timestamp;
pub use voter::VoterRef;
