use thiserror::Error;

use ballot_ledger::LedgerError;
use ballot_store::StoreError;
use ballot_types::BlockHash;

use crate::boundary::BoundaryError;

/// Node-level failures: configuration, startup, storage.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("config error: {0}")]
    Config(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome taxonomy of a single cast attempt.
///
/// `NotEligible` and `AlreadyVoted` are expected, user-facing outcomes.
/// The remaining variants are infrastructure faults: `Ledger` means no
/// participation was recorded; `Tally` means a participation exists in
/// block `block_hash` but the ballot was not counted — the operator-visible
/// reconciliation case.
#[derive(Debug, Error)]
pub enum VoteError {
    #[error("voter is not approved for voting")]
    NotEligible,

    #[error("voter has already voted")]
    AlreadyVoted,

    #[error("eligibility lookup failed: {0}")]
    Eligibility(#[source] BoundaryError),

    #[error("ledger unavailable: {0}")]
    Ledger(#[source] LedgerError),

    #[error("participation recorded in block {block_hash} but ballot not tallied: {source}")]
    Tally {
        block_hash: BlockHash,
        #[source]
        source: StoreError,
    },
}
