use thiserror::Error;

use ballot_chain::IntegrityError;
use ballot_store::StoreError;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("persisted chain failed integrity verification: {0}")]
    Integrity(#[from] IntegrityError),
}
