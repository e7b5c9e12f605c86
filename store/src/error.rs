use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("persisted data is corrupted: {0}")]
    Corruption(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
