//! Chain persistence as a JSON file of blocks.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ballot_chain::Block;
use ballot_store::{ChainStore, StoreError};

use crate::atomic::write_atomic;

/// File-backed chain store — one JSON array of blocks.
///
/// A missing file means no chain has been persisted yet; a file that exists
/// but cannot be parsed is reported as corruption, never as an empty chain.
pub struct FileChainStore {
    path: PathBuf,
}

impl FileChainStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChainStore for FileChainStore {
    fn load(&self) -> Result<Option<Vec<Block>>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let blocks: Vec<Block> = serde_json::from_str(&content).map_err(|e| {
            StoreError::Corruption(format!("{}: {e}", self.path.display()))
        })?;
        Ok(Some(blocks))
    }

    fn save(&self, blocks: &[Block]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(blocks)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), blocks = blocks.len(), "chain saved");
        Ok(())
    }
}
