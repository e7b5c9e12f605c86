//! Tally persistence as a JSON file of rows plus an id counter.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ballot_store::{StoreError, TallyEntry, TallyId, TallyStore};
use ballot_types::{BlockHash, PartyCode, Timestamp};
use serde::{Deserialize, Serialize};

use crate::atomic::write_atomic;

/// On-disk shape: the rows plus the next serial id.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TallyFile {
    next_tally_id: TallyId,
    entries: Vec<TallyEntry>,
}

/// File-backed anonymous tally — the relational-table equivalent of the
/// original deployment, as one JSON file.
///
/// `record` is a read-modify-write under an interior mutex (single-writer);
/// reads take the mutex too so they never observe a write in progress.
pub struct FileTallyStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTallyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<TallyFile, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(TallyFile {
                    next_tally_id: 1,
                    entries: Vec::new(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content)
            .map_err(|e| StoreError::Corruption(format!("{}: {e}", self.path.display())))
    }
}

impl TallyStore for FileTallyStore {
    fn record(&self, party: &PartyCode, block_hash: &BlockHash) -> Result<TallyId, StoreError> {
        let _guard = self.lock.lock().expect("tally store lock");
        let mut file = self.read_file()?;
        let tally_id = file.next_tally_id;
        file.next_tally_id += 1;
        file.entries.push(TallyEntry {
            tally_id,
            party_code: party.clone(),
            recorded_at: Timestamp::now(),
            block_hash: *block_hash,
        });
        let json = serde_json::to_vec_pretty(&file)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        write_atomic(&self.path, &json)?;
        Ok(tally_id)
    }

    fn count_by_party(&self) -> Result<BTreeMap<PartyCode, u64>, StoreError> {
        let _guard = self.lock.lock().expect("tally store lock");
        let file = self.read_file()?;
        let mut counts = BTreeMap::new();
        for entry in &file.entries {
            *counts.entry(entry.party_code.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn total(&self) -> Result<u64, StoreError> {
        let _guard = self.lock.lock().expect("tally store lock");
        Ok(self.read_file()?.entries.len() as u64)
    }
}
