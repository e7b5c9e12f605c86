//! Node configuration with TOML file support.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::NodeError;

/// One party as printed on the ballot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PartyInfo {
    pub code: String,
    pub name: String,
}

/// Configuration for a polling-station node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Data directory holding the chain and tally files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Chain file name within the data directory.
    #[serde(default = "default_chain_file")]
    pub chain_file: String,

    /// Tally file name within the data directory.
    #[serde(default = "default_tally_file")]
    pub tally_file: String,

    /// Participation records batched per chain block before sealing.
    #[serde(default = "default_block_capacity")]
    pub block_capacity: usize,

    /// Parties on the ballot.
    #[serde(default)]
    pub parties: Vec<PartyInfo>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./ballot_data")
}

fn default_chain_file() -> String {
    "vote_chain.json".to_string()
}

fn default_tally_file() -> String {
    "anonymous_votes.json".to_string()
}

fn default_block_capacity() -> usize {
    ballot_chain::DEFAULT_BLOCK_CAPACITY
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for NodeConfig {
    fn default() -> Self {
        toml::from_str("").expect("empty config uses serde defaults")
    }
}

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        let config: Self = toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), NodeError> {
        if self.block_capacity == 0 {
            return Err(NodeError::Config(
                "block_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Full path of the chain file.
    pub fn chain_path(&self) -> PathBuf {
        self.data_dir.join(&self.chain_file)
    }

    /// Full path of the tally file.
    pub fn tally_path(&self) -> PathBuf {
        self.data_dir.join(&self.tally_file)
    }
}
