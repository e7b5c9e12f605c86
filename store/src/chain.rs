//! Chain storage trait.

use ballot_chain::Block;

use crate::StoreError;

/// Durable persistence for the participation chain.
///
/// The chain is persisted as the ordered list of its blocks. `load` must
/// distinguish "nothing persisted yet" (`Ok(None)`) from "persisted but
/// unreadable" (`Err(Corruption)`) — only the former may trigger a fresh
/// genesis, otherwise real votes could be silently erased.
pub trait ChainStore: Send + Sync {
    /// Read the persisted blocks, or `None` if no chain has been saved yet.
    fn load(&self) -> Result<Option<Vec<Block>>, StoreError>;

    /// Durably write the full chain. Callers serialize saves (single-writer);
    /// implementations must never leave a half-written canonical file.
    fn save(&self, blocks: &[Block]) -> Result<(), StoreError>;
}
