pub mod json_backend;
pub mod memory;

use crate::domain::{BudgetConfig, Transaction};
use crate::errors::Result;

/// Snapshot persistence for the active budget config and the transaction list.
///
/// Each call reads or replaces a complete snapshot; a failed save must leave the
/// previously stored snapshot readable.
pub trait StorageBackend: Send + Sync {
    fn load_config(&self) -> Result<Option<BudgetConfig>>;
    fn save_config(&self, config: &BudgetConfig) -> Result<()>;
    /// Returns an empty list when nothing has been stored yet.
    fn load_transactions(&self) -> Result<Vec<Transaction>>;
    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()>;
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
