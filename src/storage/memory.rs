use std::sync::Mutex;

use crate::domain::{BudgetConfig, Transaction};
use crate::errors::{BudgetError, Result};

use super::StorageBackend;

/// Process-local storage, useful for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    config: Mutex<Option<BudgetConfig>>,
    transactions: Mutex<Vec<Transaction>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded storage.
    pub fn with_snapshot(config: Option<BudgetConfig>, transactions: Vec<Transaction>) -> Self {
        Self {
            config: Mutex::new(config),
            transactions: Mutex::new(transactions),
        }
    }
}

fn poisoned<T>(_: T) -> BudgetError {
    BudgetError::StorageError("in-memory storage lock poisoned".into())
}

impl StorageBackend for MemoryStorage {
    fn load_config(&self) -> Result<Option<BudgetConfig>> {
        Ok(self.config.lock().map_err(poisoned)?.clone())
    }

    fn save_config(&self, config: &BudgetConfig) -> Result<()> {
        *self.config.lock().map_err(poisoned)? = Some(config.clone());
        Ok(())
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.lock().map_err(poisoned)?.clone())
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        *self.transactions.lock().map_err(poisoned)? = transactions.to_vec();
        Ok(())
    }
}
