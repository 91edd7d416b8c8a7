//! Explicit budget context: the loaded config and ledger plus the storage they
//! came from.

use tracing::{error, info, warn};

use crate::core::services::{
    BudgetSnapshot, FinancialService, Financials, ServiceResult, SnapshotQuery, SummaryService,
    SystemTransactionService, TransactionService,
};
use crate::domain::{BudgetConfig, Transaction, TransactionDraft, TransactionEdit};
use crate::errors::{BudgetError, Result};
use crate::settings::Settings;
use crate::storage::StorageBackend;

/// Facade that coordinates in-memory budget state with persistence.
///
/// Mutations follow "read full list, compute new full list, write full list". A
/// failed write is logged and leaves the in-memory state authoritative until a later
/// write succeeds. When the stored ledger could not be read, the ledger file is never
/// overwritten until a later `reload` reads it successfully.
pub struct BudgetManager {
    config: Option<BudgetConfig>,
    transactions: Vec<Transaction>,
    storage: Box<dyn StorageBackend>,
    config_dirty: bool,
    transactions_dirty: bool,
    transactions_unreadable: bool,
}

impl BudgetManager {
    /// Loads the stored snapshots; unreadable snapshots degrade to empty state.
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        let mut manager = Self {
            config: None,
            transactions: Vec::new(),
            storage,
            config_dirty: false,
            transactions_dirty: false,
            transactions_unreadable: false,
        };
        manager.reload();
        manager
    }

    /// Opens JSON storage in the directory described by `settings`.
    pub fn open_with_settings(settings: &Settings) -> Result<Self> {
        let storage = settings.open_storage()?;
        Ok(Self::open(Box::new(storage)))
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    /// Replaces in-memory state with whatever storage currently holds.
    pub fn reload(&mut self) {
        self.config = self.storage.load_config().unwrap_or_else(|err| {
            warn!(%err, "failed to load budget config; continuing without one");
            None
        });
        match self.storage.load_transactions() {
            Ok(transactions) => {
                self.transactions = transactions;
                self.transactions_unreadable = false;
            }
            Err(err) => {
                warn!(%err, "failed to load transactions; continuing with an empty ledger");
                self.transactions = Vec::new();
                self.transactions_unreadable = true;
            }
        }
        self.config_dirty = false;
        self.transactions_dirty = self.transactions_unreadable;
        info!(
            has_config = self.config.is_some(),
            transactions = self.transactions.len(),
            "budget state loaded"
        );
    }

    pub fn config(&self) -> Option<&BudgetConfig> {
        self.config.as_ref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// True until a budget config has been saved.
    pub fn needs_setup(&self) -> bool {
        self.config.is_none()
    }

    /// True while storage is behind the in-memory state, either after a failed write
    /// or because the stored ledger could not be read.
    pub fn has_unsaved_changes(&self) -> bool {
        self.config_dirty || self.transactions_dirty
    }

    pub fn financials(&self) -> Option<Financials> {
        self.config.as_ref().map(FinancialService::calculate)
    }

    /// Normalizes and stores `config`, then regenerates the plan's system entries.
    pub fn save_config(&mut self, config: BudgetConfig) -> &BudgetConfig {
        let config = config.normalized();
        self.config_dirty = match self.storage.save_config(&config) {
            Ok(()) => false,
            Err(err) => {
                error!(%err, "failed to save budget config");
                true
            }
        };
        self.transactions = SystemTransactionService::rebuild(&self.transactions, &config);
        self.persist_transactions();
        self.config.insert(config)
    }

    /// Validates and records a user transaction, returning its id.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> ServiceResult<String> {
        let id = TransactionService::add(&mut self.transactions, draft)?;
        self.persist_transactions();
        Ok(id)
    }

    pub fn edit_transaction(&mut self, id: &str, edit: TransactionEdit) -> ServiceResult<()> {
        TransactionService::edit(&mut self.transactions, id, edit)?;
        self.persist_transactions();
        Ok(())
    }

    pub fn delete_transaction(&mut self, id: &str) -> ServiceResult<Transaction> {
        let removed = TransactionService::remove(&mut self.transactions, id)?;
        self.persist_transactions();
        Ok(removed)
    }

    /// Computes the view model; setup must have run first.
    pub fn snapshot(&self, query: SnapshotQuery) -> ServiceResult<BudgetSnapshot> {
        let config = self.config.as_ref().ok_or(BudgetError::ConfigMissing)?;
        Ok(SummaryService::snapshot(config, &self.transactions, query))
    }

    fn persist_transactions(&mut self) {
        if self.transactions_unreadable {
            warn!(
                count = self.transactions.len(),
                "stored transactions are unreadable; keeping changes in memory only"
            );
            self.transactions_dirty = true;
            return;
        }
        self.transactions_dirty = match self.storage.save_transactions(&self.transactions) {
            Ok(()) => false,
            Err(err) => {
                error!(%err, count = self.transactions.len(), "failed to save transactions");
                true
            }
        };
    }
}
