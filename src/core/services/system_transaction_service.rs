//! Regenerates the ledger entries that mirror the budget plan.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::core::dates::generate_unique_id;
use crate::domain::{BudgetConfig, Category, NamedEntity, Transaction};
use crate::storage::StorageBackend;

use super::{FinancialService, ServiceResult};

pub const INCOME_NOTE: &str = "Monthly Income";
pub const SAVINGS_NOTE: &str = "Auto Savings";

/// Owns every `is_system` transaction: they are rebuilt from the config on each save.
pub struct SystemTransactionService;

impl SystemTransactionService {
    /// Builds the plan entries for `config`: one income entry, one entry per bill and a
    /// savings entry when the goal resolves to a positive amount. Ids avoid `reserved`.
    pub fn system_entries(config: &BudgetConfig, reserved: &HashSet<String>) -> Vec<Transaction> {
        let date = config.start_date;
        let savings_amount = FinancialService::calculate(config).savings_amount;
        let mut used = reserved.clone();
        let mut next_id = || {
            let id = generate_unique_id(|candidate| used.contains(candidate));
            used.insert(id.clone());
            id
        };

        let mut entries = Vec::with_capacity(config.bills.len() + 2);
        entries.push(Transaction::system(
            next_id(),
            date,
            config.monthly_income,
            Category::Income,
            INCOME_NOTE,
        ));
        for bill in &config.bills {
            entries.push(Transaction::system(
                next_id(),
                date,
                -bill.amount.abs(),
                Category::Bills,
                bill.name(),
            ));
        }
        if savings_amount > 0.0 {
            entries.push(Transaction::system(
                next_id(),
                date,
                -savings_amount.abs(),
                Category::Savings,
                SAVINGS_NOTE,
            ));
        }
        entries
    }

    /// Replaces every system entry in `existing`, keeping user entries untouched and in
    /// their original order ahead of the regenerated plan entries.
    pub fn rebuild(existing: &[Transaction], config: &BudgetConfig) -> Vec<Transaction> {
        let user_txs: Vec<Transaction> = existing
            .iter()
            .filter(|txn| !txn.is_system)
            .cloned()
            .collect();
        let reserved: HashSet<String> = user_txs.iter().map(|txn| txn.id.clone()).collect();
        let system = Self::system_entries(config, &reserved);
        debug!(
            user = user_txs.len(),
            discarded = existing.len() - user_txs.len(),
            generated = system.len(),
            "rebuilt system transactions"
        );
        let mut rebuilt = user_txs;
        rebuilt.extend(system);
        rebuilt
    }

    /// Loads the stored ledger, rebuilds its system entries and writes it back.
    ///
    /// A failed read is propagated rather than treated as an empty ledger so that a
    /// storage fault cannot discard user entries.
    pub fn regenerate(
        storage: &dyn StorageBackend,
        config: &BudgetConfig,
    ) -> ServiceResult<Vec<Transaction>> {
        let existing = storage.load_transactions()?;
        let rebuilt = Self::rebuild(&existing, config);
        storage.save_transactions(&rebuilt)?;
        info!(count = rebuilt.len(), "system transactions regenerated");
        Ok(rebuilt)
    }
}
