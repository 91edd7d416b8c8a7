#![doc(test(attr(deny(warnings))))]

//! Expense Macros derives a monthly ("period") and daily discretionary budget from a
//! budget plan (income, bills, savings goal) and a ledger of transactions, with an
//! optional rollover policy that carries unspent or overspent money across the month.

pub mod core;
pub mod domain;
pub mod errors;
pub mod settings;
pub mod storage;
pub mod utils;

pub use crate::core::manager::BudgetManager;
pub use crate::core::services::{
    BudgetSnapshot, FinancialService, Financials, ListScope, ServiceError, ServiceResult,
    SnapshotQuery, SummaryService, SystemTransactionService, TransactionService,
};
pub use crate::domain::{
    Bill, BudgetConfig, Category, Flow, SavingsGoal, Transaction, TransactionDraft,
    TransactionEdit, TransactionFilter,
};
pub use crate::errors::BudgetError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(None);
        tracing::info!("Expense Macros tracing initialized.");
    });
}
