pub mod financial_service;
pub mod listing;
pub mod summary_service;
pub mod system_transaction_service;
pub mod transaction_service;

pub use financial_service::{FinancialService, Financials};
pub use listing::{filter_and_sort, period_log, sort_for_display, ListScope};
pub use summary_service::{
    BudgetSnapshot, CategoryBreakdown, CategoryShare, DailyAllocation, DailyBudgetMode,
    DayAllocation, SnapshotQuery, SummaryService,
};
pub use system_transaction_service::SystemTransactionService;
pub use transaction_service::TransactionService;

use crate::errors::BudgetError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error("{0}")]
    Invalid(String),
}

/// Division that resolves zero or non-finite results to zero.
pub(crate) fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let value = numerator / denominator;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub(crate) fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
