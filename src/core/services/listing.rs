//! Ordering and filtering of transaction lists for display.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::{Category, Transaction, TransactionFilter};

/// Which slice of the period a filtered list covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ListScope {
    /// Only the reference day.
    #[default]
    Day,
    /// The whole calendar month of the reference day.
    Period,
}

/// Display order: user entries first (newest date first), then plan entries grouped
/// as bills, savings, income, with bills from smallest to largest.
pub fn compare_for_display(a: &Transaction, b: &Transaction) -> Ordering {
    match (a.is_system, b.is_system) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (false, false) => b.date.cmp(&a.date),
        (true, true) => {
            let rank = |txn: &Transaction| txn.category.system_rank().unwrap_or(u8::MAX);
            rank(a).cmp(&rank(b)).then_with(|| {
                if a.category == Category::Bills && b.category == Category::Bills {
                    a.amount.abs().total_cmp(&b.amount.abs())
                } else {
                    Ordering::Equal
                }
            })
        }
    }
}

/// Stable in-place sort using [`compare_for_display`].
pub fn sort_for_display(transactions: &mut [Transaction]) {
    transactions.sort_by(compare_for_display);
}

/// Applies `filter` and returns the matches in display order.
pub fn filter_and_sort(transactions: &[Transaction], filter: TransactionFilter) -> Vec<Transaction> {
    let mut matches: Vec<Transaction> = transactions
        .iter()
        .filter(|txn| filter.matches(txn.category))
        .cloned()
        .collect();
    sort_for_display(&mut matches);
    matches
}

/// Period transactions, newest date first.
pub fn period_log(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut log = transactions.to_vec();
    log.sort_by(|a, b| b.date.cmp(&a.date));
    log
}
