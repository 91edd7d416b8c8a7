//! Budget aggregation: turns a plan and a ledger into period and daily figures.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::{debug, trace};

use crate::core::dates::{self, days_in_month, month_days, same_month};
use crate::domain::{BudgetConfig, Category, Transaction, TransactionFilter};

use super::listing::{filter_and_sort, period_log, ListScope};
use super::{finite, safe_div, FinancialService, Financials};

/// Parameters a presentation layer supplies for each recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotQuery {
    pub reference: NaiveDate,
    pub filter: TransactionFilter,
    pub scope: ListScope,
}

impl SnapshotQuery {
    pub fn for_date(reference: NaiveDate) -> Self {
        Self {
            reference,
            filter: TransactionFilter::All,
            scope: ListScope::Day,
        }
    }

    /// Query anchored on the current local day.
    pub fn today() -> Self {
        Self::for_date(dates::today())
    }

    pub fn with_filter(mut self, filter: TransactionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_scope(mut self, scope: ListScope) -> Self {
        self.scope = scope;
        self
    }
}

/// Daily budget policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DailyBudgetMode {
    /// Same allowance every day of the month.
    Fixed,
    /// Each day receives an equal share of what is left for the remaining days.
    Rollover,
}

impl DailyBudgetMode {
    pub fn for_config(config: &BudgetConfig) -> Self {
        if config.rollover_unspent {
            DailyBudgetMode::Rollover
        } else {
            DailyBudgetMode::Fixed
        }
    }
}

/// One day of the month's allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAllocation {
    pub date: NaiveDate,
    pub budget: f64,
    pub spent: f64,
    pub overspent: bool,
}

/// Day-by-day allocation of the period's available money.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAllocation {
    pub mode: DailyBudgetMode,
    pub days: Vec<DayAllocation>,
    /// Allowance of the reference day.
    pub daily_budget: f64,
    pub overspent_days: u32,
    /// What remains of the available money after every day's spend.
    pub closing_remaining: f64,
}

/// Net spend in one discretionary category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub total: f64,
    /// Percentage of the breakdown's total spend.
    pub share_of_spend: f64,
    /// Percentage of the configured monthly income.
    pub share_of_income: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub categories: Vec<CategoryShare>,
    pub total_spent: f64,
}

impl CategoryBreakdown {
    pub fn total_for(&self, category: Category) -> f64 {
        self.categories
            .iter()
            .find(|share| share.category == category)
            .map(|share| share.total)
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.total_spent == 0.0
    }
}

/// View model for a reference day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSnapshot {
    pub reference_date: NaiveDate,
    pub days_in_month: u32,
    pub mode: DailyBudgetMode,
    pub financials: Financials,
    /// Plan value before unplanned income is added.
    pub base_available_to_spend: f64,
    pub income_adjustments: f64,
    pub available_to_spend: f64,
    pub discretionary_spent: f64,
    pub period_left: f64,
    pub daily_budget: f64,
    pub overspent_days: u32,
    pub today_spent: f64,
    pub today_left: f64,
    pub allocation: DailyAllocation,
    pub period_spending: CategoryBreakdown,
    pub selected_day_spending: CategoryBreakdown,
    pub period_log: Vec<Transaction>,
    pub selected_day_spending_txs: Vec<Transaction>,
    pub filtered: Vec<Transaction>,
}

/// Stateless aggregation over a config and transaction snapshot.
pub struct SummaryService;

impl SummaryService {
    pub fn snapshot(
        config: &BudgetConfig,
        transactions: &[Transaction],
        query: SnapshotQuery,
    ) -> BudgetSnapshot {
        let reference = query.reference;
        let financials = FinancialService::calculate(config);
        let month_txs = Self::period_transactions(transactions, reference);
        let day_txs: Vec<Transaction> = month_txs
            .iter()
            .filter(|txn| txn.date == reference)
            .cloned()
            .collect();

        let discretionary_spent = Self::discretionary_spent(&month_txs);
        let income_adjustments = Self::income_adjustments(&month_txs);
        let available_to_spend = finite(financials.available_to_spend + income_adjustments);
        let period_left = finite(available_to_spend - discretionary_spent);

        let mode = DailyBudgetMode::for_config(config);
        let spending = Self::spending_by_date(&month_txs);
        let allocation = Self::allocate_daily(available_to_spend, reference, &spending, mode);

        let today_spent = Self::discretionary_spent(&day_txs);
        let today_left = finite(allocation.daily_budget - today_spent);

        let period_spending = Self::category_breakdown(&month_txs, config.monthly_income);
        let selected_day_spending = Self::category_breakdown(&day_txs, config.monthly_income);

        let selected_day_spending_txs = day_txs
            .iter()
            .filter(|txn| txn.is_outflow() && txn.category.is_discretionary())
            .cloned()
            .collect();
        let filtered = match query.scope {
            ListScope::Day => filter_and_sort(&day_txs, query.filter),
            ListScope::Period => filter_and_sort(&month_txs, query.filter),
        };

        debug!(
            reference = %reference,
            ?mode,
            period_txs = month_txs.len(),
            day_txs = day_txs.len(),
            available_to_spend,
            daily_budget = allocation.daily_budget,
            "computed budget snapshot"
        );

        BudgetSnapshot {
            reference_date: reference,
            days_in_month: days_in_month(reference),
            mode,
            financials,
            base_available_to_spend: financials.available_to_spend,
            income_adjustments,
            available_to_spend,
            discretionary_spent,
            period_left,
            daily_budget: allocation.daily_budget,
            overspent_days: allocation.overspent_days,
            today_spent,
            today_left,
            period_spending,
            selected_day_spending,
            period_log: period_log(&month_txs),
            selected_day_spending_txs,
            filtered,
            allocation,
        }
    }

    /// Transactions in the calendar month containing `reference`.
    pub fn period_transactions(transactions: &[Transaction], reference: NaiveDate) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|txn| same_month(txn.date, reference))
            .cloned()
            .collect()
    }

    /// Total discretionary outflow.
    pub fn discretionary_spent(transactions: &[Transaction]) -> f64 {
        finite(transactions.iter().map(Transaction::discretionary_spend).sum())
    }

    /// Total unplanned income (positive user entries).
    pub fn income_adjustments(transactions: &[Transaction]) -> f64 {
        finite(transactions.iter().map(Transaction::income_adjustment).sum())
    }

    /// Discretionary outflow aggregated per calendar date.
    pub fn spending_by_date(transactions: &[Transaction]) -> BTreeMap<NaiveDate, f64> {
        let mut totals = BTreeMap::new();
        for txn in transactions {
            let spend = txn.discretionary_spend();
            if spend > 0.0 {
                *totals.entry(txn.date).or_insert(0.0) += spend;
            }
        }
        totals
    }

    /// Allocates `available` across the month containing `reference`.
    ///
    /// In rollover mode each day's budget is the remaining money divided by the days
    /// left including that day, and the day's actual spend (not its allotment) is then
    /// deducted, so surpluses and deficits both carry forward.
    pub fn allocate_daily(
        available: f64,
        reference: NaiveDate,
        spending: &BTreeMap<NaiveDate, f64>,
        mode: DailyBudgetMode,
    ) -> DailyAllocation {
        let dim = days_in_month(reference);
        let base_daily = safe_div(available, f64::from(dim));
        let mut days = Vec::with_capacity(dim as usize);
        let mut daily_budget = base_daily;
        let mut overspent_days = 0;
        let mut remaining = available;

        for date in month_days(reference) {
            let spent = spending.get(&date).copied().unwrap_or(0.0);
            let budget = match mode {
                DailyBudgetMode::Fixed => base_daily,
                DailyBudgetMode::Rollover => {
                    let remaining_days = dim - date.day() + 1;
                    safe_div(remaining, f64::from(remaining_days))
                }
            };
            let overspent = spent > budget;
            if overspent {
                overspent_days += 1;
            }
            if date.day() == reference.day() {
                daily_budget = budget;
            }
            remaining -= spent;
            trace!(%date, budget, spent, remaining, "allocated day");
            days.push(DayAllocation {
                date,
                budget,
                spent,
                overspent,
            });
        }

        DailyAllocation {
            mode,
            days,
            daily_budget: finite(daily_budget),
            overspent_days,
            closing_remaining: finite(remaining),
        }
    }

    /// Net spend per discretionary category: outflows add, refunds subtract, and each
    /// category total is clamped at zero.
    pub fn category_breakdown(transactions: &[Transaction], monthly_income: f64) -> CategoryBreakdown {
        let mut totals: BTreeMap<usize, f64> = BTreeMap::new();
        for txn in transactions {
            let Some(slot) = Category::DISCRETIONARY
                .iter()
                .position(|category| *category == txn.category)
            else {
                continue;
            };
            let delta = if txn.amount < 0.0 {
                txn.amount.abs()
            } else {
                -txn.amount.abs()
            };
            *totals.entry(slot).or_insert(0.0) += delta;
        }

        let clamped: Vec<(Category, f64)> = Category::DISCRETIONARY
            .iter()
            .enumerate()
            .map(|(slot, category)| {
                let total = finite(totals.get(&slot).copied().unwrap_or(0.0)).max(0.0);
                (*category, total)
            })
            .collect();
        let total_spent: f64 = clamped.iter().map(|(_, total)| total).sum();

        let categories = clamped
            .into_iter()
            .map(|(category, total)| CategoryShare {
                category,
                total,
                share_of_spend: safe_div(total, total_spent) * 100.0,
                share_of_income: safe_div(total, monthly_income) * 100.0,
            })
            .collect();

        CategoryBreakdown {
            categories,
            total_spent,
        }
    }
}
