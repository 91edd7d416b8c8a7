use serde::Serialize;

use crate::domain::BudgetConfig;

use super::finite;

/// Plan-level figures derived from a [`BudgetConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Financials {
    pub bills_total: f64,
    pub savings_amount: f64,
    /// Income minus bills minus savings; negative when the plan is over-committed.
    pub available_to_spend: f64,
}

pub struct FinancialService;

impl FinancialService {
    pub fn calculate(config: &BudgetConfig) -> Financials {
        let bills_total: f64 = config.bills.iter().map(|bill| bill.amount).sum();
        let savings_amount = config.savings_goal.amount_for(config.monthly_income);
        let available_to_spend = config.monthly_income - bills_total - savings_amount;
        Financials {
            bills_total: finite(bills_total),
            savings_amount: finite(savings_amount),
            available_to_spend: finite(available_to_spend),
        }
    }
}
