//! The user's budget plan: income, recurring bills, savings goal and daily policy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::dates::generate_id;
use crate::domain::common::{Identifiable, NamedEntity};

/// A recurring monthly obligation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: String,
    pub name: String,
    pub amount: f64,
}

impl Bill {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            amount,
        }
    }
}

impl Identifiable for Bill {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Bill {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Savings target, either a share of monthly income or a flat amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SavingsGoal {
    Percent { percent: f64 },
    Fixed { amount: f64 },
}

impl SavingsGoal {
    /// Resolves the goal against a monthly income.
    pub fn amount_for(&self, monthly_income: f64) -> f64 {
        match *self {
            SavingsGoal::Percent { percent } => monthly_income * (percent / 100.0),
            SavingsGoal::Fixed { amount } => amount,
        }
    }

    fn normalized(self) -> Self {
        match self {
            SavingsGoal::Percent { percent } => SavingsGoal::Percent {
                percent: finite_or_zero(percent),
            },
            SavingsGoal::Fixed { amount } => SavingsGoal::Fixed {
                amount: finite_or_zero(amount),
            },
        }
    }
}

impl Default for SavingsGoal {
    fn default() -> Self {
        SavingsGoal::Percent { percent: 0.0 }
    }
}

/// The active budget plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetConfig {
    /// Date stamped on generated system transactions.
    pub start_date: NaiveDate,
    pub monthly_income: f64,
    #[serde(default)]
    pub bills: Vec<Bill>,
    pub savings_goal: SavingsGoal,
    /// Absent in older snapshots; absent means a fixed daily budget.
    #[serde(default)]
    pub rollover_unspent: bool,
}

impl BudgetConfig {
    pub fn new(start_date: NaiveDate, monthly_income: f64, savings_goal: SavingsGoal) -> Self {
        Self {
            start_date,
            monthly_income,
            bills: Vec::new(),
            savings_goal,
            rollover_unspent: false,
        }
    }

    pub fn with_bill(mut self, bill: Bill) -> Self {
        self.bills.push(bill);
        self
    }

    pub fn with_rollover(mut self, rollover_unspent: bool) -> Self {
        self.rollover_unspent = rollover_unspent;
        self
    }

    /// Applies the rules a config must satisfy before it is persisted: bills with a
    /// blank name are dropped, non-finite numbers become zero, and income and bill
    /// amounts are clamped to be non-negative.
    pub fn normalized(&self) -> Self {
        let bills = self
            .bills
            .iter()
            .filter(|bill| !bill.name().trim().is_empty())
            .map(|bill| Bill {
                id: bill.id.clone(),
                name: bill.name.clone(),
                amount: non_negative(bill.amount),
            })
            .collect();
        Self {
            start_date: self.start_date,
            monthly_income: non_negative(self.monthly_income),
            bills,
            savings_goal: self.savings_goal.normalized(),
            rollover_unspent: self.rollover_unspent,
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn non_negative(value: f64) -> f64 {
    finite_or_zero(value).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    #[test]
    fn percent_goal_scales_with_income() {
        let goal = SavingsGoal::Percent { percent: 10.0 };
        assert_eq!(goal.amount_for(3000.0), 300.0);
        let fixed = SavingsGoal::Fixed { amount: 250.0 };
        assert_eq!(fixed.amount_for(3000.0), 250.0);
    }

    #[test]
    fn normalized_drops_blank_bills_and_non_finite_values() {
        let config = BudgetConfig::new(start(), f64::NAN, SavingsGoal::Fixed { amount: f64::INFINITY })
            .with_bill(Bill::new("Rent", 1200.0))
            .with_bill(Bill::new("   ", 50.0))
            .with_bill(Bill::new("Phone", f64::NAN));
        let normalized = config.normalized();
        assert_eq!(normalized.monthly_income, 0.0);
        assert_eq!(normalized.savings_goal, SavingsGoal::Fixed { amount: 0.0 });
        let names: Vec<_> = normalized.bills.iter().map(|bill| bill.name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Phone"]);
        assert_eq!(normalized.bills[1].amount, 0.0);
    }

    #[test]
    fn normalized_clamps_negative_income_and_bills() {
        let config = BudgetConfig::new(start(), -500.0, SavingsGoal::Percent { percent: 10.0 })
            .with_bill(Bill::new("Phone", -40.0))
            .with_bill(Bill::new("Rent", 900.0));
        let normalized = config.normalized();
        assert_eq!(normalized.monthly_income, 0.0);
        let amounts: Vec<_> = normalized.bills.iter().map(|bill| bill.amount).collect();
        assert_eq!(amounts, vec![0.0, 900.0]);
    }

    #[test]
    fn missing_rollover_flag_reads_as_fixed_mode() {
        let raw = r#"{
            "startDate": "2024-02-01",
            "monthlyIncome": 3000,
            "bills": [{"id": "1", "name": "Rent", "amount": 1000}],
            "savingsGoal": {"mode": "percent", "percent": 10}
        }"#;
        let config: BudgetConfig = serde_json::from_str(raw).unwrap();
        assert!(!config.rollover_unspent);
        assert_eq!(config.savings_goal, SavingsGoal::Percent { percent: 10.0 });
        assert_eq!(config.bills.len(), 1);
    }

    #[test]
    fn fixed_goal_serializes_with_mode_tag() {
        let json = serde_json::to_string(&SavingsGoal::Fixed { amount: 150.0 }).unwrap();
        assert_eq!(json, r#"{"mode":"fixed","amount":150.0}"#);
    }
}
