use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::common::{Displayable, Identifiable};

/// A record of money moving in (positive) or out (negative) on a given day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub is_system: bool,
}

impl Transaction {
    /// Builds a user-entered transaction.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        amount: f64,
        category: Category,
        note: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            amount,
            category,
            note,
            is_system: false,
        }
    }

    /// Builds an entry owned by the budget configuration.
    pub fn system(
        id: impl Into<String>,
        date: NaiveDate,
        amount: f64,
        category: Category,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            amount,
            category,
            note: Some(note.into()),
            is_system: true,
        }
    }

    pub fn is_outflow(&self) -> bool {
        self.amount < 0.0
    }

    pub fn is_inflow(&self) -> bool {
        self.amount > 0.0
    }

    /// Outflow counted against the discretionary budget, zero otherwise.
    pub fn discretionary_spend(&self) -> f64 {
        if self.is_outflow() && self.category.is_discretionary() {
            self.amount.abs()
        } else {
            0.0
        }
    }

    /// Unplanned income: a positive, user-entered amount.
    pub fn income_adjustment(&self) -> f64 {
        if !self.is_system && self.is_inflow() {
            self.amount.abs()
        } else {
            0.0
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        let origin = if self.is_system { "system" } else { "user" };
        format!(
            "txn:{} {} {:.2} {} [{}]",
            self.id, self.date, self.amount, self.category, origin
        )
    }
}

/// Direction selected when entering a new transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Flow {
    Inflow,
    #[default]
    Outflow,
}

impl Flow {
    /// Applies the direction to a user-typed magnitude.
    pub fn signed(self, magnitude: f64) -> f64 {
        match self {
            Flow::Inflow => magnitude.abs(),
            Flow::Outflow => -magnitude.abs(),
        }
    }
}

/// Raw user input for a new transaction, validated before it touches the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub date: String,
    pub amount: f64,
    pub flow: Flow,
    pub category: Category,
    pub note: Option<String>,
}

impl TransactionDraft {
    /// An outflow draft; use [`TransactionDraft::inflow`] for income.
    pub fn new(date: impl Into<String>, amount: f64, category: Category) -> Self {
        Self {
            date: date.into(),
            amount,
            flow: Flow::Outflow,
            category,
            note: None,
        }
    }

    pub fn inflow(mut self) -> Self {
        self.flow = Flow::Inflow;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Replacement fields for an existing transaction. The sign of the stored amount is
/// preserved; `amount` is the new magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEdit {
    pub date: String,
    pub amount: f64,
    pub category: Category,
    pub note: Option<String>,
}
