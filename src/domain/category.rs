//! Closed category and list-filter vocabularies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Categorises ledger activity. Bills, Savings and Income describe the plan itself;
/// the remaining categories are discretionary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Bills,
    Savings,
    Shopping,
    Transport,
    Entertainment,
    Other,
    Income,
}

impl Category {
    /// Every category in picker order.
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Bills,
        Category::Savings,
        Category::Shopping,
        Category::Transport,
        Category::Entertainment,
        Category::Income,
        Category::Other,
    ];

    /// Discretionary categories in breakdown order.
    pub const DISCRETIONARY: [Category; 5] = [
        Category::Food,
        Category::Shopping,
        Category::Transport,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn is_discretionary(self) -> bool {
        match self {
            Category::Food
            | Category::Shopping
            | Category::Transport
            | Category::Entertainment
            | Category::Other => true,
            Category::Bills | Category::Savings | Category::Income => false,
        }
    }

    /// Position of plan categories when system entries are listed together.
    pub fn system_rank(self) -> Option<u8> {
        match self {
            Category::Bills => Some(0),
            Category::Savings => Some(1),
            Category::Income => Some(2),
            Category::Food
            | Category::Shopping
            | Category::Transport
            | Category::Entertainment
            | Category::Other => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Bills => "Bills",
            Category::Savings => "Savings",
            Category::Shopping => "Shopping",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
            Category::Income => "Income",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User-selectable filter applied to transaction lists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum TransactionFilter {
    #[default]
    All,
    Spending,
    Bills,
    Savings,
    Income,
}

impl TransactionFilter {
    pub const ALL: [TransactionFilter; 5] = [
        TransactionFilter::All,
        TransactionFilter::Spending,
        TransactionFilter::Bills,
        TransactionFilter::Savings,
        TransactionFilter::Income,
    ];

    pub fn matches(self, category: Category) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Spending => category.is_discretionary(),
            TransactionFilter::Bills => category == Category::Bills,
            TransactionFilter::Savings => category == Category::Savings,
            TransactionFilter::Income => category == Category::Income,
        }
    }
}

impl fmt::Display for TransactionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionFilter::All => "All",
            TransactionFilter::Spending => "Spending",
            TransactionFilter::Bills => "Bills",
            TransactionFilter::Savings => "Savings",
            TransactionFilter::Income => "Income",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discretionary_set_excludes_plan_categories() {
        let plan: Vec<_> = Category::ALL
            .iter()
            .copied()
            .filter(|category| !category.is_discretionary())
            .collect();
        assert_eq!(plan.len(), 3);
        assert!(plan.iter().all(|category| category.system_rank().is_some()));
        assert!(Category::DISCRETIONARY
            .iter()
            .all(|category| category.is_discretionary()));
    }

    #[test]
    fn spending_filter_matches_only_discretionary_categories() {
        assert!(TransactionFilter::Spending.matches(Category::Food));
        assert!(TransactionFilter::Spending.matches(Category::Other));
        assert!(!TransactionFilter::Spending.matches(Category::Bills));
        assert!(!TransactionFilter::Spending.matches(Category::Income));
        assert!(TransactionFilter::Savings.matches(Category::Savings));
        assert!(!TransactionFilter::Savings.matches(Category::Bills));
    }

    #[test]
    fn categories_serialize_as_plain_names() {
        let json = serde_json::to_string(&Category::Entertainment).unwrap();
        assert_eq!(json, "\"Entertainment\"");
        let parsed: Category = serde_json::from_str("\"Income\"").unwrap();
        assert_eq!(parsed, Category::Income);
    }
}
