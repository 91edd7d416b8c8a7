pub mod category;
pub mod common;
pub mod config;
pub mod transaction;

pub use category::{Category, TransactionFilter};
pub use common::{Displayable, Identifiable, NamedEntity};
pub use config::{Bill, BudgetConfig, SavingsGoal};
pub use transaction::{Flow, Transaction, TransactionDraft, TransactionEdit};
