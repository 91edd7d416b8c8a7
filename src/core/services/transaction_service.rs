//! Validated mutations over the transaction list.
//!
//! Every operation validates its input before touching `transactions`, so a rejected
//! call leaves the list exactly as it was.

use chrono::NaiveDate;
use tracing::debug;

use crate::core::dates::{generate_unique_id, parse_iso_date};
use crate::domain::common::{contains_id, Displayable};
use crate::domain::{Transaction, TransactionDraft, TransactionEdit};
use crate::errors::BudgetError;

use super::{ServiceError, ServiceResult};

pub struct TransactionService;

impl TransactionService {
    /// Adds a user transaction at the front of the list and returns its identifier.
    pub fn add(transactions: &mut Vec<Transaction>, draft: TransactionDraft) -> ServiceResult<String> {
        let date = Self::validate_date(&draft.date)?;
        let magnitude = Self::validate_amount(draft.amount)?;
        let id = generate_unique_id(|candidate| contains_id(transactions.as_slice(), candidate));
        let txn = Transaction::new(
            id.clone(),
            date,
            draft.flow.signed(magnitude),
            draft.category,
            clean_note(draft.note),
        );
        debug!(txn = %txn.display_label(), "adding transaction");
        transactions.insert(0, txn);
        Ok(id)
    }

    /// Replaces date, magnitude, category and note of the transaction `id`. The id,
    /// the system flag and the direction of the stored amount are preserved.
    pub fn edit(
        transactions: &mut [Transaction],
        id: &str,
        edit: TransactionEdit,
    ) -> ServiceResult<()> {
        let date = Self::validate_date(&edit.date)?;
        let magnitude = Self::validate_amount(edit.amount)?;
        let txn = transactions
            .iter_mut()
            .find(|txn| txn.id == id)
            .ok_or_else(|| BudgetError::TransactionNotFound(id.to_string()))?;
        txn.amount = if txn.amount >= 0.0 {
            magnitude.abs()
        } else {
            -magnitude.abs()
        };
        txn.date = date;
        txn.category = edit.category;
        txn.note = clean_note(edit.note);
        debug!(txn = %txn.display_label(), "edited transaction");
        Ok(())
    }

    /// Removes the transaction `id`, returning the removed instance.
    pub fn remove(transactions: &mut Vec<Transaction>, id: &str) -> ServiceResult<Transaction> {
        let index = transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or_else(|| BudgetError::TransactionNotFound(id.to_string()))?;
        Ok(transactions.remove(index))
    }

    fn validate_date(raw: &str) -> ServiceResult<NaiveDate> {
        if raw.trim().is_empty() {
            return Err(ServiceError::Invalid("Date is required".into()));
        }
        parse_iso_date(raw)
            .ok_or_else(|| ServiceError::Invalid(format!("Invalid date `{}`, expected YYYY-MM-DD", raw)))
    }

    fn validate_amount(amount: f64) -> ServiceResult<f64> {
        if !amount.is_finite() {
            return Err(ServiceError::Invalid("Amount must be a number".into()));
        }
        if amount == 0.0 {
            return Err(ServiceError::Invalid("Amount must not be zero".into()));
        }
        Ok(amount.abs())
    }
}

fn clean_note(note: Option<String>) -> Option<String> {
    note.map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn ledger() -> Vec<Transaction> {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        vec![
            Transaction::new("food", date, -20.0, Category::Food, Some("Lunch".into())),
            Transaction::new("bonus", date, 150.0, Category::Income, None),
        ]
    }

    #[test]
    fn add_signs_amount_and_prepends() {
        let mut txns = ledger();
        let id = TransactionService::add(
            &mut txns,
            TransactionDraft::new("2024-06-04", 12.5, Category::Transport).with_note("  Bus "),
        )
        .unwrap();
        assert_eq!(txns.len(), 3);
        assert_eq!(txns[0].id, id);
        assert_eq!(txns[0].amount, -12.5);
        assert_eq!(txns[0].note.as_deref(), Some("Bus"));
        assert!(!txns[0].is_system);

        TransactionService::add(
            &mut txns,
            TransactionDraft::new("2024-06-04", -40.0, Category::Income).inflow(),
        )
        .unwrap();
        assert_eq!(txns[0].amount, 40.0);
    }

    #[test]
    fn add_rejects_zero_nan_and_bad_dates_without_mutation() {
        let mut txns = ledger();
        let before = txns.clone();
        for draft in [
            TransactionDraft::new("2024-06-04", 0.0, Category::Food),
            TransactionDraft::new("2024-06-04", f64::NAN, Category::Food),
            TransactionDraft::new("", 5.0, Category::Food),
            TransactionDraft::new("2024-02-30", 5.0, Category::Food),
        ] {
            let err = TransactionService::add(&mut txns, draft).expect_err("must reject");
            assert!(matches!(err, ServiceError::Invalid(_)), "unexpected error: {err:?}");
        }
        assert_eq!(txns, before);
    }

    #[test]
    fn edit_preserves_id_and_direction() {
        let mut txns = ledger();
        TransactionService::edit(
            &mut txns,
            "food",
            TransactionEdit {
                date: "2024-06-05".into(),
                amount: 35.0,
                category: Category::Shopping,
                note: None,
            },
        )
        .unwrap();
        assert_eq!(txns[0].id, "food");
        assert_eq!(txns[0].amount, -35.0);
        assert_eq!(txns[0].category, Category::Shopping);
        assert_eq!(txns[0].note, None);

        TransactionService::edit(
            &mut txns,
            "bonus",
            TransactionEdit {
                date: "2024-06-05".into(),
                amount: -90.0,
                category: Category::Income,
                note: Some("Refund".into()),
            },
        )
        .unwrap();
        assert_eq!(txns[1].amount, 90.0);
    }

    #[test]
    fn edit_validates_before_lookup() {
        let mut txns = ledger();
        let before = txns.clone();
        let err = TransactionService::edit(
            &mut txns,
            "food",
            TransactionEdit {
                date: String::new(),
                amount: 10.0,
                category: Category::Food,
                note: None,
            },
        )
        .expect_err("blank date must be rejected");
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert_eq!(txns, before);

        let err = TransactionService::edit(
            &mut txns,
            "missing",
            TransactionEdit {
                date: "2024-06-05".into(),
                amount: 10.0,
                category: Category::Food,
                note: None,
            },
        )
        .expect_err("unknown id must fail");
        assert!(matches!(err, ServiceError::Core(BudgetError::TransactionNotFound(_))));
    }

    #[test]
    fn remove_returns_deleted_transaction() {
        let mut txns = ledger();
        let removed = TransactionService::remove(&mut txns, "bonus").unwrap();
        assert_eq!(removed.id, "bonus");
        assert_eq!(txns.len(), 1);
        assert!(TransactionService::remove(&mut txns, "bonus").is_err());
    }
}
