mod common;

use common::ymd;
use expense_macros::{
    BudgetManager, Category, ListScope, SnapshotQuery, TransactionDraft, TransactionEdit,
    TransactionFilter,
};
use expense_macros::storage::MemoryStorage;

fn seeded_manager() -> BudgetManager {
    let mut manager = BudgetManager::open(Box::new(MemoryStorage::new()));
    let config = common::sample_config(ymd(2025, 6, 1))
        .with_bill(expense_macros::Bill::new("Phone", 40.0));
    manager.save_config(config);
    for (date, amount, category) in [
        ("2025-06-01", 12.0, Category::Food),
        ("2025-06-15", 30.0, Category::Shopping),
        ("2025-06-09", 8.0, Category::Transport),
    ] {
        manager
            .add_transaction(TransactionDraft::new(date, amount, category))
            .unwrap();
    }
    manager
}

#[test]
fn period_list_puts_user_entries_before_plan_entries() {
    let manager = seeded_manager();
    let query = SnapshotQuery::for_date(ymd(2025, 6, 20)).with_scope(ListScope::Period);
    let snapshot = manager.snapshot(query).unwrap();

    let first_system = snapshot
        .filtered
        .iter()
        .position(|txn| txn.is_system)
        .expect("plan entries present");
    assert!(snapshot.filtered[..first_system].iter().all(|txn| !txn.is_system));
    assert!(snapshot.filtered[first_system..].iter().all(|txn| txn.is_system));

    let user_dates: Vec<_> = snapshot.filtered[..first_system]
        .iter()
        .map(|txn| txn.date)
        .collect();
    assert_eq!(user_dates, vec![ymd(2025, 6, 15), ymd(2025, 6, 9), ymd(2025, 6, 1)]);

    let plan: Vec<_> = snapshot.filtered[first_system..]
        .iter()
        .map(|txn| (txn.category, txn.amount))
        .collect();
    assert_eq!(
        plan,
        vec![
            (Category::Bills, -40.0),
            (Category::Bills, -1000.0),
            (Category::Savings, -300.0),
            (Category::Income, 3000.0),
        ]
    );
}

#[test]
fn day_scope_and_spending_filter() {
    let manager = seeded_manager();
    let query = SnapshotQuery::for_date(ymd(2025, 6, 1)).with_filter(TransactionFilter::Spending);
    let snapshot = manager.snapshot(query).unwrap();
    assert_eq!(snapshot.filtered.len(), 1);
    assert_eq!(snapshot.filtered[0].category, Category::Food);
    assert_eq!(snapshot.period_log.first().map(|txn| txn.date), Some(ymd(2025, 6, 15)));
}

#[test]
fn editing_moves_entry_between_days() {
    let mut manager = seeded_manager();
    let id = manager
        .transactions()
        .iter()
        .find(|txn| txn.category == Category::Shopping)
        .map(|txn| txn.id.clone())
        .unwrap();
    manager
        .edit_transaction(
            &id,
            TransactionEdit {
                date: "2025-06-01".into(),
                amount: 31.0,
                category: Category::Entertainment,
                note: Some("Cinema".into()),
            },
        )
        .unwrap();

    let snapshot = manager
        .snapshot(SnapshotQuery::for_date(ymd(2025, 6, 1)))
        .unwrap();
    assert_eq!(snapshot.today_spent, 43.0);
    assert_eq!(
        snapshot.selected_day_spending.total_for(Category::Entertainment),
        31.0
    );
    let edited = manager.transactions().iter().find(|txn| txn.id == id).unwrap();
    assert_eq!(edited.amount, -31.0);
    assert_eq!(edited.note.as_deref(), Some("Cinema"));
}
