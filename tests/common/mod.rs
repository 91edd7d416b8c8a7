#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use expense_macros::{storage::JsonStorage, Bill, BudgetConfig, BudgetManager, SavingsGoal};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a JSON-backed manager in a unique directory, returning the storage root.
pub fn setup_test_env() -> (BudgetManager, std::path::PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().join("data");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let storage = JsonStorage::new(base.clone()).expect("create json storage backend");
    (BudgetManager::open(Box::new(storage)), base)
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// 3000 income, one 1000 bill, 10% savings: 1700 available.
pub fn sample_config(start: NaiveDate) -> BudgetConfig {
    BudgetConfig::new(start, 3000.0, SavingsGoal::Percent { percent: 10.0 })
        .with_bill(Bill::new("Rent", 1000.0))
}
