#![allow(dead_code)]

use std::{fs, path::Path, sync::Mutex};

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use spendcast_core::{
    ledger::{
        AccountType, BankAccount, Database, ExpenseCategory, Frequency, RecurringPayment,
        Transaction,
    },
    storage::JsonStore,
};
use tempfile::TempDir;
use uuid::Uuid;

pub const CHECKING_ID: &str = "2f1c6d3e-6a8b-4a39-9a0e-0d6c7d1b4a10";
pub const RENT_ID: &str = "7d4f0b5e-1c2a-4e6b-8f3d-9a1b2c3d4e50";
pub const INSURANCE_ID: &str = "c3a9e2f1-5b7d-4c8e-a6f0-1b2c3d4e5f60";

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Midnight UTC on the given calendar day.
pub fn ts(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid fixture date")
}

pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn payment(id: &str, frequency: Frequency, start: DateTime<Utc>) -> RecurringPayment {
    let mut payment = RecurringPayment::new(id, "Fixture payment", 100.0, frequency, start);
    payment.category = ExpenseCategory::Housing;
    payment
}

/// Expense transaction settling `payment_id` at `date`.
pub fn settlement(payment_id: &str, date: DateTime<Utc>, amount: f64) -> Transaction {
    Transaction::new(-amount, date, ExpenseCategory::Housing).fulfilling(payment_id)
}

/// A single checking account carrying `payments` and `transactions`.
pub fn database_with(payments: Vec<RecurringPayment>, transactions: Vec<Transaction>) -> Database {
    let mut account = BankAccount::new(CHECKING_ID, "Checking", AccountType::Personal);
    account.current_balance = 5_000.0;
    account.recurrent_payments = payments;
    account.transactions = transactions;
    Database {
        bank_accounts: vec![account],
        ..Database::default()
    }
}

/// Monthly rent from 2024-01-15 on the checking account, nothing paid yet.
pub fn rent_database() -> Database {
    database_with(vec![payment(RENT_ID, Frequency::Monthly, ts(2024, 1, 15))], Vec::new())
}

pub fn write_database(dir: &Path, database: &Database) {
    let json = serde_json::to_string_pretty(database).expect("serialize fixture database");
    fs::write(dir.join("db.json"), json).expect("write fixture database");
}

/// Creates a store in a unique temp directory seeded with `database`.
pub fn temp_store(database: &Database) -> JsonStore {
    let temp = TempDir::new().expect("create temp dir");
    let root = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    write_database(&root, database);
    JsonStore::new(root).expect("open json store")
}
