//! Account-store domain models: accounts, transactions, recurring payments and goals.

pub mod account;
pub mod category;
pub mod database;
pub mod frequency;
pub mod receipt;
pub mod recurring;
pub mod savings;
pub mod transaction;

pub use account::{AccountType, BankAccount};
pub use category::{ExpenseCategory, IncomeCategory, TransactionCategory};
pub use database::Database;
pub use frequency::{Frequency, ScheduleFrequency, UnknownFrequency};
pub use receipt::{Coordinates, Receipt};
pub use recurring::{NewRecurringPayment, RecurringPayment, RecurringPaymentPatch};
pub use savings::{NewSavingsProfile, SavingsProfile, SavingsProfilePatch};
pub use transaction::{TimeRange, Transaction, TransactionFilter, TransactionKind};

use serde::{Deserialize, Deserializer};

/// Patch field reader: an absent field stays `None`, an explicit `null` becomes `Some(None)`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
