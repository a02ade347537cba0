pub mod json_backend;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    errors::StoreError,
    ledger::{
        database::{recurring_payment_issues, savings_profile_issues},
        Database, NewRecurringPayment, NewSavingsProfile, RecurringPayment,
        RecurringPaymentPatch, SavingsProfile, SavingsProfilePatch, Transaction,
        TransactionFilter,
    },
};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Read-only access to the data a projection needs for one account.
///
/// `None` means the account does not exist. Implementations hand out copies, so callers
/// never observe or cause mutation of the underlying store.
pub trait AccountRepository: Send + Sync {
    fn transactions_for_account(
        &self,
        account_id: &str,
        filter: Option<&TransactionFilter>,
    ) -> Option<Vec<Transaction>>;

    fn recurring_payments_for_account(&self, account_id: &str) -> Option<Vec<RecurringPayment>>;
}

impl AccountRepository for Database {
    fn transactions_for_account(
        &self,
        account_id: &str,
        filter: Option<&TransactionFilter>,
    ) -> Option<Vec<Transaction>> {
        let account = self.account(account_id)?;
        Some(
            account
                .transactions
                .iter()
                .filter(|txn| filter.map_or(true, |f| f.matches(txn)))
                .cloned()
                .collect(),
        )
    }

    fn recurring_payments_for_account(&self, account_id: &str) -> Option<Vec<RecurringPayment>> {
        self.account(account_id)
            .map(|account| account.recurrent_payments.clone())
    }
}

/// A record kept in its own JSON collection file next to `db.json`.
pub trait StoredRecord: Serialize + DeserializeOwned + Clone {
    const FILE_NAME: &'static str;
    type Draft;
    type Patch;

    fn id(&self) -> &str;
    fn from_draft(id: String, draft: Self::Draft, now: DateTime<Utc>) -> Self;
    fn apply_patch(&mut self, patch: Self::Patch);
    /// Schema violations that must block a write.
    fn issues(&self) -> Vec<String>;
}

impl StoredRecord for RecurringPayment {
    const FILE_NAME: &'static str = "recurrent_payments.json";
    type Draft = NewRecurringPayment;
    type Patch = RecurringPaymentPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewRecurringPayment, _now: DateTime<Utc>) -> Self {
        Self {
            id,
            amount: draft.amount,
            name: draft.name,
            category: draft.category,
            frequency: draft.frequency,
            start_date: draft.start_date,
            end_date: draft.end_date,
            auto_pay: draft.auto_pay,
            savings_profile: draft.savings_profile,
        }
    }

    fn apply_patch(&mut self, patch: RecurringPaymentPatch) {
        patch.apply(self);
    }

    fn issues(&self) -> Vec<String> {
        recurring_payment_issues(self)
    }
}

impl StoredRecord for SavingsProfile {
    const FILE_NAME: &'static str = "savings.json";
    type Draft = NewSavingsProfile;
    type Patch = SavingsProfilePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewSavingsProfile, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            current_amount: 0.0,
            target_amount: draft.target_amount,
            start_date: now,
            target_date: draft.target_date,
            category: draft.category,
        }
    }

    fn apply_patch(&mut self, patch: SavingsProfilePatch) {
        patch.apply(self);
    }

    fn issues(&self) -> Vec<String> {
        savings_profile_issues(self)
    }
}

pub use json_backend::{load_database_from_path, save_database_to_path, JsonStore};
