use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::core::time::Clock;
use crate::ledger::{AccountType, BankAccount, Database};

const RECENT_ACTIVITY_DAYS: i64 = 30;

/// Account overview without the full transaction list.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub current_balance: f64,
    pub currency: String,
    pub transaction_count: usize,
    pub recurrent_payment_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transaction_date: Option<DateTime<Utc>>,
    /// Expenses booked in the 30 days before now, as a positive number.
    pub monthly_expense_total: f64,
    /// Income booked in the 30 days before now.
    pub monthly_income_total: f64,
}

pub struct AccountService;

impl AccountService {
    pub fn summaries(database: &Database, clock: &dyn Clock) -> Vec<BankAccountSummary> {
        let since = clock.now() - Duration::days(RECENT_ACTIVITY_DAYS);
        database
            .bank_accounts
            .iter()
            .map(|account| Self::summarize(account, since))
            .collect()
    }

    pub fn summary(
        database: &Database,
        account_id: &str,
        clock: &dyn Clock,
    ) -> Option<BankAccountSummary> {
        let since = clock.now() - Duration::days(RECENT_ACTIVITY_DAYS);
        database
            .account(account_id)
            .map(|account| Self::summarize(account, since))
    }

    fn summarize(account: &BankAccount, since: DateTime<Utc>) -> BankAccountSummary {
        let last_transaction_date = account.transactions.iter().map(|txn| txn.date).max();
        let (expenses, income) = account
            .transactions
            .iter()
            .filter(|txn| txn.date >= since)
            .fold((0.0, 0.0), |(expenses, income), txn| {
                if txn.amount < 0.0 {
                    (expenses + txn.amount.abs(), income)
                } else {
                    (expenses, income + txn.amount)
                }
            });

        BankAccountSummary {
            id: account.id.clone(),
            name: account.name.clone(),
            account_type: account.account_type,
            current_balance: account.current_balance,
            currency: account.currency.clone(),
            transaction_count: account.transactions.len(),
            recurrent_payment_count: account.recurrent_payments.len(),
            last_transaction_date,
            monthly_expense_total: expenses,
            monthly_income_total: income,
        }
    }
}
