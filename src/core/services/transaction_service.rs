//! Read helpers for booked transactions.

use crate::ledger::{Database, Transaction, TransactionFilter};

pub struct TransactionService;

impl TransactionService {
    /// Transactions of every account that pass `filter`, in account then booking order.
    pub fn list<'a>(
        database: &'a Database,
        filter: Option<&TransactionFilter>,
    ) -> Vec<&'a Transaction> {
        database
            .bank_accounts
            .iter()
            .flat_map(|account| account.transactions.iter())
            .filter(|txn| filter.map_or(true, |f| f.matches(txn)))
            .collect()
    }

    /// Transactions of one account; `None` when the account does not exist.
    pub fn for_account<'a>(
        database: &'a Database,
        account_id: &str,
        filter: Option<&TransactionFilter>,
    ) -> Option<Vec<&'a Transaction>> {
        let account = database.account(account_id)?;
        Some(
            account
                .transactions
                .iter()
                .filter(|txn| filter.map_or(true, |f| f.matches(txn)))
                .collect(),
        )
    }

    /// Transactions recorded against a recurring payment, oldest first.
    pub fn for_recurring_payment<'a>(
        database: &'a Database,
        payment_id: &str,
    ) -> Vec<&'a Transaction> {
        let mut matches: Vec<&Transaction> = database
            .bank_accounts
            .iter()
            .flat_map(|account| account.transactions.iter())
            .filter(|txn| txn.recurrent_payment_id.as_deref() == Some(payment_id))
            .collect();
        matches.sort_by_key(|txn| txn.date);
        matches
    }
}
