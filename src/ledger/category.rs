use std::fmt;

use serde::{Deserialize, Serialize};

/// Spending buckets used by expense transactions and recurring payments.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Food,
    Groceries,
    Transport,
    Housing,
    Utilities,
    Healthcare,
    Entertainment,
    Education,
    Shopping,
    Travel,
    Other,
}

/// Sources of incoming money.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IncomeCategory {
    Salary,
    Freelance,
    Investments,
    Gifts,
    Refunds,
    /// Records the opening balance of an account.
    InitialDeposit,
    Other,
}

/// Category attached to a transaction: either side of the ledger.
///
/// `"other"` exists on both sides and deserializes as [`ExpenseCategory::Other`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum TransactionCategory {
    Expense(ExpenseCategory),
    Income(IncomeCategory),
}

impl TransactionCategory {
    pub fn is_income(&self) -> bool {
        matches!(self, TransactionCategory::Income(_))
    }
}

impl From<ExpenseCategory> for TransactionCategory {
    fn from(category: ExpenseCategory) -> Self {
        TransactionCategory::Expense(category)
    }
}

impl From<IncomeCategory> for TransactionCategory {
    fn from(category: IncomeCategory) -> Self {
        TransactionCategory::Income(category)
    }
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = serde_json::to_value(self).map_err(|_| fmt::Error)?;
        f.write_str(value.as_str().unwrap_or_default())
    }
}
