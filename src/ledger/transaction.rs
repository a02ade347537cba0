use chrono::{serde::ts_milliseconds_option, DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::TransactionCategory;

/// A booked bank transaction. Positive amounts are income, negative amounts expenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub category: TransactionCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
    /// Recurring payment this transaction fulfilled, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrent_payment_id: Option<String>,
    /// Account balance after this transaction.
    pub balance: f64,
}

impl Transaction {
    pub fn new(amount: f64, date: DateTime<Utc>, category: impl Into<TransactionCategory>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            amount,
            date,
            category: category.into(),
            receipt_id: None,
            recurrent_payment_id: None,
            balance: 0.0,
        }
    }

    /// Links the transaction to the recurring payment occurrence it settles.
    pub fn fulfilling(mut self, recurrent_payment_id: impl Into<String>) -> Self {
        self.recurrent_payment_id = Some(recurrent_payment_id.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.amount >= 0.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Inclusive bounds in epoch milliseconds; either side may be open.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRange {
    #[serde(default, with = "ts_milliseconds_option")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, with = "ts_milliseconds_option")]
    pub end: Option<DateTime<Utc>>,
}

/// Narrows a transaction listing by time range, direction and category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<TransactionCategory>>,
}

impl TransactionFilter {
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            time_range: Some(TimeRange {
                start: Some(start),
                end: Some(end),
            }),
            ..Self::default()
        }
    }

    pub fn of_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn in_categories(mut self, categories: Vec<TransactionCategory>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(range) = &self.time_range {
            if range.start.is_some_and(|start| transaction.date < start) {
                return false;
            }
            if range.end.is_some_and(|end| transaction.date > end) {
                return false;
            }
        }
        match self.kind {
            Some(TransactionKind::Income) if transaction.amount < 0.0 => return false,
            Some(TransactionKind::Expense) if transaction.amount > 0.0 => return false,
            _ => {}
        }
        if let Some(categories) = &self.categories {
            if !categories.contains(&transaction.category) {
                return false;
            }
        }
        true
    }
}
