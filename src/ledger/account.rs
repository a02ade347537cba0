use serde::{Deserialize, Serialize};

use super::{recurring::RecurringPayment, transaction::Transaction};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Personal,
    Savings,
    Retirement,
    Marriage,
}

/// A bank account together with its booked transactions and recurring payment setup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub current_balance: f64,
    #[serde(default = "BankAccount::default_currency")]
    pub currency: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub recurrent_payments: Vec<RecurringPayment>,
}

impl BankAccount {
    pub fn new(id: impl Into<String>, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            account_type,
            current_balance: 0.0,
            currency: Self::default_currency(),
            transactions: Vec::new(),
            recurrent_payments: Vec::new(),
        }
    }

    pub fn default_currency() -> String {
        "CHF".into()
    }

    pub fn recurring_payment(&self, id: &str) -> Option<&RecurringPayment> {
        self.recurrent_payments.iter().find(|payment| payment.id == id)
    }

    pub fn recurring_payment_mut(&mut self, id: &str) -> Option<&mut RecurringPayment> {
        self.recurrent_payments
            .iter_mut()
            .find(|payment| payment.id == id)
    }
}
