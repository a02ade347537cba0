use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    account::BankAccount,
    receipt::{Receipt, LATITUDE_RANGE, LONGITUDE_RANGE},
    recurring::RecurringPayment,
    savings::SavingsProfile,
};

/// Prefix of hosted asset identifiers accepted in place of UUIDs.
pub const HOSTED_ID_PREFIX: &str = "https://static.rwpz.net/spendcast/";

/// Root document of `db.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    #[serde(default)]
    pub bank_accounts: Vec<BankAccount>,
    #[serde(default)]
    pub receipts: Vec<Receipt>,
    #[serde(default)]
    pub savings_profiles: Vec<SavingsProfile>,
}

impl Database {
    pub fn account(&self, id: &str) -> Option<&BankAccount> {
        self.bank_accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: &str) -> Option<&mut BankAccount> {
        self.bank_accounts.iter_mut().find(|account| account.id == id)
    }

    /// Looks a recurring payment up across every account.
    pub fn recurring_payment(&self, id: &str) -> Option<&RecurringPayment> {
        self.bank_accounts
            .iter()
            .find_map(|account| account.recurring_payment(id))
    }

    pub fn recurring_payment_mut(&mut self, id: &str) -> Option<&mut RecurringPayment> {
        self.bank_accounts
            .iter_mut()
            .find_map(|account| account.recurring_payment_mut(id))
    }

    /// Removes a recurring payment from whichever account holds it.
    pub fn remove_recurring_payment(&mut self, id: &str) -> Option<RecurringPayment> {
        self.bank_accounts.iter_mut().find_map(|account| {
            let index = account
                .recurrent_payments
                .iter()
                .position(|payment| payment.id == id)?;
            Some(account.recurrent_payments.remove(index))
        })
    }

    /// Checks the constraints the JSON schema places on a database snapshot.
    ///
    /// Returns every violation found rather than stopping at the first one.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut issues = Vec::new();

        for account in &self.bank_accounts {
            check_id(&mut issues, "bank account", &account.id);
            for txn in &account.transactions {
                check_id(&mut issues, "transaction", &txn.id);
                if let Some(receipt) = &txn.receipt_id {
                    check_id(&mut issues, "transaction receipt reference", receipt);
                }
                if let Some(payment) = &txn.recurrent_payment_id {
                    check_id(&mut issues, "transaction recurring payment reference", payment);
                }
            }
            for payment in &account.recurrent_payments {
                check_id(&mut issues, "recurring payment", &payment.id);
                issues.extend(recurring_payment_issues(payment));
            }
        }

        for receipt in &self.receipts {
            check_id(&mut issues, "receipt", &receipt.id);
            if !receipt.location.in_bounds() {
                issues.push(format!(
                    "receipt {} location ({}, {}) outside latitude {:?} / longitude {:?}",
                    receipt.id,
                    receipt.location.latitude,
                    receipt.location.longitude,
                    LATITUDE_RANGE,
                    LONGITUDE_RANGE
                ));
            }
        }

        for profile in &self.savings_profiles {
            check_id(&mut issues, "savings profile", &profile.id);
            issues.extend(savings_profile_issues(profile));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

pub(crate) fn recurring_payment_issues(payment: &RecurringPayment) -> Vec<String> {
    let mut issues = Vec::new();
    if !(payment.amount > 0.0) {
        issues.push(format!(
            "recurring payment {} amount must be positive, got {}",
            payment.id, payment.amount
        ));
    }
    issues
}

pub(crate) fn savings_profile_issues(profile: &SavingsProfile) -> Vec<String> {
    let mut issues = Vec::new();
    if profile.current_amount < 0.0 {
        issues.push(format!(
            "savings profile {} current amount must not be negative",
            profile.id
        ));
    }
    if !(profile.target_amount > 0.0) {
        issues.push(format!(
            "savings profile {} target amount must be positive",
            profile.id
        ));
    }
    issues
}

pub fn is_valid_id(id: &str) -> bool {
    Uuid::parse_str(id).is_ok() || id.starts_with(HOSTED_ID_PREFIX)
}

fn check_id(issues: &mut Vec<String>, what: &str, id: &str) {
    if !is_valid_id(id) {
        issues.push(format!("{what} id `{id}` is neither a UUID nor a hosted asset id"));
    }
}
