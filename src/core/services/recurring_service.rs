//! Recurring payment lookup and maintenance across `db.json` and the standalone
//! `recurrent_payments.json` collection.

use tracing::info;

use crate::ledger::{NewRecurringPayment, RecurringPayment, RecurringPaymentPatch};
use crate::storage::JsonStore;

use super::ServiceResult;

pub struct RecurringPaymentService;

impl RecurringPaymentService {
    /// Payments embedded in accounts followed by standalone ones.
    pub fn list_all(store: &JsonStore) -> ServiceResult<Vec<RecurringPayment>> {
        let mut payments: Vec<RecurringPayment> = store
            .database()?
            .bank_accounts
            .iter()
            .flat_map(|account| account.recurrent_payments.iter().cloned())
            .collect();
        payments.extend(store.all::<RecurringPayment>()?);
        Ok(payments)
    }

    /// Payments set up on one account; `None` when the account does not exist.
    pub fn for_account(
        store: &JsonStore,
        account_id: &str,
    ) -> ServiceResult<Option<Vec<RecurringPayment>>> {
        Ok(store
            .database()?
            .account(account_id)
            .map(|account| account.recurrent_payments.clone()))
    }

    /// Standalone payments take precedence over account-embedded ones.
    pub fn get(store: &JsonStore, id: &str) -> ServiceResult<Option<RecurringPayment>> {
        if let Some(payment) = store.get::<RecurringPayment>(id)? {
            return Ok(Some(payment));
        }
        Ok(store.database()?.recurring_payment(id).cloned())
    }

    pub fn create(store: &JsonStore, draft: NewRecurringPayment) -> ServiceResult<RecurringPayment> {
        let payment = store.create::<RecurringPayment>(draft)?;
        info!("created recurring payment {} ({})", payment.id, payment.name);
        Ok(payment)
    }

    pub fn update(
        store: &mut JsonStore,
        id: &str,
        patch: RecurringPaymentPatch,
    ) -> ServiceResult<Option<RecurringPayment>> {
        if let Some(updated) = store.update::<RecurringPayment>(id, patch.clone())? {
            return Ok(Some(updated));
        }

        let mut database = store.database()?.clone();
        let Some(payment) = database.recurring_payment_mut(id) else {
            return Ok(None);
        };
        patch.apply(payment);
        let updated = payment.clone();
        store.save_database(database)?;
        info!("updated account recurring payment {}", id);
        Ok(Some(updated))
    }

    pub fn delete(store: &mut JsonStore, id: &str) -> ServiceResult<bool> {
        if store.delete::<RecurringPayment>(id)? {
            return Ok(true);
        }

        let mut database = store.database()?.clone();
        if database.remove_recurring_payment(id).is_none() {
            return Ok(false);
        }
        store.save_database(database)?;
        info!("deleted account recurring payment {}", id);
        Ok(true)
    }
}
