use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::{
    recurrence::RecurrenceCalculator,
    types::{OutstandingPayment, ProjectionReport, ProjectionWarning, ProjectionWindow},
};
use crate::{
    config::{FrequencyPolicy, ProjectionSettings},
    errors::ProjectionError,
    ledger::{RecurringPayment, Transaction, TransactionFilter},
    storage::AccountRepository,
};

/// Projects which recurring payment occurrences in a window have not been paid yet.
pub struct ProjectionEngine<'r> {
    repository: &'r dyn AccountRepository,
    calculator: RecurrenceCalculator,
    settings: ProjectionSettings,
}

struct PaymentProjection {
    outstanding: Vec<OutstandingPayment>,
    warning: Option<ProjectionWarning>,
}

impl<'r> ProjectionEngine<'r> {
    pub fn new(repository: &'r dyn AccountRepository) -> Self {
        Self {
            repository,
            calculator: RecurrenceCalculator::default(),
            settings: ProjectionSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ProjectionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_calculator(mut self, calculator: RecurrenceCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn settings(&self) -> &ProjectionSettings {
        &self.settings
    }

    /// Same as [`Self::project_outstanding`] with epoch-millisecond bounds and no filter.
    pub fn project_millis(
        &self,
        account_id: &str,
        start: i64,
        end: i64,
    ) -> Result<ProjectionReport, ProjectionError> {
        let window = ProjectionWindow::from_millis(start, end)?;
        self.project_outstanding(account_id, window, None)
    }

    /// Lists every occurrence of the account's recurring payments inside `window` that
    /// no transaction has been recorded against.
    ///
    /// Results follow the account's payment order, chronological within a payment.
    /// A payment with an unrecognized frequency is skipped with a warning unless the
    /// frequency policy is [`FrequencyPolicy::Strict`].
    pub fn project_outstanding(
        &self,
        account_id: &str,
        window: ProjectionWindow,
        filter: Option<&TransactionFilter>,
    ) -> Result<ProjectionReport, ProjectionError> {
        window.validate()?;
        debug!(
            "projecting outstanding payments for account {} in [{}, {})",
            account_id, window.start, window.end
        );

        let transactions = self
            .repository
            .transactions_for_account(account_id, filter)
            .ok_or_else(|| ProjectionError::AccountNotFound(account_id.to_string()))?;
        let payments = self
            .repository
            .recurring_payments_for_account(account_id)
            .ok_or_else(|| ProjectionError::AccountNotFound(account_id.to_string()))?;

        let fulfilled = fulfilled_instants(&transactions);
        let mut report = ProjectionReport::default();

        for payment in &payments {
            match self.project_payment(payment, window, fulfilled.get(payment.id.as_str())) {
                Ok(projection) => {
                    report.outstanding.extend(projection.outstanding);
                    report.warnings.extend(projection.warning);
                }
                Err(ProjectionError::InvalidFrequency {
                    payment_id,
                    frequency,
                }) if self.settings.frequency_policy == FrequencyPolicy::Skip => {
                    warn!(
                        "skipping recurring payment {} with unrecognized frequency `{}`",
                        payment_id, frequency
                    );
                    report.warnings.push(ProjectionWarning::InvalidFrequency {
                        payment_id,
                        frequency,
                    });
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            "account {}: {} outstanding across {} recurring payment(s), {} warning(s)",
            account_id,
            report.outstanding.len(),
            payments.len(),
            report.warnings.len()
        );
        Ok(report)
    }

    fn project_payment(
        &self,
        payment: &RecurringPayment,
        window: ProjectionWindow,
        fulfilled: Option<&HashSet<DateTime<Utc>>>,
    ) -> Result<PaymentProjection, ProjectionError> {
        let limit = self.settings.max_occurrences_per_schedule;
        let mut outstanding = Vec::new();
        let mut walked = 0usize;
        let mut cursor = self
            .calculator
            .next_occurrence(payment, Some(window.start))?;

        while window.contains(cursor) && payment.is_active_at(cursor) {
            if walked >= limit {
                warn!(
                    "recurring payment {} exceeded {} occurrences in window; truncating",
                    payment.id, limit
                );
                return Ok(PaymentProjection {
                    outstanding,
                    warning: Some(ProjectionWarning::OccurrenceLimitReached {
                        payment_id: payment.id.clone(),
                        limit,
                    }),
                });
            }
            walked += 1;

            let paid = fulfilled.is_some_and(|instants| instants.contains(&cursor));
            if !paid {
                outstanding.push(OutstandingPayment {
                    recurrent_payment_id: payment.id.clone(),
                    date: cursor,
                });
            }

            // The calculator is inclusive of `after`; step past the current occurrence.
            cursor = self
                .calculator
                .next_occurrence(payment, Some(cursor + Duration::milliseconds(1)))?;
        }

        Ok(PaymentProjection {
            outstanding,
            warning: None,
        })
    }
}

/// Instants already settled per recurring payment id.
fn fulfilled_instants(transactions: &[Transaction]) -> HashMap<&str, HashSet<DateTime<Utc>>> {
    let mut map: HashMap<&str, HashSet<DateTime<Utc>>> = HashMap::new();
    for txn in transactions {
        if let Some(payment_id) = txn.recurrent_payment_id.as_deref() {
            map.entry(payment_id).or_default().insert(txn.date);
        }
    }
    map
}
