#![doc(test(attr(deny(warnings))))]

//! Spendcast Core holds the account store, the recurring-payment projection engine
//! and the services a personal-finance backend builds on.

pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use crate::core::projection::{
    OutstandingPayment, ProjectionEngine, ProjectionReport, ProjectionWarning, ProjectionWindow,
    RecurrenceCalculator,
};
pub use crate::errors::{ProjectionError, StoreError};
pub use crate::storage::{AccountRepository, JsonStore};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Spendcast Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
