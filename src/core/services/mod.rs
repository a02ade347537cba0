//! Application services layered over the JSON store and the projection engine.

pub mod account_service;
pub mod projection_service;
pub mod recurring_service;
pub mod savings_service;
pub mod transaction_service;

use thiserror::Error;

use crate::errors::{ProjectionError, StoreError};

pub use account_service::{AccountService, BankAccountSummary};
pub use projection_service::ProjectionService;
pub use recurring_service::RecurringPaymentService;
pub use savings_service::SavingsService;
pub use transaction_service::TransactionService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

impl ServiceError {
    /// Status code an HTTP front end should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::Store(StoreError::NotFound(_)) => 404,
            ServiceError::Store(StoreError::Validation(_)) => 400,
            ServiceError::Store(_) => 500,
            ServiceError::Projection(err) => err.http_status(),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
