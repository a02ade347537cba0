use std::io;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failures raised while computing recurring-payment projections.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Invalid window: start {start} must be before end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("Invalid frequency `{frequency}` on recurring payment {payment_id}")]
    InvalidFrequency {
        payment_id: String,
        frequency: String,
    },
    #[error("Timestamp out of range: {0}")]
    TimestampOutOfRange(String),
}

impl ProjectionError {
    /// HTTP status a surrounding API layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            ProjectionError::AccountNotFound(_) => 404,
            ProjectionError::InvalidWindow { .. } | ProjectionError::TimestampOutOfRange(_) => 400,
            ProjectionError::InvalidFrequency { .. } => 422,
        }
    }
}

/// Failures raised by the JSON-backed account store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Database validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("Record not found: {0}")]
    NotFound(String),
}

/// Failures raised while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_errors_map_to_http_status() {
        let now = Utc::now();
        assert_eq!(ProjectionError::AccountNotFound("a".into()).http_status(), 404);
        assert_eq!(
            ProjectionError::InvalidWindow {
                start: now,
                end: now
            }
            .http_status(),
            400
        );
    }

    #[test]
    fn validation_error_lists_every_issue() {
        let err = StoreError::Validation(vec!["first".into(), "second".into()]);
        assert_eq!(
            err.to_string(),
            "Database validation failed: first; second"
        );
    }
}
