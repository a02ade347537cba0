use chrono::{serde::ts_milliseconds, DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ProjectionError;

/// Half-open `[start, end)` range a projection covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectionWindow {
    #[serde(with = "ts_milliseconds")]
    pub start: DateTime<Utc>,
    #[serde(with = "ts_milliseconds")]
    pub end: DateTime<Utc>,
}

impl ProjectionWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ProjectionError> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    /// Builds a window from epoch-millisecond bounds.
    pub fn from_millis(start: i64, end: i64) -> Result<Self, ProjectionError> {
        Self::new(instant_from_millis(start)?, instant_from_millis(end)?)
    }

    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.start >= self.end {
            return Err(ProjectionError::InvalidWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

pub fn instant_from_millis(millis: i64) -> Result<DateTime<Utc>, ProjectionError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ProjectionError::TimestampOutOfRange(format!("{millis} ms")))
}

/// A scheduled occurrence inside the window with no transaction recorded against it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct OutstandingPayment {
    pub recurrent_payment_id: String,
    #[serde(with = "ts_milliseconds")]
    pub date: DateTime<Utc>,
}

/// Problems with individual recurring payments that did not abort the projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ProjectionWarning {
    #[serde(rename_all = "camelCase")]
    InvalidFrequency {
        payment_id: String,
        frequency: String,
    },
    /// The payment produced more occurrences than allowed; later ones were not examined.
    #[serde(rename_all = "camelCase")]
    OccurrenceLimitReached { payment_id: String, limit: usize },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectionReport {
    pub outstanding: Vec<OutstandingPayment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ProjectionWarning>,
}

impl ProjectionReport {
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Outstanding occurrences of a single recurring payment.
    pub fn for_payment<'a>(
        &'a self,
        payment_id: &'a str,
    ) -> impl Iterator<Item = &'a OutstandingPayment> + 'a {
        self.outstanding
            .iter()
            .filter(move |item| item.recurrent_payment_id == payment_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_rejects_empty_and_inverted_ranges() {
        assert!(ProjectionWindow::from_millis(10, 10).is_err());
        assert!(matches!(
            ProjectionWindow::from_millis(20, 10),
            Err(ProjectionError::InvalidWindow { .. })
        ));
        assert!(ProjectionWindow::from_millis(10, 11).is_ok());
    }

    #[test]
    fn window_is_half_open() {
        let window = ProjectionWindow::from_millis(1_000, 2_000).unwrap();
        assert!(window.contains(window.start));
        assert!(!window.contains(window.end));
    }

    #[test]
    fn outstanding_payment_serializes_epoch_millis() {
        let payment = OutstandingPayment {
            recurrent_payment_id: "rp-1".into(),
            date: instant_from_millis(1_705_276_800_000).unwrap(),
        };
        let json = serde_json::to_value(&payment).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "recurrentPaymentId": "rp-1", "date": 1_705_276_800_000_i64 })
        );
    }

    #[test]
    fn out_of_range_millis_are_rejected() {
        assert!(matches!(
            instant_from_millis(i64::MAX),
            Err(ProjectionError::TimestampOutOfRange(_))
        ));
    }
}
