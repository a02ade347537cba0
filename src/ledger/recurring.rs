use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{category::ExpenseCategory, frequency::ScheduleFrequency};

/// A recurring payment definition set up on an account.
///
/// `start_date` anchors the cadence: its weekday, day of month, month and time of day
/// are reused for every occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringPayment {
    pub id: String,
    pub amount: f64,
    pub name: String,
    pub category: ExpenseCategory,
    pub frequency: ScheduleFrequency,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub auto_pay: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_profile: Option<String>,
}

impl RecurringPayment {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: f64,
        frequency: impl Into<ScheduleFrequency>,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            name: name.into(),
            category: ExpenseCategory::Other,
            frequency: frequency.into(),
            start_date,
            end_date: None,
            auto_pay: false,
            savings_profile: None,
        }
    }

    pub fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Whether an occurrence at `instant` is still within the payment's lifetime.
    pub fn is_active_at(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start_date && self.end_date.map_or(true, |end| instant <= end)
    }
}

/// Fields supplied when creating a standalone recurring payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewRecurringPayment {
    pub amount: f64,
    pub name: String,
    pub category: ExpenseCategory,
    pub frequency: ScheduleFrequency,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub auto_pay: bool,
    #[serde(default)]
    pub savings_profile: Option<String>,
}

/// Partial update; `None` leaves the stored value untouched.
///
/// `end_date` and `savings_profile` are clearable: `Some(None)` (JSON `null`) removes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringPaymentPatch {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<ExpenseCategory>,
    #[serde(default)]
    pub frequency: Option<ScheduleFrequency>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<Option<DateTime<Utc>>>,
    #[serde(default)]
    pub auto_pay: Option<bool>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub savings_profile: Option<Option<String>>,
}

impl RecurringPaymentPatch {
    pub fn apply(self, payment: &mut RecurringPayment) {
        if let Some(amount) = self.amount {
            payment.amount = amount;
        }
        if let Some(name) = self.name {
            payment.name = name;
        }
        if let Some(category) = self.category {
            payment.category = category;
        }
        if let Some(frequency) = self.frequency {
            payment.frequency = frequency;
        }
        if let Some(start_date) = self.start_date {
            payment.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            payment.end_date = end_date;
        }
        if let Some(auto_pay) = self.auto_pay {
            payment.auto_pay = auto_pay;
        }
        if let Some(savings_profile) = self.savings_profile {
            payment.savings_profile = savings_profile;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::ledger::frequency::Frequency;

    #[test]
    fn deserializes_source_json_shape() {
        let raw = r#"{
            "id": "8a4f5a3e-7c4b-4d59-9a3c-2f1e0b6c9d11",
            "amount": 1850,
            "name": "Rent",
            "category": "housing",
            "frequency": "monthly",
            "startDate": "2024-01-01T08:00:00.000Z"
        }"#;
        let payment: RecurringPayment = serde_json::from_str(raw).unwrap();
        assert_eq!(payment.frequency.known(), Some(Frequency::Monthly));
        assert_eq!(payment.category, ExpenseCategory::Housing);
        assert!(!payment.auto_pay);
        assert_eq!(payment.end_date, None);
    }

    #[test]
    fn patch_only_touches_supplied_fields() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut payment = RecurringPayment::new("rp", "Gym", 60.0, Frequency::Monthly, start);
        RecurringPaymentPatch {
            amount: Some(65.0),
            auto_pay: Some(true),
            ..RecurringPaymentPatch::default()
        }
        .apply(&mut payment);

        assert_eq!(payment.amount, 65.0);
        assert!(payment.auto_pay);
        assert_eq!(payment.name, "Gym");
        assert_eq!(payment.start_date, start);
    }

    #[test]
    fn explicit_null_clears_end_date_and_savings_link() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        let mut payment =
            RecurringPayment::new("rp", "Lease", 300.0, Frequency::Monthly, start).with_end_date(end);
        payment.savings_profile = Some("goal".into());

        let untouched: RecurringPaymentPatch =
            serde_json::from_str(r#"{ "amount": 310 }"#).unwrap();
        assert_eq!(untouched.end_date, None);
        untouched.apply(&mut payment);
        assert_eq!(payment.end_date, Some(end));
        assert_eq!(payment.savings_profile.as_deref(), Some("goal"));

        let clearing: RecurringPaymentPatch =
            serde_json::from_str(r#"{ "endDate": null, "savingsProfile": null }"#).unwrap();
        assert_eq!(clearing.end_date, Some(None));
        assert_eq!(clearing.savings_profile, Some(None));
        clearing.apply(&mut payment);
        assert_eq!(payment.end_date, None);
        assert_eq!(payment.savings_profile, None);
        assert_eq!(payment.amount, 310.0);
    }

    #[test]
    fn clearing_patch_serializes_null() {
        let patch = RecurringPaymentPatch {
            end_date: Some(None),
            ..RecurringPaymentPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert!(json["endDate"].is_null());
        assert!(json.get("endDate").is_some());
        assert!(json.get("savingsProfile").is_none());
    }

    #[test]
    fn lifetime_respects_start_and_end() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let payment =
            RecurringPayment::new("rp", "Lease", 300.0, Frequency::Monthly, start).with_end_date(end);

        assert!(payment.is_active_at(start));
        assert!(payment.is_active_at(end));
        assert!(!payment.is_active_at(end + chrono::Duration::milliseconds(1)));
        assert!(!payment.is_active_at(start - chrono::Duration::days(1)));
    }
}
