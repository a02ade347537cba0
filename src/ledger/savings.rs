use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A savings goal tracked independently from bank accounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsProfile {
    pub id: String,
    pub name: String,
    pub current_amount: f64,
    pub target_amount: f64,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<DateTime<Utc>>,
    pub category: String,
}

impl SavingsProfile {
    /// Fraction of the target reached so far, capped at 1.0.
    pub fn progress(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount).clamp(0.0, 1.0)
    }
}

/// Fields supplied when opening a new savings goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewSavingsProfile {
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub target_date: Option<DateTime<Utc>>,
    #[serde(default = "NewSavingsProfile::default_category")]
    pub category: String,
}

impl NewSavingsProfile {
    pub fn default_category() -> String {
        "general".into()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsProfilePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub current_amount: Option<f64>,
    #[serde(default)]
    pub target_amount: Option<f64>,
    /// `Some(None)` (JSON `null`) removes the target date.
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_date: Option<Option<DateTime<Utc>>>,
    #[serde(default)]
    pub category: Option<String>,
}

impl SavingsProfilePatch {
    pub fn apply(self, profile: &mut SavingsProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(current) = self.current_amount {
            profile.current_amount = current;
        }
        if let Some(target) = self.target_amount {
            profile.target_amount = target;
        }
        if let Some(target_date) = self.target_date {
            profile.target_date = target_date;
        }
        if let Some(category) = self.category {
            profile.category = category;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn null_target_date_clears_it() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut profile = SavingsProfile {
            id: "goal".into(),
            name: "Holiday".into(),
            current_amount: 400.0,
            target_amount: 3_000.0,
            start_date: start,
            target_date: Some(start + chrono::Duration::days(365)),
            category: "travel".into(),
        };

        let rename: SavingsProfilePatch = serde_json::from_str(r#"{ "name": "Japan" }"#).unwrap();
        rename.apply(&mut profile);
        assert_eq!(profile.name, "Japan");
        assert!(profile.target_date.is_some());

        let clear: SavingsProfilePatch = serde_json::from_str(r#"{ "targetDate": null }"#).unwrap();
        clear.apply(&mut profile);
        assert_eq!(profile.target_date, None);
        assert_eq!(profile.current_amount, 400.0);
    }
}
