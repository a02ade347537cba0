use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The closed set of cadences a recurring payment can follow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Yearly,
    ];

    /// Length of one period in calendar months, `None` for the fixed 7-day cadence.
    pub fn period_months(self) -> Option<i32> {
        match self {
            Frequency::Weekly => None,
            Frequency::Monthly => Some(1),
            Frequency::Quarterly => Some(3),
            Frequency::Yearly => Some(12),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFrequency(pub String);

impl fmt::Display for UnknownFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown frequency `{}`", self.0)
    }
}

impl std::error::Error for UnknownFrequency {}

impl FromStr for Frequency {
    type Err = UnknownFrequency;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Frequency::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == normalized)
            .ok_or_else(|| UnknownFrequency(value.to_string()))
    }
}

/// Frequency exactly as stored on a schedule.
///
/// Stores written by other tools may carry values outside [`Frequency`]. Those are kept
/// verbatim so a projection can report the offending schedule instead of rejecting the
/// whole file at load time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ScheduleFrequency {
    Known(Frequency),
    Unrecognized(String),
}

impl ScheduleFrequency {
    pub fn known(&self) -> Option<Frequency> {
        match self {
            ScheduleFrequency::Known(frequency) => Some(*frequency),
            ScheduleFrequency::Unrecognized(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ScheduleFrequency::Known(frequency) => frequency.as_str(),
            ScheduleFrequency::Unrecognized(raw) => raw,
        }
    }
}

impl From<Frequency> for ScheduleFrequency {
    fn from(frequency: Frequency) -> Self {
        ScheduleFrequency::Known(frequency)
    }
}

impl fmt::Display for ScheduleFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
