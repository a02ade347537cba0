//! Next-occurrence arithmetic for recurring payment schedules.
//!
//! Every frequency is a congruence class over a period: seven days for weekly
//! schedules, one, three or twelve calendar months for the others. Finding the next
//! occurrence means aligning the schedule's anchor into the period that contains the
//! reference instant and stepping one period forward if that is still too early.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::{
    core::time::{Clock, SystemClock},
    errors::ProjectionError,
    ledger::{Frequency, RecurringPayment},
};

const MONTHS_PER_YEAR: i32 = 12;

/// Computes occurrences of recurring payments.
///
/// `next_occurrence` is inclusive: when `after` is itself an occurrence it is returned
/// unchanged. Walk a schedule by feeding back the previous result plus one millisecond.
#[derive(Clone)]
pub struct RecurrenceCalculator {
    clock: Arc<dyn Clock>,
}

impl Default for RecurrenceCalculator {
    fn default() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }
}

impl RecurrenceCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `clock` whenever `next_occurrence` is called without an explicit `after`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Smallest occurrence of `schedule` that is at or after `after` (default: now).
    pub fn next_occurrence(
        &self,
        schedule: &RecurringPayment,
        after: Option<DateTime<Utc>>,
    ) -> Result<DateTime<Utc>, ProjectionError> {
        let frequency =
            schedule
                .frequency
                .known()
                .ok_or_else(|| ProjectionError::InvalidFrequency {
                    payment_id: schedule.id.clone(),
                    frequency: schedule.frequency.to_string(),
                })?;
        let after = after.unwrap_or_else(|| self.clock.now());
        occurrence_on_or_after(frequency, schedule.start_date, after).ok_or_else(|| {
            ProjectionError::TimestampOutOfRange(format!(
                "{frequency} occurrence of payment {} after {after}",
                schedule.id
            ))
        })
    }
}

/// Smallest instant of the `frequency` pattern anchored at `start` that is `>= after`.
///
/// Occurrences never precede `start`. Returns `None` only when the result would leave
/// the representable date range.
pub fn occurrence_on_or_after(
    frequency: Frequency,
    start: DateTime<Utc>,
    after: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if after <= start {
        return Some(start);
    }
    match frequency.period_months() {
        None => weekly_on_or_after(start, after),
        Some(period) => calendar_on_or_after(start, after, period),
    }
}

fn weekly_on_or_after(start: DateTime<Utc>, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let week = Duration::weeks(1);
    let week_ms = week.num_milliseconds();
    let elapsed = (after - start).num_milliseconds();
    let weeks = elapsed.div_euclid(week_ms) + i64::from(elapsed.rem_euclid(week_ms) != 0);
    let candidate = start.checked_add_signed(Duration::milliseconds(weeks * week_ms))?;
    // `elapsed` drops sub-millisecond precision, so one more step may be needed.
    if candidate < after {
        candidate.checked_add_signed(week)
    } else {
        Some(candidate)
    }
}

fn calendar_on_or_after(
    start: DateTime<Utc>,
    after: DateTime<Utc>,
    period: i32,
) -> Option<DateTime<Utc>> {
    let anchor = start.naive_utc();
    let anchor_index = month_index(anchor.date());
    let after_index = month_index(after.naive_utc().date());
    let aligned = after_index - (after_index - anchor_index).rem_euclid(period);
    let candidate = at_month(anchor, aligned)?;
    if candidate < after {
        at_month(anchor, aligned + period)
    } else {
        Some(candidate)
    }
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * MONTHS_PER_YEAR + date.month0() as i32
}

/// Projects the anchor's day and time of day into the month at `index`, clamping the day
/// to the month's length.
fn at_month(anchor: NaiveDateTime, index: i32) -> Option<DateTime<Utc>> {
    let year = index.div_euclid(MONTHS_PER_YEAR);
    let month = index.rem_euclid(MONTHS_PER_YEAR) as u32 + 1;
    let day = anchor.day().min(days_in_month(year, month)?);
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(DateTime::from_naive_utc_and_offset(
        date.and_time(anchor.time()),
        Utc,
    ))
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}
