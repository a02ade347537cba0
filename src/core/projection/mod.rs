//! Recurring-payment projection: the recurrence calculator and the engine that
//! reconciles computed occurrences against recorded transactions.

pub mod engine;
pub mod recurrence;
pub mod types;

pub use engine::ProjectionEngine;
pub use recurrence::{occurrence_on_or_after, RecurrenceCalculator};
pub use types::{
    instant_from_millis, OutstandingPayment, ProjectionReport, ProjectionWarning,
    ProjectionWindow,
};
