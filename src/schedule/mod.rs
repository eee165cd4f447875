//! Recurring schedule arithmetic: stepping, next occurrences, horizons, rate
//! conversion, snapshot bucketing, and reminder rollover.
//!
//! Everything here is a pure function of its inputs. The reference date is
//! always passed in by the caller.

pub mod buckets;
pub mod frequency;
pub mod horizon;
pub mod item;
pub mod occurrence;
pub mod rates;
pub mod reminder;

pub use buckets::{aggregate_with_current, append_current, Bucket, BucketKey};
pub use frequency::Frequency;
pub use horizon::{
    project, project_all, project_with, DueStatus, HorizonOptions, HorizonSummary,
    ProjectedOccurrence,
};
pub use item::{DateWindow, ItemKind, RecurringItem, Snapshot};
pub use occurrence::{next_occurrence, occurrences_between, previous_occurrence};
pub use rates::{convert, yearly_amount, RateTotals, WEEKS_PER_MONTH};
pub use reminder::{fire_due, Reminder, ReminderState, Rollover, Transition};
