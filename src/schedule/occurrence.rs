//! Next/previous occurrence arithmetic shared by every recurring feature.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::{trace, warn};

use super::frequency::{months_between, shift_month, Frequency};
use super::item::{DateWindow, RecurringItem};

/// Upper bound on dates produced for one item by a single enumeration.
pub const MAX_OCCURRENCES_PER_ITEM: usize = 4096;

/// Returns the first occurrence of `item` strictly after `reference`, or `None`
/// once the series is over.
///
/// One-time items always answer with their start date, even when it already
/// lies in the past; such an item is considered due rather than skipped.
/// Inactive items never have a next occurrence.
pub fn next_occurrence(item: &RecurringItem, reference: NaiveDate) -> Option<NaiveDate> {
    debug_assert!(item.validate().is_ok(), "unvalidated item `{}`", item.name);
    if !item.active {
        return None;
    }
    let candidate = if item.frequency.is_recurring() {
        straddle(item.start_date, item.frequency, reference).1
    } else {
        item.start_date
    };
    if item.ends_before(candidate) {
        trace!(item = %item.name, %candidate, "series ended");
        return None;
    }
    Some(candidate)
}

/// Returns the last occurrence on or before `reference` that lies inside the
/// item's start/end range. The active flag is ignored: past dates stay past.
pub fn previous_occurrence(item: &RecurringItem, reference: NaiveDate) -> Option<NaiveDate> {
    let limit = match item.end_date {
        Some(end) if end < reference => end,
        _ => reference,
    };
    if item.start_date > limit {
        return None;
    }
    if !item.frequency.is_recurring() {
        return Some(item.start_date);
    }
    straddle(item.start_date, item.frequency, limit).0
}

/// Every occurrence of `item` inside `window`, oldest first.
///
/// Built from repeated [`next_occurrence`] calls, each one moving the reference
/// date onto the occurrence just found.
pub fn occurrences_between(item: &RecurringItem, window: DateWindow) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    if !item.frequency.is_recurring() {
        if let Some(date) = next_occurrence(item, window.start) {
            if window.contains(date) {
                dates.push(date);
            }
        }
        return dates;
    }

    let Some(mut reference) = window.start.pred_opt() else {
        return dates;
    };
    while let Some(date) = next_occurrence(item, reference) {
        if date > window.end {
            break;
        }
        dates.push(date);
        if dates.len() >= MAX_OCCURRENCES_PER_ITEM {
            warn!(item = %item.name, "occurrence enumeration truncated");
            break;
        }
        reference = date;
    }
    dates
}

/// Walks a series anchored at `start` around `reference`, returning the last
/// step on or before it and the first step after it.
///
/// Equivalent to stepping with [`Frequency::advance`] from `start` until the
/// candidate passes `reference`. Day-based steps and month-based steps whose
/// day of month can never be clamped are computed directly; other series are
/// stepped one period at a time because clamping carries forward
/// (31 Jan, 29 Feb, 29 Mar, ...).
fn straddle(
    start: NaiveDate,
    frequency: Frequency,
    reference: NaiveDate,
) -> (Option<NaiveDate>, NaiveDate) {
    if start > reference {
        return (None, start);
    }

    if let Some(step) = frequency.step_days() {
        let steps = (reference - start).num_days() / step + 1;
        let next = start + Duration::days(steps * step);
        return (Some(next - Duration::days(step)), next);
    }

    if let Some(step) = frequency.step_months() {
        if start.day() <= 28 {
            let mut steps = months_between(start, reference).div_euclid(step);
            if shift_month(start, steps * step) <= reference {
                steps += 1;
            }
            let previous = shift_month(start, (steps - 1) * step);
            return (Some(previous), shift_month(start, steps * step));
        }
    }

    let mut previous = None;
    let mut candidate = start;
    while candidate <= reference {
        previous = Some(candidate);
        candidate = frequency.advance(candidate);
    }
    (previous, candidate)
}
