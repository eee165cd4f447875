use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::item::{DateWindow, RecurringItem};
use super::occurrence::{next_occurrence, occurrences_between};

pub const DEFAULT_DUE_SOON_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    DueToday,
    DueSoon,
    Upcoming,
}

impl DueStatus {
    fn classify(days_until: i64, due_soon_days: u32) -> DueStatus {
        if days_until <= 0 {
            DueStatus::DueToday
        } else if days_until <= due_soon_days as i64 {
            DueStatus::DueSoon
        } else {
            DueStatus::Upcoming
        }
    }
}

/// One item paired with one of its occurrence dates.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectedOccurrence<'a> {
    pub item: &'a RecurringItem,
    pub date: NaiveDate,
    pub days_until: i64,
    pub status: DueStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizonOptions {
    pub horizon_days: u32,
    pub due_soon_days: u32,
}

impl HorizonOptions {
    pub fn new(horizon_days: u32) -> Self {
        Self {
            horizon_days,
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
        }
    }
}

/// Lists the single next occurrence of each item that falls inside
/// `[reference, reference + horizon_days]`, ordered by date then item name.
///
/// High-frequency items appear once even when they recur several times in the
/// window; see [`project_all`] for the expanded calendar.
pub fn project<'a>(
    items: &'a [RecurringItem],
    reference: NaiveDate,
    horizon_days: u32,
) -> Vec<ProjectedOccurrence<'a>> {
    project_with(items, reference, HorizonOptions::new(horizon_days))
}

pub fn project_with<'a>(
    items: &'a [RecurringItem],
    reference: NaiveDate,
    options: HorizonOptions,
) -> Vec<ProjectedOccurrence<'a>> {
    let window = DateWindow::forward(reference, options.horizon_days);
    let mut projected: Vec<_> = items
        .iter()
        .filter_map(|item| {
            let date = next_occurrence(item, reference)?;
            window
                .contains(date)
                .then(|| occurrence(item, date, reference, options.due_soon_days))
        })
        .collect();
    projected.sort_by(chronological);
    debug!(
        items = items.len(),
        projected = projected.len(),
        %reference,
        horizon_days = options.horizon_days,
        "projected next occurrences"
    );
    projected
}

/// Every occurrence of every item inside `window`, ordered like [`project`].
/// Days are counted from the window start.
pub fn project_all<'a>(
    items: &'a [RecurringItem],
    window: DateWindow,
    due_soon_days: u32,
) -> Vec<ProjectedOccurrence<'a>> {
    let mut projected: Vec<_> = items
        .iter()
        .flat_map(|item| {
            occurrences_between(item, window)
                .into_iter()
                .map(move |date| occurrence(item, date, window.start, due_soon_days))
        })
        .collect();
    projected.sort_by(chronological);
    debug!(
        items = items.len(),
        projected = projected.len(),
        start = %window.start,
        end = %window.end,
        "projected calendar"
    );
    projected
}

fn occurrence(
    item: &RecurringItem,
    date: NaiveDate,
    reference: NaiveDate,
    due_soon_days: u32,
) -> ProjectedOccurrence<'_> {
    let days_until = (date - reference).num_days();
    ProjectedOccurrence {
        item,
        date,
        days_until,
        status: DueStatus::classify(days_until, due_soon_days),
    }
}

fn chronological(a: &ProjectedOccurrence<'_>, b: &ProjectedOccurrence<'_>) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| a.item.name.cmp(&b.item.name))
        .then_with(|| a.item.id.cmp(&b.item.id))
}

/// Totals of a projection, e.g. "4 payments, 63.50 due in the next 30 days".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HorizonSummary {
    pub occurrences: usize,
    pub total_amount: f64,
    pub first_due: Option<NaiveDate>,
}

impl HorizonSummary {
    pub fn from_projection(projection: &[ProjectedOccurrence<'_>]) -> Self {
        Self {
            occurrences: projection.len(),
            total_amount: projection
                .iter()
                .map(|entry| entry.item.amount_per_occurrence)
                .sum(),
            first_due: projection.iter().map(|entry| entry.date).min(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Frequency;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn classifies_by_days_until() {
        assert_eq!(DueStatus::classify(0, 7), DueStatus::DueToday);
        assert_eq!(DueStatus::classify(7, 7), DueStatus::DueSoon);
        assert_eq!(DueStatus::classify(8, 7), DueStatus::Upcoming);
    }

    #[test]
    fn summary_totals_amounts() {
        let items = vec![
            RecurringItem::new("Rent", date(2024, 1, 1), Frequency::Monthly, 1200.0),
            RecurringItem::new("Music", date(2024, 1, 10), Frequency::Monthly, 10.5),
        ];
        let projection = project(&items, date(2024, 3, 2), 30);
        let summary = HorizonSummary::from_projection(&projection);
        assert_eq!(summary.occurrences, 2);
        assert!((summary.total_amount - 1210.5).abs() < 1e-9);
        assert_eq!(summary.first_due, Some(date(2024, 3, 10)));
    }
}
