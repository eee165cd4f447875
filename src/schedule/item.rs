use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::frequency::Frequency;
use crate::errors::ScheduleError;

/// Which dashboard feature owns a recurring item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Subscription,
    Dividend,
    Bill,
}

/// A subscription, dividend-paying holding, or billable obligation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub kind: ItemKind,
    pub start_date: NaiveDate,
    /// Inclusive; nothing is generated after this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub frequency: Frequency,
    pub amount_per_occurrence: f64,
    #[serde(default = "RecurringItem::default_active")]
    pub active: bool,
}

impl RecurringItem {
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        frequency: Frequency,
        amount_per_occurrence: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind: ItemKind::default(),
            start_date,
            end_date: None,
            frequency,
            amount_per_occurrence,
            active: true,
        }
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Checks the record invariants a boundary layer is expected to enforce.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ScheduleError::InvalidItem(format!(
                    "`{}` ends on {} before it starts on {}",
                    self.name, end, self.start_date
                )));
            }
        }
        if self.amount_per_occurrence < 0.0 || self.amount_per_occurrence.is_nan() {
            return Err(ScheduleError::InvalidItem(format!(
                "`{}` has a negative amount",
                self.name
            )));
        }
        Ok(())
    }

    pub fn ends_before(&self, date: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| date > end)
    }

    fn default_active() -> bool {
        true
    }
}

/// A dated point measurement such as net worth on a given day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub value: f64,
}

impl Snapshot {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Inclusive date range used for calendar projections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ScheduleError> {
        if end < start {
            return Err(ScheduleError::InvalidWindow(format!(
                "window end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Window covering `reference` through `reference + days`, saturating at
    /// the last representable date.
    pub fn forward(reference: NaiveDate, days: u32) -> Self {
        Self {
            start: reference,
            end: reference
                .checked_add_days(Days::new(days.into()))
                .unwrap_or(NaiveDate::MAX),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn validate_rejects_end_before_start() {
        let item = RecurringItem::new("Gym", date(2024, 3, 1), Frequency::Monthly, 30.0)
            .with_end_date(date(2024, 2, 1));
        let err = item.validate().expect_err("end precedes start");
        assert!(err.to_string().contains("Gym"));
    }

    #[test]
    fn validate_rejects_negative_amount() {
        let item = RecurringItem::new("Refund", date(2024, 3, 1), Frequency::Monthly, -1.0);
        assert!(matches!(item.validate(), Err(ScheduleError::InvalidItem(_))));
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{
            "name": "Streaming",
            "start_date": "2024-01-15",
            "frequency": "monthly",
            "amount_per_occurrence": 9.99
        }"#;
        let item: RecurringItem = serde_json::from_str(json).unwrap();
        assert!(item.active);
        assert_eq!(item.kind, ItemKind::Subscription);
        assert_eq!(item.end_date, None);
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let window = DateWindow::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(window.contains(date(2024, 1, 1)));
        assert!(window.contains(date(2024, 1, 31)));
        assert!(!window.contains(date(2024, 2, 1)));
        assert!(DateWindow::new(date(2024, 2, 1), date(2024, 1, 1)).is_err());
    }

    #[test]
    fn forward_window_saturates_at_last_date() {
        let window = DateWindow::forward(date(2024, 1, 1), u32::MAX);
        assert_eq!(window.start, date(2024, 1, 1));
        assert_eq!(window.end, NaiveDate::MAX);
        assert_eq!(DateWindow::forward(date(2024, 1, 1), 30).end, date(2024, 1, 31));
    }
}
