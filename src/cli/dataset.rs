use std::{io, path::Path};

use serde::{Deserialize, Serialize};

use crate::errors::ScheduleError;
use crate::schedule::{RecurringItem, Reminder, Rollover, Snapshot};
use crate::utils::persistence::{load_json, save_json};

/// Records the shell works on, as handed over by the storage side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub items: Vec<RecurringItem>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

impl Dataset {
    pub fn load_from_path(path: &Path) -> io::Result<Dataset> {
        load_json(path)
    }

    pub fn save_to_path(&self, path: &Path) -> io::Result<()> {
        save_json(self, path)
    }

    /// Rejects records the schedule layer assumes are already valid.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.items.iter().try_for_each(RecurringItem::validate)
    }

    /// Replaces stored reminders with their rolled-over versions.
    pub fn apply_rollovers(&mut self, rollovers: &[Rollover]) -> usize {
        let mut applied = 0;
        for rollover in rollovers {
            if let Some(stored) = self
                .reminders
                .iter_mut()
                .find(|reminder| reminder.id == rollover.reminder.id)
            {
                *stored = rollover.reminder.clone();
                applied += 1;
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{fire_due, Frequency};
    use chrono::NaiveDate;

    #[test]
    fn apply_rollovers_updates_matching_reminders() {
        let due = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let mut dataset = Dataset {
            reminders: vec![Reminder::new("Rent", Frequency::Monthly, due)],
            ..Dataset::default()
        };
        let rollovers = fire_due(&dataset.reminders, due);
        assert_eq!(dataset.apply_rollovers(&rollovers), 1);
        assert_eq!(
            dataset.reminders[0].next_due_date,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }
}
