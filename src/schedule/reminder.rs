use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::frequency::Frequency;
use super::item::RecurringItem;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReminderState {
    /// Rolls forward when fired.
    #[default]
    Armed,
    /// One-time reminder that already fired.
    Exhausted,
}

/// A recurring obligation whose next due date is tracked by the caller's store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reminder {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub frequency: Frequency,
    pub next_due_date: NaiveDate,
    #[serde(default)]
    pub state: ReminderState,
    #[serde(default = "Reminder::default_active")]
    pub active: bool,
}

/// What firing a reminder did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum Transition {
    Advanced { from: NaiveDate, to: NaiveDate },
    Exhausted,
    AlreadyExhausted,
    NotDue,
    Inactive,
}

/// Result of [`Reminder::fire`]. The updated reminder only counts as applied
/// once the caller has persisted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rollover {
    pub reminder: Reminder,
    pub transition: Transition,
}

impl Rollover {
    pub fn changed(&self) -> bool {
        matches!(
            self.transition,
            Transition::Advanced { .. } | Transition::Exhausted
        )
    }
}

impl Reminder {
    pub fn new(title: impl Into<String>, frequency: Frequency, next_due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            frequency,
            next_due_date,
            state: ReminderState::Armed,
            active: true,
        }
    }

    /// Reminder for a recurring item, first due on the item's start date.
    pub fn from_item(item: &RecurringItem) -> Self {
        Self {
            id: item.id,
            title: item.name.clone(),
            frequency: item.frequency,
            next_due_date: item.start_date,
            state: ReminderState::Armed,
            active: item.active,
        }
    }

    /// Due once the stored date has been reached; being close is not enough.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.active && self.next_due_date <= today
    }

    /// Computes the rollover for a fire event at `today` without touching
    /// `self`.
    ///
    /// Recurring reminders move one step forward and stay armed. One-time
    /// reminders become exhausted and keep their date, so they stay overdue
    /// until something outside deactivates them; firing them again is a no-op.
    pub fn fire(&self, today: NaiveDate) -> Rollover {
        let mut reminder = self.clone();
        let transition = if !self.active {
            Transition::Inactive
        } else if self.next_due_date > today {
            Transition::NotDue
        } else if !self.frequency.is_recurring() {
            match self.state {
                ReminderState::Armed => {
                    reminder.state = ReminderState::Exhausted;
                    Transition::Exhausted
                }
                ReminderState::Exhausted => Transition::AlreadyExhausted,
            }
        } else {
            let to = self.frequency.advance(self.next_due_date);
            reminder.next_due_date = to;
            Transition::Advanced {
                from: self.next_due_date,
                to,
            }
        };
        debug!(reminder = %self.title, ?transition, %today, "fired reminder");
        Rollover {
            reminder,
            transition,
        }
    }

    fn default_active() -> bool {
        true
    }
}

/// Fires every due reminder once, returning only the rollovers that changed
/// state and need persisting.
pub fn fire_due(reminders: &[Reminder], today: NaiveDate) -> Vec<Rollover> {
    reminders
        .iter()
        .filter(|reminder| reminder.is_due(today))
        .map(|reminder| reminder.fire(today))
        .filter(Rollover::changed)
        .collect()
}
