//! Validated (start, due) pairs.

use jiff::Zoned;
use serde::Serialize;

use super::RecurrenceRule;
use crate::error::ScheduleError;

/// One cycle's start and due dates, optionally tied to a recurrence rule.
///
/// The fields are private: the only ways to obtain a schedule are the two
/// constructors, so a held value always satisfies one of
///
/// - `due_date == rule.next_date(start_date)` when a rule is present,
/// - `due_date > start_date` otherwise.
///
/// Schedules are never mutated. A new cycle gets a new schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareSchedule {
    start_date: Zoned,
    due_date: Zoned,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurrence_rule: Option<RecurrenceRule>,
}

impl CareSchedule {
    /// A one-off schedule with an explicit due date.
    pub fn from_fixed_due_date(
        start_date: Zoned,
        due_date: Zoned,
    ) -> Result<Self, ScheduleError> {
        if due_date <= start_date {
            return Err(ScheduleError::DueNotAfterStart);
        }
        Ok(Self {
            start_date,
            due_date,
            recurrence_rule: None,
        })
    }

    /// A recurring schedule whose due date is the rule's next occurrence
    /// after `start_date`.
    pub fn from_recurrence(
        start_date: Zoned,
        recurrence_rule: RecurrenceRule,
    ) -> Result<Self, ScheduleError> {
        let due_date = recurrence_rule
            .next_date(&start_date)
            .ok_or(ScheduleError::NoNextOccurrence)?;
        Ok(Self {
            start_date,
            due_date,
            recurrence_rule: Some(recurrence_rule),
        })
    }

    pub fn start_date(&self) -> &Zoned {
        &self.start_date
    }

    pub fn due_date(&self) -> &Zoned {
        &self.due_date
    }

    pub fn recurrence_rule(&self) -> Option<&RecurrenceRule> {
        self.recurrence_rule.as_ref()
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence_rule.is_some()
    }
}
