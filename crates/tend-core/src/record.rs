//! Plain serde records exchanged with storage and external callers.
//!
//! A [`ScheduleRecord`] is the flattened form of a [`CareSchedule`]:
//!
//! ```json
//! {
//!   "startDate": "2021-06-10T08:00:00Z",
//!   "recurrenceKind": "weekly",
//!   "interval": 1,
//!   "dayConstraints": [2, 4, 6],
//!   "dueDate": "2021-06-12T08:00:00Z"
//! }
//! ```
//!
//! For recurring records the due date is advisory: the schedule is rebuilt
//! from the rule, and a stored due date that disagrees is logged and ignored.

use jiff::Timestamp;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    calendar::CareCalendar,
    care::{CareSchedule, Completion, RecurrenceKind, RecurrenceRule},
    display::CompletionResult,
    error::{CareError, Result},
    models::TaskStatus,
};

fn default_interval() -> u32 {
    1
}

/// Flattened schedule with RFC 3339 timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub start_date: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_kind: Option<RecurrenceKind>,
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_constraints: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
}

impl ScheduleRecord {
    /// The recurrence rule this record describes, if any.
    pub fn rule(&self) -> Result<Option<RecurrenceRule>> {
        match self.recurrence_kind {
            Some(kind) => {
                RecurrenceRule::from_parts(kind, self.interval, self.day_constraints.clone())
                    .map(Some)
            }
            None if self.day_constraints.is_some() => Err(CareError::invalid_input(
                "dayConstraints",
            )
            .with_reason("Day constraints need a recurrence kind")),
            None => Ok(None),
        }
    }

    /// Rebuilds the schedule on `calendar`.
    pub fn into_schedule(&self, calendar: &CareCalendar) -> Result<CareSchedule> {
        let start = calendar.to_zoned(self.start_date);
        match self.rule()? {
            Some(rule) => {
                let schedule = CareSchedule::from_recurrence(start, rule)?;
                let computed = schedule.due_date().timestamp();
                if self.due_date.is_some_and(|stored| stored != computed) {
                    warn!(
                        "stored due date {:?} disagrees with recurrence ({computed}); using the rule",
                        self.due_date
                    );
                }
                Ok(schedule)
            }
            None => {
                let due = self.due_date.ok_or_else(|| {
                    CareError::invalid_input("dueDate")
                        .with_reason("A one-off schedule needs a due date")
                })?;
                Ok(CareSchedule::from_fixed_due_date(
                    start,
                    calendar.to_zoned(due),
                )?)
            }
        }
    }
}

impl From<&CareSchedule> for ScheduleRecord {
    fn from(schedule: &CareSchedule) -> Self {
        let rule = schedule.recurrence_rule();
        Self {
            start_date: schedule.start_date().timestamp(),
            recurrence_kind: rule.map(RecurrenceRule::kind),
            interval: rule.map_or(1, RecurrenceRule::interval),
            day_constraints: rule
                .and_then(RecurrenceRule::day_constraints)
                .map(|days| days.iter().copied().collect()),
            due_date: Some(schedule.due_date().timestamp()),
        }
    }
}

/// The follow-up cycle in a [`CompletionRecord`]; always starts `due`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextTaskRecord {
    #[serde(flatten)]
    pub schedule: ScheduleRecord,
    pub status: TaskStatus,
}

/// Result of closing a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_task: Option<NextTaskRecord>,
}

impl From<&Completion> for CompletionRecord {
    fn from(completion: &Completion) -> Self {
        Self {
            status: completion.status,
            next_task: completion.next.as_ref().map(|next| NextTaskRecord {
                schedule: next.into(),
                status: TaskStatus::Due,
            }),
        }
    }
}

impl From<&CompletionResult> for CompletionRecord {
    fn from(result: &CompletionResult) -> Self {
        Self {
            status: result.closed.status,
            next_task: result.next.as_ref().map(|next| NextTaskRecord {
                schedule: (&next.schedule).into(),
                status: next.status,
            }),
        }
    }
}
