//! Status classification and cycle completion.

use jiff::Timestamp;
use log::debug;

use super::CareSchedule;
use crate::{
    calendar::CareCalendar,
    error::{CareError, ScheduleError},
    models::TaskStatus,
};

/// Outcome of closing a task cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Status the closed task takes
    pub status: TaskStatus,
    /// Schedule of the follow-up cycle, present for recurring schedules
    pub next: Option<CareSchedule>,
}

/// How a cycle is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    Complete,
    Skip,
}

/// Pure status rules for care tasks.
///
/// The engine never reads the clock; every operation takes the instant it
/// should reason about.
#[derive(Debug, Clone, Default)]
pub struct TaskStatusEngine {
    calendar: CareCalendar,
}

impl TaskStatusEngine {
    pub fn new(calendar: CareCalendar) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &CareCalendar {
        &self.calendar
    }

    /// `Late` when the due day is before the day of `now`, `Due` otherwise.
    ///
    /// Only the due date and `now` matter.
    pub fn classify(&self, schedule: &CareSchedule, now: Timestamp) -> TaskStatus {
        if self.is_before_day_of(schedule, now) {
            TaskStatus::Late
        } else {
            TaskStatus::Due
        }
    }

    /// The status to show for a stored task at `now`.
    ///
    /// Terminal statuses stick; open ones are reclassified.
    pub fn effective_status(
        &self,
        stored: TaskStatus,
        schedule: &CareSchedule,
        now: Timestamp,
    ) -> TaskStatus {
        if stored.is_terminal() {
            stored
        } else {
            self.classify(schedule, now)
        }
    }

    /// Closes a cycle as completed at `completed_at`.
    ///
    /// Completing after the due day yields `Late`; completing on the due day
    /// or any time before it yields `Done`. A recurring schedule produces the
    /// next cycle starting at the completion instant. If that next cycle
    /// cannot be computed the whole completion fails.
    pub fn complete(
        &self,
        schedule: &CareSchedule,
        completed_at: Timestamp,
    ) -> Result<Completion, ScheduleError> {
        let status = if self.is_before_day_of(schedule, completed_at) {
            TaskStatus::Late
        } else {
            TaskStatus::Done
        };
        Ok(Completion {
            status,
            next: self.next_cycle(schedule, completed_at)?,
        })
    }

    /// Closes a cycle without doing it. Recurring schedules still roll over.
    pub fn skip(
        &self,
        schedule: &CareSchedule,
        skipped_at: Timestamp,
    ) -> Result<Completion, ScheduleError> {
        Ok(Completion {
            status: TaskStatus::Skipped,
            next: self.next_cycle(schedule, skipped_at)?,
        })
    }

    /// Dispatches to [`complete`](Self::complete) or [`skip`](Self::skip).
    pub fn close(
        &self,
        action: CloseAction,
        schedule: &CareSchedule,
        closed_at: Timestamp,
    ) -> Result<Completion, ScheduleError> {
        match action {
            CloseAction::Complete => self.complete(schedule, closed_at),
            CloseAction::Skip => self.skip(schedule, closed_at),
        }
    }

    /// Rejects completing or skipping a task that is already closed.
    pub fn ensure_open(id: u64, status: TaskStatus) -> Result<(), CareError> {
        if status.is_terminal() {
            return Err(CareError::TaskClosed {
                id,
                status: status.as_str().to_string(),
            });
        }
        Ok(())
    }

    fn is_before_day_of(&self, schedule: &CareSchedule, instant: Timestamp) -> bool {
        self.calendar.date_of(schedule.due_date().timestamp()) < self.calendar.date_of(instant)
    }

    fn next_cycle(
        &self,
        schedule: &CareSchedule,
        closed_at: Timestamp,
    ) -> Result<Option<CareSchedule>, ScheduleError> {
        let Some(rule) = schedule.recurrence_rule() else {
            return Ok(None);
        };
        let next = CareSchedule::from_recurrence(self.calendar.to_zoned(closed_at), rule.clone())?;
        debug!(
            "next cycle for {:?}: start {} due {}",
            rule,
            next.start_date(),
            next.due_date()
        );
        Ok(Some(next))
    }
}
