//! Wrappers that describe the outcome of a write operation.

use std::fmt;

use crate::models::{CareTask, Plant};

/// A freshly created resource, preceded by a confirmation line.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plant> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plant with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<CareTask> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created care task with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// A removed resource.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Plant> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Removed plant '{}' (ID: {}) and its care tasks",
            self.resource.name, self.resource.id
        )
    }
}

/// A closed task together with the task opened for its next cycle.
///
/// ```rust
/// # use tend_core::{care::{CareSchedule, RecurrenceRule}, display::CompletionResult,
/// #     models::{CareKind, CareTask, TaskStatus}};
/// # use jiff::{civil::date, tz::TimeZone, Timestamp};
/// let start = date(2021, 6, 10).at(9, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap();
/// let due = date(2021, 6, 11).at(9, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap();
/// let closed = CareTask {
///     id: 7,
///     plant_id: 1,
///     kind: CareKind::Repot,
///     note: None,
///     schedule: CareSchedule::from_fixed_due_date(start, due).unwrap(),
///     status: TaskStatus::Done,
///     completed_at: Some(Timestamp::now()),
///     previous_task_id: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
/// let output = CompletionResult::new(closed, None).to_string();
/// assert!(output.starts_with("Closed task 7 as done"));
/// assert!(output.contains("does not repeat"));
/// ```
pub struct CompletionResult {
    pub closed: CareTask,
    pub next: Option<CareTask>,
}

impl CompletionResult {
    pub fn new(closed: CareTask, next: Option<CareTask>) -> Self {
        Self { closed, next }
    }
}

impl fmt::Display for CompletionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Closed task {} as {}",
            self.closed.id, self.closed.status
        )?;
        writeln!(f)?;
        match &self.next {
            Some(next) => {
                writeln!(f, "## Next cycle")?;
                writeln!(f)?;
                write!(f, "{next}")
            }
            None => writeln!(f, "This task does not repeat."),
        }
    }
}
