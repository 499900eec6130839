//! Parameter structures shared by the CLI and the MCP server.
//!
//! These types carry only serde derives (plus `JsonSchema` behind the
//! `schema` feature). Interface layers wrap them with their own derives and
//! convert into them:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Dates arrive as strings and are parsed against the tracker's
//! [`CareCalendar`], so `2021-06-10` means midnight in the configured zone.

use jiff::{Timestamp, Zoned};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    calendar::CareCalendar,
    care::{CareSchedule, RecurrenceKind, RecurrenceRule},
    error::{CareError, Result},
    models::CareKind,
};

/// Parameters for operations that take just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the plant or task to operate on
    pub id: u64,
}

/// Parameters for adding a plant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlant {
    /// Name of the plant (required)
    pub name: String,
    /// Species or cultivar
    pub species: Option<String>,
    /// Where the plant lives
    pub location: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Parameters for listing care tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListTasks {
    /// Only tasks of this plant
    pub plant_id: Option<u64>,
    /// Only tasks of this kind
    pub kind: Option<CareKind>,
    /// Include completed and skipped tasks
    #[serde(default)]
    pub all: bool,
}

/// Parameters for adding a care task.
///
/// A task either repeats (`repeat` is set and the due date follows from the
/// rule) or is a one-off with an explicit `due` date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateTask {
    /// ID of the plant the task belongs to
    pub plant_id: u64,
    /// Kind of care ('water', 'fertilize', 'mist', 'prune', 'repot', 'rotate', 'clean' or 'other')
    #[serde(default)]
    pub kind: CareKind,
    /// Optional instructions
    pub note: Option<String>,
    /// Start of the first cycle (RFC 3339 or YYYY-MM-DD); defaults to now
    pub start: Option<String>,
    /// Due date of a one-off task (RFC 3339 or YYYY-MM-DD)
    pub due: Option<String>,
    /// Recurrence: 'daily', 'weekly' or 'monthly'
    pub repeat: Option<RecurrenceKind>,
    /// Repeat every N days, weeks or months (default 1)
    pub interval: Option<u32>,
    /// Weekdays (1 = Monday ... 7 = Sunday) or days of the month (1-31)
    pub days: Option<Vec<u8>>,
}

impl CreateTask {
    /// Builds the first cycle's schedule, with `now` as the default start.
    ///
    /// # Errors
    ///
    /// * `CareError::InvalidInput` - unparsable dates, a missing or
    ///   conflicting due date, or recurrence options without `repeat`
    /// * `CareError::Schedule` - the dates or rule admit no valid schedule
    ///
    /// ```rust
    /// use tend_core::{care::RecurrenceKind, params::CreateTask, CareCalendar};
    ///
    /// let params = CreateTask {
    ///     plant_id: 1,
    ///     start: Some("2021-06-10".to_string()),
    ///     repeat: Some(RecurrenceKind::Weekly),
    ///     days: Some(vec![2, 4, 6]),
    ///     ..Default::default()
    /// };
    /// let now = "2021-06-10T12:00:00Z".parse()?;
    /// let schedule = params.schedule(&CareCalendar::utc(), now)?;
    /// assert_eq!(schedule.due_date().date().to_string(), "2021-06-12");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn schedule(&self, calendar: &CareCalendar, now: Timestamp) -> Result<CareSchedule> {
        let start = match &self.start {
            Some(start) => calendar.parse("start", start)?,
            None => calendar.to_zoned(now),
        };

        let Some(kind) = self.repeat else {
            if self.interval.is_some() || self.days.is_some() {
                return Err(CareError::invalid_input("repeat")
                    .with_reason("Interval and days only apply to repeating tasks"));
            }
            let due = self.parse_due(calendar)?.ok_or_else(|| {
                CareError::invalid_input("due")
                    .with_reason("A one-off task needs a due date; set 'due' or 'repeat'")
            })?;
            return Ok(CareSchedule::from_fixed_due_date(start, due)?);
        };

        if self.due.is_some() {
            return Err(CareError::invalid_input("due")
                .with_reason("A repeating task takes its due date from the recurrence"));
        }
        let rule = RecurrenceRule::from_parts(kind, self.interval.unwrap_or(1), self.days.clone())?;
        Ok(CareSchedule::from_recurrence(start, rule)?)
    }

    fn parse_due(&self, calendar: &CareCalendar) -> Result<Option<Zoned>> {
        self.due
            .as_deref()
            .map(|due| calendar.parse("due", due))
            .transpose()
    }
}

/// Parameters for completing or skipping a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CloseTask {
    /// ID of the task
    pub id: u64,
    /// When the care happened (RFC 3339 or YYYY-MM-DD); defaults to now
    pub at: Option<String>,
}

impl CloseTask {
    /// The closing instant, defaulting to `now`.
    pub fn closed_at(&self, calendar: &CareCalendar, now: Timestamp) -> Result<Timestamp> {
        match &self.at {
            Some(at) => Ok(calendar.parse("at", at)?.timestamp()),
            None => Ok(now),
        }
    }
}

/// Parameters for the agenda.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Agenda {
    /// Only tasks of this plant
    pub plant_id: Option<u64>,
    /// Also show tasks due within this many days after today
    #[serde(default)]
    pub days_ahead: u32,
}
