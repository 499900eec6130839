//! The care-task scheduling core.
//!
//! Everything in this module is pure: no I/O, no clock reads, no shared
//! state. Values flow one way:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ RecurrenceRule  │    │  CareSchedule   │    │TaskStatusEngine │
//! │ (next_date)     │───▶│ (start, due)    │───▶│ (classify,      │
//! │                 │    │                 │    │  complete)      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`recurrence`]: the three recurrence shapes and next-occurrence math
//! - [`schedule`]: a start/due pair that can only be built in a consistent
//!   state
//! - [`engine`]: due/late classification and cycle completion
//!
//! # Example
//!
//! ```rust
//! use jiff::{civil::date, tz::TimeZone};
//! use tend_core::{
//!     care::{CareSchedule, RecurrenceRule, TaskStatusEngine},
//!     CareCalendar, TaskStatus,
//! };
//!
//! let start = date(2021, 6, 10).at(8, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap();
//! let rule = RecurrenceRule::weekly(1, Some([2, 4, 6])).unwrap();
//! let schedule = CareSchedule::from_recurrence(start, rule).unwrap();
//! assert_eq!(schedule.due_date().date(), date(2021, 6, 12));
//!
//! let engine = TaskStatusEngine::new(CareCalendar::utc());
//! let completed_at = date(2021, 6, 12).at(18, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap();
//! let completion = engine.complete(&schedule, completed_at.timestamp()).unwrap();
//! assert_eq!(completion.status, TaskStatus::Done);
//! assert_eq!(completion.next.unwrap().due_date().date(), date(2021, 6, 15));
//! ```

pub mod engine;
pub mod recurrence;
pub mod schedule;


pub use engine::{CloseAction, Completion, TaskStatusEngine};
pub use recurrence::{RecurrenceKind, RecurrenceRule};
pub use schedule::CareSchedule;
