//! Data models for plants and care tasks.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping presentation out of the data
//! definitions.
//!
//! # Examples
//!
//! ```rust
//! use tend_core::{
//!     care::{CareSchedule, RecurrenceRule},
//!     models::{CareKind, CareTask, TaskStatus},
//! };
//! use jiff::{civil::date, tz::TimeZone, Timestamp};
//!
//! let start = date(2021, 6, 10).at(9, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap();
//! let schedule = CareSchedule::from_recurrence(start, RecurrenceRule::daily(3).unwrap()).unwrap();
//!
//! let task = CareTask {
//!     id: 1,
//!     plant_id: 1,
//!     kind: CareKind::Water,
//!     note: None,
//!     schedule,
//!     status: TaskStatus::Due,
//!     completed_at: None,
//!     previous_task_id: None,
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//! };
//! assert!(task.to_string().contains("every 3 days"));
//! ```

pub mod filters;
pub mod plant;
pub mod status;
pub mod task;

#[cfg(test)]
mod tests;

pub use filters::TaskFilter;
pub use plant::Plant;
pub use status::TaskStatus;
pub use task::{CareKind, CareTask};
