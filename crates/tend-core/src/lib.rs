//! Core library for the tend plant-care tracker.
//!
//! The crate has two layers:
//!
//! - a pure scheduling core ([`care`], [`calendar`]): recurrence rules,
//!   validated schedules and the status engine. It never reads the clock or
//!   the ambient time zone; callers pass a [`CareCalendar`] and "now".
//! - an application layer ([`Tracker`], [`db`], [`display`]): SQLite
//!   persistence, an async facade and markdown rendering shared by the CLI
//!   and the MCP server.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tend_core::{params::{CloseTask, CreatePlant, CreateTask}, care::RecurrenceKind, TrackerBuilder};
//! use jiff::Timestamp;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("plants.db"))
//!     .build()
//!     .await?;
//!
//! let now = Timestamp::now();
//! let fern = tracker
//!     .create_plant(&CreatePlant { name: "Boston fern".to_string(), ..Default::default() }, now)
//!     .await?;
//! let task = tracker
//!     .create_task(
//!         &CreateTask {
//!             plant_id: fern.id,
//!             repeat: Some(RecurrenceKind::Weekly),
//!             days: Some(vec![1, 4]),
//!             ..Default::default()
//!         },
//!         now,
//!     )
//!     .await?;
//!
//! let done = tracker.complete_task_result(&CloseTask { id: task.id, at: None }, now).await?;
//! println!("{done}");
//! # Ok(())
//! # }
//! ```

pub mod calendar;
pub mod care;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod record;
pub mod tracker;

pub use calendar::CareCalendar;
pub use care::{CareSchedule, CloseAction, Completion, RecurrenceKind, RecurrenceRule, TaskStatusEngine};
pub use db::Database;
pub use error::{CareError, Result, ScheduleError};
pub use models::{CareKind, CareTask, Plant, TaskFilter, TaskStatus};
pub use record::{CompletionRecord, NextTaskRecord, ScheduleRecord};
pub use tracker::{Tracker, TrackerBuilder};
