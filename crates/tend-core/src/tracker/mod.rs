//! Async application facade over the database and the status engine.
//!
//! A [`Tracker`] owns only a database path and a calendar. Every operation
//! opens its own connection on a blocking thread, so a tracker is cheap to
//! clone and share between the CLI and the MCP server.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │  (handlers.rs)  │───▶│ (plant_ops,     │───▶│   (via db/)     │
//! │                 │    │  task_ops)      │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Operations that depend on the current time take `now` explicitly; the
//! tracker itself never reads the clock.
//!
//! ```rust,no_run
//! use tend_core::{params::{CreatePlant, CreateTask}, care::RecurrenceKind, TrackerBuilder};
//! use jiff::Timestamp;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("/tmp/tend.db"))
//!     .with_time_zone(Some("Europe/Paris"))
//!     .build()
//!     .await?;
//!
//! let now = Timestamp::now();
//! let basil = tracker
//!     .create_plant(&CreatePlant { name: "Basil".to_string(), ..Default::default() }, now)
//!     .await?;
//! tracker
//!     .create_task(
//!         &CreateTask {
//!             plant_id: basil.id,
//!             repeat: Some(RecurrenceKind::Daily),
//!             interval: Some(2),
//!             ..Default::default()
//!         },
//!         now,
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    calendar::CareCalendar,
    care::TaskStatusEngine,
    db::Database,
    error::{CareError, Result},
    models::CareTask,
};

pub mod builder;
pub mod handlers;
pub mod plant_ops;
pub mod task_ops;


pub use builder::TrackerBuilder;

/// Entry point for plant and care task operations.
#[derive(Debug, Clone)]
pub struct Tracker {
    db_path: PathBuf,
    engine: TaskStatusEngine,
}

impl Tracker {
    pub(crate) fn new(db_path: PathBuf, calendar: CareCalendar) -> Self {
        Self {
            db_path,
            engine: TaskStatusEngine::new(calendar),
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    pub fn calendar(&self) -> &CareCalendar {
        self.engine.calendar()
    }

    /// Runs `operation` against a fresh connection on the blocking pool.
    async fn with_database<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        let calendar = self.calendar().clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path, calendar)?;
            operation(&mut db)
        })
        .await
        .map_err(CareError::join)?
    }

    /// Replaces stored open statuses with what they are at `now`.
    fn with_effective_status(&self, mut task: CareTask, now: jiff::Timestamp) -> CareTask {
        task.status = self
            .engine
            .effective_status(task.status, &task.schedule, now);
        task
    }
}
