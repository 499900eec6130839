//! Status enumeration for care tasks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a care task stands relative to its due date.
///
/// Tasks start `Due`. `Due` becomes `Late` once the due day has passed.
/// `Done` and `Skipped` are set by explicit user action and are terminal for
/// that task; a recurring task continues as a new task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Waiting for its due day, or due today
    #[default]
    Due,

    /// The due day has passed without completion
    Late,

    /// Completed
    Done,

    /// Deliberately not performed this cycle
    Skipped,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "due" => Ok(TaskStatus::Due),
            "late" | "overdue" => Ok(TaskStatus::Late),
            "done" => Ok(TaskStatus::Done),
            "skipped" => Ok(TaskStatus::Skipped),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Due => "due",
            TaskStatus::Late => "late",
            TaskStatus::Done => "done",
            TaskStatus::Skipped => "skipped",
        }
    }

    /// `Done` and `Skipped` end a task instance.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Skipped)
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use tend_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Done.with_icon(), "✓ Done");
    /// assert_eq!(TaskStatus::Late.with_icon(), "! Late");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Due => "○ Due",
            TaskStatus::Late => "! Late",
            TaskStatus::Done => "✓ Done",
            TaskStatus::Skipped => "– Skipped",
        }
    }
}
