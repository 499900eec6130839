//! Filter types for querying care tasks.

use jiff::Timestamp;

use super::{CareKind, TaskStatus};

/// Filter options for querying care tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Only tasks of this plant
    pub plant_id: Option<u64>,

    /// Only tasks of this kind
    pub kind: Option<CareKind>,

    /// Only tasks with one of these stored statuses; empty means any
    pub statuses: Vec<TaskStatus>,

    /// Only tasks due strictly before this instant
    pub due_before: Option<Timestamp>,
}

impl TaskFilter {
    /// Tasks that still need doing (`due` or `late`).
    pub fn open() -> Self {
        Self {
            statuses: vec![TaskStatus::Due, TaskStatus::Late],
            ..Default::default()
        }
    }

    /// Open tasks due before `cutoff`, i.e. the agenda up to that instant.
    pub fn open_due_before(cutoff: Timestamp) -> Self {
        Self {
            due_before: Some(cutoff),
            ..Self::open()
        }
    }
}

impl From<&crate::params::ListTasks> for TaskFilter {
    fn from(params: &crate::params::ListTasks) -> Self {
        let base = if params.all {
            Self::default()
        } else {
            Self::open()
        };
        Self {
            plant_id: params.plant_id,
            kind: params.kind,
            ..base
        }
    }
}
