//! Care task model definition.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::TaskStatus;
use crate::care::CareSchedule;

/// The kind of care a task asks for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum CareKind {
    #[default]
    Water,
    Fertilize,
    Mist,
    Prune,
    Repot,
    Rotate,
    Clean,
    Other,
}

impl CareKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CareKind::Water => "water",
            CareKind::Fertilize => "fertilize",
            CareKind::Mist => "mist",
            CareKind::Prune => "prune",
            CareKind::Repot => "repot",
            CareKind::Rotate => "rotate",
            CareKind::Clean => "clean",
            CareKind::Other => "other",
        }
    }
}

impl FromStr for CareKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "water" => Ok(CareKind::Water),
            "fertilize" | "fertilise" | "feed" => Ok(CareKind::Fertilize),
            "mist" => Ok(CareKind::Mist),
            "prune" => Ok(CareKind::Prune),
            "repot" => Ok(CareKind::Repot),
            "rotate" => Ok(CareKind::Rotate),
            "clean" => Ok(CareKind::Clean),
            "other" => Ok(CareKind::Other),
            _ => Err(format!("Invalid care kind: {s}")),
        }
    }
}

/// One cycle of care for a plant.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CareTask {
    /// Unique identifier for the task
    pub id: u64,

    /// ID of the plant this task belongs to
    pub plant_id: u64,

    /// What needs doing
    pub kind: CareKind,

    /// Optional instructions ("use rain water")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Start and due dates of this cycle
    pub schedule: CareSchedule,

    /// Stored status. `Due` tasks may already be late; see
    /// [`crate::care::TaskStatusEngine::effective_status`].
    pub status: TaskStatus,

    /// When the task was completed or skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,

    /// The task whose completion created this one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_task_id: Option<u64>,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last updated (UTC)
    pub updated_at: Timestamp,
}

impl CareTask {
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }
}
