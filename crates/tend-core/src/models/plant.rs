//! Plant model definition.

use jiff::Timestamp;
use serde::Serialize;

use super::CareTask;

/// A plant being cared for.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Plant {
    /// Unique identifier for the plant
    pub id: u64,

    /// Name the plant is known by ("Kitchen basil")
    pub name: String,

    /// Species or cultivar
    pub species: Option<String>,

    /// Where the plant lives
    pub location: Option<String>,

    /// Free-form notes
    pub notes: Option<String>,

    /// Timestamp when the plant was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plant was last updated (UTC)
    pub updated_at: Timestamp,

    /// Care tasks of this plant, newest cycle last
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<CareTask>,
}
