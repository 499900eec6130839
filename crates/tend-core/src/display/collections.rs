//! Newtype wrappers for displaying lists of models.

use std::{fmt, ops::Index};

use crate::models::{CareTask, Plant};

/// A list of plants, one line each.
///
/// ```rust
/// use tend_core::{display::Plants, models::Plant};
/// use jiff::Timestamp;
///
/// let plant = Plant {
///     id: 1,
///     name: "Kitchen basil".to_string(),
///     species: Some("Ocimum basilicum".to_string()),
///     location: None,
///     notes: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     tasks: vec![],
/// };
/// let output = Plants(vec![plant]).to_string();
/// assert!(output.contains("1. Kitchen basil"));
/// ```
pub struct Plants(pub Vec<Plant>);

impl Plants {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl IntoIterator for Plants {
    type Item = Plant;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Plants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plants found.");
        }
        for plant in &self.0 {
            write!(f, "- {}. {}", plant.id, plant.name)?;
            match (&plant.species, &plant.location) {
                (Some(species), Some(location)) => write!(f, " ({species}, {location})")?,
                (Some(detail), None) | (None, Some(detail)) => write!(f, " ({detail})")?,
                (None, None) => {}
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A list of care tasks in full task format.
pub struct Tasks(pub Vec<CareTask>);

impl Tasks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&CareTask> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CareTask> {
        self.0.iter()
    }
}

impl Index<usize> for Tasks {
    type Output = CareTask;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Tasks {
    type Item = CareTask;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tasks {
    type Item = &'a CareTask;
    type IntoIter = std::slice::Iter<'a, CareTask>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No care tasks found.");
        }
        for task in &self.0 {
            write!(f, "{task}")?;
        }
        Ok(())
    }
}
