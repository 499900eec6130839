//! Display implementations for the domain models.

use std::fmt;

use super::datetime::{LocalDate, UtcDateTime};
use crate::models::{CareKind, CareTask, Plant, TaskStatus};

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for CareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        if let Some(species) = &self.species {
            writeln!(f, "- Species: {species}")?;
        }
        if let Some(location) = &self.location {
            writeln!(f, "- Location: {location}")?;
        }
        writeln!(f, "- Added: {}", UtcDateTime(&self.created_at))?;

        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }

        if self.tasks.is_empty() {
            writeln!(f, "\nNo care tasks for this plant.")?;
        } else {
            writeln!(f, "\n## Care")?;
            writeln!(f)?;
            for task in &self.tasks {
                write!(f, "{task}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for CareTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            capitalized(self.kind.as_str()),
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- Plant: {}", self.plant_id)?;
        writeln!(f, "- Due: {}", LocalDate(self.schedule.due_date()))?;
        if let Some(rule) = self.schedule.recurrence_rule() {
            writeln!(f, "- Repeats: {rule}")?;
        }
        writeln!(f, "- Since: {}", LocalDate(self.schedule.start_date()))?;
        if let Some(at) = &self.completed_at {
            writeln!(f, "- Closed: {}", UtcDateTime(at))?;
        }
        if let Some(previous) = self.previous_task_id {
            writeln!(f, "- Follows: task {previous}")?;
        }
        writeln!(f)?;

        if let Some(note) = &self.note {
            writeln!(f, "{note}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
