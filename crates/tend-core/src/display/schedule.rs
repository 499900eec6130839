//! Recurrence rules and schedules in words.

use std::{collections::BTreeSet, fmt};

use super::datetime::LocalDate;
use crate::care::{CareSchedule, RecurrenceRule};

const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceRule::Daily { interval } => write_every(f, interval.get(), "day"),
            RecurrenceRule::Weekly { interval, days } => {
                write_every(f, interval.get(), "week")?;
                match days {
                    Some(days) => write!(f, " on {}", weekday_list(days)),
                    None => write!(f, " (no weekdays set)"),
                }
            }
            RecurrenceRule::Monthly { interval, days } => {
                write_every(f, interval.get(), "month")?;
                match days {
                    Some(days) => write!(f, " on the {}", month_day_list(days)),
                    None => write!(f, " (no days set)"),
                }
            }
        }
    }
}

impl fmt::Display for CareSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "due {}", LocalDate(self.due_date()))?;
        if let Some(rule) = self.recurrence_rule() {
            write!(f, " ({rule})")?;
        }
        Ok(())
    }
}

fn write_every(f: &mut fmt::Formatter<'_>, interval: u32, unit: &str) -> fmt::Result {
    if interval == 1 {
        write!(f, "every {unit}")
    } else {
        write!(f, "every {interval} {unit}s")
    }
}

fn weekday_list(days: &BTreeSet<u8>) -> String {
    days.iter()
        .filter_map(|&day| WEEKDAY_NAMES.get(usize::from(day).checked_sub(1)?))
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

fn month_day_list(days: &BTreeSet<u8>) -> String {
    let names: Vec<String> = days.iter().map(|&day| ordinal(day)).collect();
    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} and {last}", rest.join(", ")),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}

/// `1` -> `1st`, `12` -> `12th`, `22` -> `22nd`.
pub fn ordinal(day: u8) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}
