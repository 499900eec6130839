//! Recurrence rules and next-occurrence computation.

use std::{collections::BTreeSet, num::NonZeroU32, str::FromStr};

use jiff::{civil::DateTime, Span, Zoned};
use serde::{Deserialize, Serialize};

use crate::error::{CareError, Result};

/// ISO weekday values, Monday = 1 through Sunday = 7.
///
/// Sunday-first numbering would make Thursday 5; under ISO numbering
/// Thursday is 4 and `{2, 4, 6}` after Thu 2021-06-10 lands on Sat
/// 2021-06-12 (value 6).
pub const WEEKDAY_RANGE: std::ops::RangeInclusive<u8> = 1..=7;

/// Day-of-month values; days past the end of a short month clamp to its last
/// day.
pub const MONTH_DAY_RANGE: std::ops::RangeInclusive<u8> = 1..=31;

/// The three supported recurrence shapes, without their parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Monthly,
}

impl RecurrenceKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceKind::Daily => "daily",
            RecurrenceKind::Weekly => "weekly",
            RecurrenceKind::Monthly => "monthly",
        }
    }
}

impl FromStr for RecurrenceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(RecurrenceKind::Daily),
            "weekly" | "week" | "w" => Ok(RecurrenceKind::Weekly),
            "monthly" | "month" | "m" => Ok(RecurrenceKind::Monthly),
            _ => Err(format!("Invalid recurrence kind: {s}")),
        }
    }
}

/// How often a care task repeats.
///
/// `Weekly` and `Monthly` carry an optional set of calendar days. Without a
/// day set they have no computable next occurrence.
///
/// When `interval` is greater than one, calendar periods (Monday-start weeks
/// or calendar months) are counted from the period containing the reference
/// date: matching days still ahead in that period come first, otherwise the
/// earliest matching day `interval` periods later is used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecurrenceRule {
    Daily {
        interval: NonZeroU32,
    },
    Weekly {
        interval: NonZeroU32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        days: Option<BTreeSet<u8>>,
    },
    Monthly {
        interval: NonZeroU32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        days: Option<BTreeSet<u8>>,
    },
}

impl RecurrenceRule {
    /// Every `interval` days.
    pub fn daily(interval: u32) -> Result<Self> {
        Ok(RecurrenceRule::Daily {
            interval: checked_interval(interval)?,
        })
    }

    /// Every `interval` weeks, on the given weekdays (Monday = 1).
    pub fn weekly<I>(interval: u32, days: Option<I>) -> Result<Self>
    where
        I: IntoIterator<Item = u8>,
    {
        Ok(RecurrenceRule::Weekly {
            interval: checked_interval(interval)?,
            days: checked_days(days, WEEKDAY_RANGE, "weekday")?,
        })
    }

    /// Every `interval` months, on the given days of the month.
    pub fn monthly<I>(interval: u32, days: Option<I>) -> Result<Self>
    where
        I: IntoIterator<Item = u8>,
    {
        Ok(RecurrenceRule::Monthly {
            interval: checked_interval(interval)?,
            days: checked_days(days, MONTH_DAY_RANGE, "day of month")?,
        })
    }

    /// Builds a rule from its flattened storage form.
    ///
    /// Day constraints on a daily rule are rejected rather than ignored.
    pub fn from_parts(kind: RecurrenceKind, interval: u32, days: Option<Vec<u8>>) -> Result<Self> {
        match kind {
            RecurrenceKind::Daily => match days {
                Some(days) if !days.is_empty() => Err(CareError::invalid_input("day_constraints")
                    .with_reason("Daily recurrence does not take day constraints")),
                _ => Self::daily(interval),
            },
            RecurrenceKind::Weekly => Self::weekly(interval, days),
            RecurrenceKind::Monthly => Self::monthly(interval, days),
        }
    }

    pub fn kind(&self) -> RecurrenceKind {
        match self {
            RecurrenceRule::Daily { .. } => RecurrenceKind::Daily,
            RecurrenceRule::Weekly { .. } => RecurrenceKind::Weekly,
            RecurrenceRule::Monthly { .. } => RecurrenceKind::Monthly,
        }
    }

    pub fn interval(&self) -> u32 {
        match self {
            RecurrenceRule::Daily { interval }
            | RecurrenceRule::Weekly { interval, .. }
            | RecurrenceRule::Monthly { interval, .. } => interval.get(),
        }
    }

    /// Weekday or day-of-month constraints, if the shape has any.
    pub fn day_constraints(&self) -> Option<&BTreeSet<u8>> {
        match self {
            RecurrenceRule::Daily { .. } => None,
            RecurrenceRule::Weekly { days, .. } | RecurrenceRule::Monthly { days, .. } => {
                days.as_ref()
            }
        }
    }

    /// The first occurrence strictly after `after`.
    ///
    /// Time of day and time zone are carried over from `after`; day
    /// arithmetic happens on the civil calendar of that zone. Returns `None`
    /// when the rule has no usable day constraints or the result would leave
    /// the supported date range.
    pub fn next_date(&self, after: &Zoned) -> Option<Zoned> {
        let start = after.datetime();
        let next = match self {
            RecurrenceRule::Daily { interval } => add_days(start, i64::from(interval.get()))?,
            RecurrenceRule::Weekly { interval, days } => {
                next_weekday(start, interval.get(), days.as_ref()?)?
            }
            RecurrenceRule::Monthly { interval, days } => {
                next_month_day(start, interval.get(), days.as_ref()?)?
            }
        };
        next.to_zoned(after.time_zone().clone()).ok()
    }
}

fn checked_interval(interval: u32) -> Result<NonZeroU32> {
    NonZeroU32::new(interval)
        .ok_or_else(|| CareError::invalid_input("interval").with_reason("Interval must be at least 1"))
}

fn checked_days<I>(
    days: Option<I>,
    range: std::ops::RangeInclusive<u8>,
    what: &str,
) -> Result<Option<BTreeSet<u8>>>
where
    I: IntoIterator<Item = u8>,
{
    let Some(days) = days else {
        return Ok(None);
    };
    let days: BTreeSet<u8> = days.into_iter().collect();
    if days.is_empty() {
        return Err(CareError::invalid_input("day_constraints")
            .with_reason("Day constraints must not be empty when given"));
    }
    if let Some(bad) = days.iter().find(|&&day| !range.contains(&day)) {
        return Err(CareError::invalid_input("day_constraints").with_reason(format!(
            "{bad} is not a valid {what} ({}-{})",
            range.start(),
            range.end()
        )));
    }
    Ok(Some(days))
}

fn add_days(start: DateTime, days: i64) -> Option<DateTime> {
    start.checked_add(Span::new().try_days(days).ok()?).ok()
}

fn next_weekday(start: DateTime, interval: u32, days: &BTreeSet<u8>) -> Option<DateTime> {
    let weekdays: Vec<i64> = days
        .iter()
        .filter(|&&day| WEEKDAY_RANGE.contains(&day))
        .map(|&day| i64::from(day))
        .collect();
    let first = *weekdays.first()?;
    let today = i64::from(start.weekday().to_monday_one_offset());

    let offset = match weekdays.iter().find(|&&day| day > today) {
        Some(day) => day - today,
        None => 7 * i64::from(interval) - today + first,
    };
    add_days(start, offset)
}

fn next_month_day(start: DateTime, interval: u32, days: &BTreeSet<u8>) -> Option<DateTime> {
    let month_days: Vec<i8> = days
        .iter()
        .filter(|&&day| MONTH_DAY_RANGE.contains(&day))
        .filter_map(|&day| i8::try_from(day).ok())
        .collect();
    let first = *month_days.first()?;

    let length = start.days_in_month();
    if let Some(day) = month_days
        .iter()
        .map(|&day| day.min(length))
        .find(|&day| day > start.day())
    {
        return start.with().day(day).build().ok();
    }

    let months = Span::new().try_months(i64::from(interval)).ok()?;
    let month = start.first_of_month().checked_add(months).ok()?;
    month.with().day(first.min(month.days_in_month())).build().ok()
}
