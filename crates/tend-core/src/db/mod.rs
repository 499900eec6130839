//! SQLite persistence for plants and care tasks.
//!
//! Queries are split by table ([`plant_queries`], [`task_queries`]); schema
//! setup lives in [`migrations`]. All methods are synchronous and are called
//! from [`crate::Tracker`] inside `spawn_blocking`.

use std::path::Path;

use jiff::Timestamp;
use rusqlite::{types::Type, Connection, Row};

use crate::{
    calendar::CareCalendar,
    care::TaskStatusEngine,
    error::{DatabaseResultExt, Result},
};

pub mod migrations;
pub mod plant_queries;
pub mod task_queries;

/// Database connection plus the calendar used to rebuild stored schedules.
pub struct Database {
    connection: Connection,
    calendar: CareCalendar,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and initializes the
    /// schema.
    pub fn new<P: AsRef<Path>>(path: P, calendar: CareCalendar) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self {
            connection,
            calendar,
        };
        db.initialize_schema()?;
        Ok(db)
    }

    pub fn calendar(&self) -> &CareCalendar {
        &self.calendar
    }

    fn engine(&self) -> TaskStatusEngine {
        TaskStatusEngine::new(self.calendar.clone())
    }
}

/// Reads an RFC 3339 column.
fn timestamp_at(row: &Row<'_>, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

fn optional_timestamp_at(row: &Row<'_>, index: usize) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(index)?
        .map(|value| {
            value.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Parses a text column through `FromStr`, reporting the bad value.
fn parsed_at<T: std::str::FromStr>(row: &Row<'_>, index: usize) -> rusqlite::Result<T> {
    let value: String = row.get(index)?;
    value.parse::<T>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            Type::Text,
            format!("Invalid value: {value}").into(),
        )
    })
}

fn id_at(row: &Row<'_>, index: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(index)? as u64)
}
