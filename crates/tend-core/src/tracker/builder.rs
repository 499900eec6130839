//! Builder for [`Tracker`] instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::Tracker;
use crate::{
    calendar::CareCalendar,
    db::Database,
    error::{CareError, Result},
};

/// Configures the database location and the care calendar.
#[derive(Debug, Clone, Default)]
pub struct TrackerBuilder {
    database_path: Option<PathBuf>,
    time_zone: Option<String>,
    calendar: Option<CareCalendar>,
}

impl TrackerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/tend/tend.db` or `~/.local/share/tend/tend.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the IANA time zone in which care days are counted.
    ///
    /// Defaults to the system time zone.
    pub fn with_time_zone<S: AsRef<str>>(mut self, name: Option<S>) -> Self {
        if let Some(name) = name {
            self.time_zone = Some(name.as_ref().to_string());
        }
        self
    }

    /// Uses an already constructed calendar; takes precedence over
    /// [`with_time_zone`](Self::with_time_zone).
    pub fn with_calendar(mut self, calendar: CareCalendar) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Builds the tracker, creating the database if needed.
    ///
    /// # Errors
    ///
    /// Returns `CareError::InvalidInput` if the time zone is unknown
    /// Returns `CareError::FileSystem` if the database directory cannot be created
    /// Returns `CareError::Database` if database initialization fails
    pub async fn build(self) -> Result<Tracker> {
        let calendar = match (self.calendar, self.time_zone) {
            (Some(calendar), _) => calendar,
            (None, Some(name)) => CareCalendar::from_name(&name)?,
            (None, None) => CareCalendar::system(),
        };

        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CareError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!(
            "Opening {} with calendar {}",
            db_path.display(),
            calendar.name().unwrap_or("(unnamed zone)")
        );

        let init_path = db_path.clone();
        let init_calendar = calendar.clone();
        task::spawn_blocking(move || Database::new(&init_path, init_calendar).map(drop))
            .await
            .map_err(CareError::join)??;

        Ok(Tracker::new(db_path, calendar))
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("tend")
            .place_data_file("tend.db")
            .map_err(|e| CareError::XdgDirectory(e.to_string()))
    }
}
