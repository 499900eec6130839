//! Schema initialization and versioning.

use log::{debug, info};

use crate::error::{CareError, DatabaseResultExt, Result};

/// Version written to `PRAGMA user_version` by this build.
pub const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Enables foreign keys, applies the embedded schema and stamps the
    /// schema version.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let version: i64 = self
            .connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")?;
        if version > SCHEMA_VERSION {
            return Err(CareError::Configuration {
                message: format!(
                    "Database schema version {version} is newer than supported version {SCHEMA_VERSION}"
                ),
            });
        }

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        if version < SCHEMA_VERSION {
            info!("Initialized database schema version {SCHEMA_VERSION}");
            self.connection
                .execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
                .db_context("Failed to record schema version")?;
        } else {
            debug!("Database schema version {version} is current");
        }

        Ok(())
    }

    /// The schema version stored in the open database.
    pub fn schema_version(&self) -> Result<i64> {
        self.connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")
    }
}
