//! Plant CRUD operations.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use super::{id_at, timestamp_at};
use crate::{
    error::{DatabaseResultExt, Result},
    models::Plant,
    params::CreatePlant,
};

const INSERT_PLANT_SQL: &str = "INSERT INTO plants (name, species, location, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_PLANT_SQL: &str =
    "SELECT id, name, species, location, notes, created_at, updated_at FROM plants WHERE id = ?1";
const SELECT_PLANTS_SQL: &str =
    "SELECT id, name, species, location, notes, created_at, updated_at FROM plants ORDER BY name COLLATE NOCASE, id";
const DELETE_PLANT_SQL: &str = "DELETE FROM plants WHERE id = ?1";

fn plant_from_row(row: &Row<'_>) -> rusqlite::Result<Plant> {
    Ok(Plant {
        id: id_at(row, 0)?,
        name: row.get(1)?,
        species: row.get(2)?,
        location: row.get(3)?,
        notes: row.get(4)?,
        created_at: timestamp_at(row, 5)?,
        updated_at: timestamp_at(row, 6)?,
        tasks: Vec::new(),
    })
}

impl super::Database {
    /// Inserts a plant and returns it with its new ID.
    pub fn create_plant(&mut self, plant: &CreatePlant, now: Timestamp) -> Result<Plant> {
        let now_str = now.to_string();
        self.connection
            .execute(
                INSERT_PLANT_SQL,
                params![
                    plant.name,
                    plant.species,
                    plant.location,
                    plant.notes,
                    &now_str,
                    &now_str
                ],
            )
            .db_context("Failed to insert plant")?;

        Ok(Plant {
            id: self.connection.last_insert_rowid() as u64,
            name: plant.name.clone(),
            species: plant.species.clone(),
            location: plant.location.clone(),
            notes: plant.notes.clone(),
            created_at: now,
            updated_at: now,
            tasks: Vec::new(),
        })
    }

    /// Fetches a plant without its tasks.
    pub fn get_plant(&self, id: u64) -> Result<Option<Plant>> {
        self.connection
            .query_row(SELECT_PLANT_SQL, params![id as i64], plant_from_row)
            .optional()
            .db_context("Failed to query plant")
    }

    /// All plants, ordered by name.
    pub fn list_plants(&self) -> Result<Vec<Plant>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLANTS_SQL)
            .db_context("Failed to prepare plant query")?;
        let plants = stmt
            .query_map([], plant_from_row)
            .db_context("Failed to query plants")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plants")?;
        Ok(plants)
    }

    /// Deletes a plant; its care tasks go with it. Returns whether a row was
    /// removed.
    pub fn delete_plant(&mut self, id: u64) -> Result<bool> {
        let rows = self
            .connection
            .execute(DELETE_PLANT_SQL, params![id as i64])
            .db_context("Failed to delete plant")?;
        Ok(rows > 0)
    }
}
