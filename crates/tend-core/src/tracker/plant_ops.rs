//! Plant operations for the Tracker.

use jiff::Timestamp;
use log::info;

use super::Tracker;
use crate::{
    error::{CareError, Result},
    models::{Plant, TaskFilter},
    params::{CreatePlant, Id},
};

impl Tracker {
    /// Adds a plant. The name must not be blank.
    pub async fn create_plant(&self, params: &CreatePlant, now: Timestamp) -> Result<Plant> {
        if params.name.trim().is_empty() {
            return Err(CareError::invalid_input("name").with_reason("Plant name must not be empty"));
        }
        let params = params.clone();

        let plant = self
            .with_database(move |db| db.create_plant(&params, now))
            .await?;
        info!("Added plant {} ({})", plant.id, plant.name);
        Ok(plant)
    }

    /// A plant with all of its tasks, statuses as of `now`.
    pub async fn get_plant(&self, params: &Id, now: Timestamp) -> Result<Option<Plant>> {
        let id = params.id;
        let plant = self
            .with_database(move |db| {
                let Some(mut plant) = db.get_plant(id)? else {
                    return Ok(None);
                };
                plant.tasks = db.list_tasks(&TaskFilter {
                    plant_id: Some(id),
                    ..Default::default()
                })?;
                Ok(Some(plant))
            })
            .await?;

        Ok(plant.map(|mut plant| {
            plant.tasks = plant
                .tasks
                .into_iter()
                .map(|task| self.with_effective_status(task, now))
                .collect();
            plant
        }))
    }

    /// All plants, without their tasks.
    pub async fn list_plants(&self) -> Result<Vec<Plant>> {
        self.with_database(|db| db.list_plants()).await
    }

    /// Removes a plant and its tasks, returning what was removed.
    pub async fn remove_plant(&self, params: &Id) -> Result<Plant> {
        let id = params.id;
        let plant = self
            .with_database(move |db| {
                let plant = db.get_plant(id)?.ok_or(CareError::PlantNotFound { id })?;
                db.delete_plant(id)?;
                Ok(plant)
            })
            .await?;
        info!("Removed plant {} ({})", plant.id, plant.name);
        Ok(plant)
    }
}
