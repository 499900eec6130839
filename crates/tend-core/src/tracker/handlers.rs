//! Operations returning display wrappers, shared by the CLI and the MCP
//! server so both print the same markdown.

use jiff::Timestamp;

use super::Tracker;
use crate::{
    display::{CompletionResult, CreateResult, DeleteResult, OperationStatus, Plants, Tasks},
    error::{CareError, Result},
    models::{CareTask, Plant},
    params::{Agenda, CloseTask, CreatePlant, CreateTask, Id, ListTasks},
};

impl Tracker {
    pub async fn create_plant_result(
        &self,
        params: &CreatePlant,
        now: Timestamp,
    ) -> Result<CreateResult<Plant>> {
        self.create_plant(params, now).await.map(CreateResult::new)
    }

    pub async fn list_plants_display(&self) -> Result<Plants> {
        self.list_plants().await.map(Plants)
    }

    /// Like [`get_plant`](Self::get_plant) but a missing plant is an error.
    pub async fn show_plant(&self, params: &Id, now: Timestamp) -> Result<Plant> {
        self.get_plant(params, now)
            .await?
            .ok_or(CareError::PlantNotFound { id: params.id })
    }

    pub async fn remove_plant_result(&self, params: &Id) -> Result<DeleteResult<Plant>> {
        self.remove_plant(params).await.map(DeleteResult::new)
    }

    pub async fn create_task_result(
        &self,
        params: &CreateTask,
        now: Timestamp,
    ) -> Result<CreateResult<CareTask>> {
        self.create_task(params, now).await.map(CreateResult::new)
    }

    /// Like [`get_task`](Self::get_task) but a missing task is an error.
    pub async fn show_task(&self, params: &Id, now: Timestamp) -> Result<CareTask> {
        self.get_task(params, now)
            .await?
            .ok_or(CareError::TaskNotFound { id: params.id })
    }

    pub async fn list_tasks_display(&self, params: &ListTasks, now: Timestamp) -> Result<Tasks> {
        self.list_tasks(params, now).await.map(Tasks)
    }

    pub async fn agenda_display(&self, params: &Agenda, now: Timestamp) -> Result<Tasks> {
        self.agenda(params, now).await.map(Tasks)
    }

    pub async fn complete_task_result(
        &self,
        params: &CloseTask,
        now: Timestamp,
    ) -> Result<CompletionResult> {
        let (closed, next) = self.complete_task(params, now).await?;
        Ok(CompletionResult::new(closed, next))
    }

    pub async fn skip_task_result(
        &self,
        params: &CloseTask,
        now: Timestamp,
    ) -> Result<CompletionResult> {
        let (closed, next) = self.skip_task(params, now).await?;
        Ok(CompletionResult::new(closed, next))
    }

    pub async fn refresh_status(&self, now: Timestamp) -> Result<OperationStatus> {
        let marked = self.refresh_statuses(now).await?;
        let message = match marked.len() {
            0 => "No tasks became late".to_string(),
            1 => format!("Marked task {} late", marked[0]),
            n => format!(
                "Marked {n} tasks late: {}",
                marked
                    .iter()
                    .map(u64::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };
        Ok(OperationStatus::success(message))
    }
}
