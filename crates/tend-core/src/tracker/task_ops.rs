//! Care task operations for the Tracker.

use jiff::{Span, Timestamp};
use log::info;

use super::Tracker;
use crate::{
    care::CloseAction,
    error::{CareError, Result},
    models::{CareTask, TaskFilter},
    params::{Agenda, CloseTask, CreateTask, Id, ListTasks},
};

impl Tracker {
    /// Adds a task; the first cycle starts at `params.start` or `now`.
    pub async fn create_task(&self, params: &CreateTask, now: Timestamp) -> Result<CareTask> {
        let schedule = params.schedule(self.calendar(), now)?;
        let plant_id = params.plant_id;
        let kind = params.kind;
        let note = params.note.clone();

        let task = self
            .with_database(move |db| db.create_task(plant_id, kind, note.as_deref(), &schedule, now))
            .await?;
        info!("Added {} task {} for plant {}", task.kind, task.id, task.plant_id);
        Ok(self.with_effective_status(task, now))
    }

    /// A task with its status as of `now`.
    pub async fn get_task(&self, params: &Id, now: Timestamp) -> Result<Option<CareTask>> {
        let id = params.id;
        let task = self.with_database(move |db| db.get_task(id)).await?;
        Ok(task.map(|task| self.with_effective_status(task, now)))
    }

    /// Tasks matching `params`, soonest due first.
    pub async fn list_tasks(&self, params: &ListTasks, now: Timestamp) -> Result<Vec<CareTask>> {
        let filter = TaskFilter::from(params);
        let tasks = self.with_database(move |db| db.list_tasks(&filter)).await?;
        Ok(tasks
            .into_iter()
            .map(|task| self.with_effective_status(task, now))
            .collect())
    }

    /// Open tasks due before the end of today (plus `days_ahead` days),
    /// including everything already late.
    pub async fn agenda(&self, params: &Agenda, now: Timestamp) -> Result<Vec<CareTask>> {
        let cutoff = self.agenda_cutoff(params.days_ahead, now)?;
        let filter = TaskFilter {
            plant_id: params.plant_id,
            ..TaskFilter::open_due_before(cutoff)
        };
        let tasks = self.with_database(move |db| db.list_tasks(&filter)).await?;
        Ok(tasks
            .into_iter()
            .map(|task| self.with_effective_status(task, now))
            .collect())
    }

    /// Marks a task done (or late, if done after its due day) and opens the
    /// next cycle of a recurring task.
    pub async fn complete_task(
        &self,
        params: &CloseTask,
        now: Timestamp,
    ) -> Result<(CareTask, Option<CareTask>)> {
        self.close_task(params, CloseAction::Complete, now).await
    }

    /// Closes a task without doing it; recurring tasks still roll over.
    pub async fn skip_task(
        &self,
        params: &CloseTask,
        now: Timestamp,
    ) -> Result<(CareTask, Option<CareTask>)> {
        self.close_task(params, CloseAction::Skip, now).await
    }

    /// Persists `due -> late` for tasks whose due day is over at `now`.
    pub async fn refresh_statuses(&self, now: Timestamp) -> Result<Vec<u64>> {
        let marked = self.with_database(move |db| db.mark_late(now)).await?;
        if !marked.is_empty() {
            info!("Marked {} task(s) late", marked.len());
        }
        Ok(marked)
    }

    async fn close_task(
        &self,
        params: &CloseTask,
        action: CloseAction,
        now: Timestamp,
    ) -> Result<(CareTask, Option<CareTask>)> {
        let id = params.id;
        let closed_at = params.closed_at(self.calendar(), now)?;

        let (closed, next) = self
            .with_database(move |db| db.close_task(id, action, closed_at, now))
            .await?;
        info!("Closed task {} as {}", closed.id, closed.status);
        Ok((closed, next.map(|task| self.with_effective_status(task, now))))
    }

    fn agenda_cutoff(&self, days_ahead: u32, now: Timestamp) -> Result<Timestamp> {
        let invalid = |e: jiff::Error| {
            CareError::invalid_input("days_ahead").with_reason(e.to_string())
        };
        let days = Span::new()
            .try_days(i64::from(days_ahead) + 1)
            .map_err(invalid)?;
        let cutoff = self
            .calendar()
            .start_of_day(now)?
            .checked_add(days)
            .map_err(invalid)?;
        Ok(cutoff.timestamp())
    }
}
