//! Care task queries, including the transactional close of a cycle.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, params_from_iter, types::Type, Connection, OptionalExtension, Row};

use super::{id_at, optional_timestamp_at, parsed_at, timestamp_at};
use crate::{
    calendar::CareCalendar,
    care::{CareSchedule, CloseAction, RecurrenceKind, TaskStatusEngine},
    error::{CareError, DatabaseResultExt, Result},
    models::{CareKind, CareTask, TaskFilter, TaskStatus},
    record::ScheduleRecord,
};

const CHECK_PLANT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plants WHERE id = ?1)";
const INSERT_TASK_SQL: &str = "INSERT INTO care_tasks (plant_id, kind, note, start_date, due_date, recurrence_kind, recurrence_interval, day_constraints, status, previous_task_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const SELECT_TASKS_SQL: &str = "SELECT id, plant_id, kind, note, start_date, due_date, recurrence_kind, recurrence_interval, day_constraints, status, completed_at, previous_task_id, created_at, updated_at FROM care_tasks";
const CLOSE_TASK_SQL: &str = "UPDATE care_tasks SET status = ?1, completed_at = ?2, updated_at = ?3 WHERE id = ?4 AND status IN ('due', 'late')";
const MARK_LATE_SQL: &str =
    "UPDATE care_tasks SET status = 'late', updated_at = ?1 WHERE id = ?2 AND status = 'due'";

/// A stored task whose schedule has not been rebuilt yet.
struct TaskRow {
    id: u64,
    plant_id: u64,
    kind: CareKind,
    note: Option<String>,
    schedule: ScheduleRecord,
    status: TaskStatus,
    completed_at: Option<Timestamp>,
    previous_task_id: Option<u64>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl TaskRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let recurrence_kind = row
            .get::<_, Option<String>>(6)?
            .map(|kind| {
                kind.parse::<RecurrenceKind>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(6, Type::Text, e.into())
                })
            })
            .transpose()?;
        let day_constraints = row
            .get::<_, Option<String>>(8)?
            .map(|json| {
                serde_json::from_str::<Vec<u8>>(&json).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(e))
                })
            })
            .transpose()?;

        Ok(Self {
            id: id_at(row, 0)?,
            plant_id: id_at(row, 1)?,
            kind: parsed_at(row, 2)?,
            note: row.get(3)?,
            schedule: ScheduleRecord {
                start_date: timestamp_at(row, 4)?,
                due_date: Some(timestamp_at(row, 5)?),
                recurrence_kind,
                interval: row.get(7)?,
                day_constraints,
            },
            status: parsed_at(row, 9)?,
            completed_at: optional_timestamp_at(row, 10)?,
            previous_task_id: row.get::<_, Option<i64>>(11)?.map(|id| id as u64),
            created_at: timestamp_at(row, 12)?,
            updated_at: timestamp_at(row, 13)?,
        })
    }

    fn into_task(self, calendar: &CareCalendar) -> Result<CareTask> {
        let schedule = self.schedule.into_schedule(calendar)?;
        Ok(CareTask {
            id: self.id,
            plant_id: self.plant_id,
            kind: self.kind,
            note: self.note,
            schedule,
            status: self.status,
            completed_at: self.completed_at,
            previous_task_id: self.previous_task_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn select_task(connection: &Connection, id: u64) -> Result<Option<TaskRow>> {
    connection
        .query_row(
            &format!("{SELECT_TASKS_SQL} WHERE id = ?1"),
            params![id as i64],
            TaskRow::from_row,
        )
        .optional()
        .db_context("Failed to query task")
}

/// Inserts a fresh `due` task and returns its ID.
fn insert_task(
    connection: &Connection,
    plant_id: u64,
    kind: CareKind,
    note: Option<&str>,
    schedule: &CareSchedule,
    previous_task_id: Option<u64>,
    now: Timestamp,
) -> Result<u64> {
    let record = ScheduleRecord::from(schedule);
    let day_constraints = record
        .day_constraints
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    let now_str = now.to_string();

    connection
        .execute(
            INSERT_TASK_SQL,
            params![
                plant_id as i64,
                kind.as_str(),
                note,
                record.start_date.to_string(),
                schedule.due_date().timestamp().to_string(),
                record.recurrence_kind.map(|kind| kind.as_str()),
                record.interval,
                day_constraints,
                TaskStatus::Due.as_str(),
                previous_task_id.map(|id| id as i64),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert task")?;

    Ok(connection.last_insert_rowid() as u64)
}

impl super::Database {
    /// Adds a task to a plant.
    pub fn create_task(
        &mut self,
        plant_id: u64,
        kind: CareKind,
        note: Option<&str>,
        schedule: &CareSchedule,
        now: Timestamp,
    ) -> Result<CareTask> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let plant_exists: bool = tx
            .query_row(CHECK_PLANT_EXISTS_SQL, params![plant_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check plant existence")?;
        if !plant_exists {
            return Err(CareError::PlantNotFound { id: plant_id });
        }

        let id = insert_task(&tx, plant_id, kind, note, schedule, None, now)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(CareTask {
            id,
            plant_id,
            kind,
            note: note.map(String::from),
            schedule: schedule.clone(),
            status: TaskStatus::Due,
            completed_at: None,
            previous_task_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn get_task(&self, id: u64) -> Result<Option<CareTask>> {
        select_task(&self.connection, id)?
            .map(|row| row.into_task(&self.calendar))
            .transpose()
    }

    /// Tasks matching `filter`, soonest due first.
    pub fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<CareTask>> {
        let mut conditions = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(plant_id) = filter.plant_id {
            values.push(Box::new(plant_id as i64));
            conditions.push(format!("plant_id = ?{}", values.len()));
        }
        if let Some(kind) = filter.kind {
            values.push(Box::new(kind.as_str()));
            conditions.push(format!("kind = ?{}", values.len()));
        }
        if !filter.statuses.is_empty() {
            let mut placeholders = Vec::new();
            for status in &filter.statuses {
                values.push(Box::new(status.as_str()));
                placeholders.push(format!("?{}", values.len()));
            }
            conditions.push(format!("status IN ({})", placeholders.join(", ")));
        }

        let mut sql = SELECT_TASKS_SQL.to_string();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare task query")?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), TaskRow::from_row)
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tasks")?;

        let mut tasks = rows
            .into_iter()
            .map(|row| row.into_task(&self.calendar))
            .collect::<Result<Vec<_>>>()?;
        if let Some(cutoff) = filter.due_before {
            tasks.retain(|task| task.schedule.due_date().timestamp() < cutoff);
        }
        tasks.sort_by_key(|task| (task.schedule.due_date().timestamp(), task.id));
        Ok(tasks)
    }

    /// Closes an open task at `closed_at` and, for recurring tasks, opens the
    /// next cycle.
    ///
    /// The status change and the insert of the follow-up task share one
    /// transaction: if computing or storing the next cycle fails, the task
    /// stays open.
    pub fn close_task(
        &mut self,
        id: u64,
        action: CloseAction,
        closed_at: Timestamp,
        now: Timestamp,
    ) -> Result<(CareTask, Option<CareTask>)> {
        let engine = self.engine();
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut task = select_task(&tx, id)?
            .ok_or(CareError::TaskNotFound { id })?
            .into_task(engine.calendar())?;
        TaskStatusEngine::ensure_open(id, task.status)?;

        let completion = engine.close(action, &task.schedule, closed_at)?;
        let now_str = now.to_string();
        let updated = tx
            .execute(
                CLOSE_TASK_SQL,
                params![
                    completion.status.as_str(),
                    closed_at.to_string(),
                    &now_str,
                    id as i64
                ],
            )
            .db_context("Failed to close task")?;
        if updated == 0 {
            return Err(CareError::TaskClosed {
                id,
                status: task.status.as_str().to_string(),
            });
        }

        let next = match completion.next {
            Some(schedule) => {
                let next_id = insert_task(
                    &tx,
                    task.plant_id,
                    task.kind,
                    task.note.as_deref(),
                    &schedule,
                    Some(id),
                    now,
                )?;
                debug!("Task {id} rolled over to task {next_id}");
                Some(CareTask {
                    id: next_id,
                    plant_id: task.plant_id,
                    kind: task.kind,
                    note: task.note.clone(),
                    schedule,
                    status: TaskStatus::Due,
                    completed_at: None,
                    previous_task_id: Some(id),
                    created_at: now,
                    updated_at: now,
                })
            }
            None => None,
        };

        tx.commit().db_context("Failed to commit transaction")?;

        task.status = completion.status;
        task.completed_at = Some(closed_at);
        task.updated_at = now;
        Ok((task, next))
    }

    /// Persists `due -> late` for every stored `due` task whose due day has
    /// passed at `now`. Returns the IDs that changed.
    pub fn mark_late(&mut self, now: Timestamp) -> Result<Vec<u64>> {
        let engine = self.engine();
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let rows = {
            let mut stmt = tx
                .prepare(&format!("{SELECT_TASKS_SQL} WHERE status = 'due'"))
                .db_context("Failed to prepare task query")?;
            let rows = stmt
                .query_map([], TaskRow::from_row)
                .db_context("Failed to query due tasks")?
                .collect::<std::result::Result<Vec<_>, _>>()
                .db_context("Failed to fetch due tasks")?;
            rows
        };

        let now_str = now.to_string();
        let mut marked = Vec::new();
        for row in rows {
            let task = row.into_task(engine.calendar())?;
            if engine.classify(&task.schedule, now) == TaskStatus::Late {
                tx.execute(MARK_LATE_SQL, params![&now_str, task.id as i64])
                    .db_context("Failed to mark task late")?;
                marked.push(task.id);
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(marked)
    }
}
