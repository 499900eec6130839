//! MCP tool handler implementations.

use std::sync::Arc;

use jiff::Timestamp;
use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tend_core::{params as core, CompletionRecord, Tracker};
use tokio::sync::Mutex;

use super::errors::to_mcp_error;

/// Transparent wrapper giving a core parameter type the derives MCP needs.
///
/// Deserialization and the JSON schema both pass straight through to the
/// wrapped type, so the core params stay free of rmcp.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreatePlant = McpParams<core::CreatePlant>;
pub type CreateTask = McpParams<core::CreateTask>;
pub type ListTasks = McpParams<core::ListTasks>;
pub type CloseTask = McpParams<core::CloseTask>;
pub type Agenda = McpParams<core::Agenda>;

pub type McpResult = Result<CallToolResult, McpError>;

fn text(output: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        output.to_string(),
    )]))
}

/// Tool bodies. Every call reasons about the wall clock at the moment the
/// request arrives.
pub struct McpHandlers {
    tracker: Arc<Mutex<Tracker>>,
}

impl McpHandlers {
    pub fn new(tracker: Arc<Mutex<Tracker>>) -> Self {
        Self { tracker }
    }

    pub async fn add_plant(&self, Parameters(params): Parameters<CreatePlant>) -> McpResult {
        debug!("add_plant: {params:?}");

        let result = self
            .tracker
            .lock()
            .await
            .create_plant_result(params.as_ref(), Timestamp::now())
            .await
            .map_err(|e| to_mcp_error("Failed to add plant", &e))?;
        text(result)
    }

    pub async fn list_plants(&self) -> McpResult {
        debug!("list_plants");

        let plants = self
            .tracker
            .lock()
            .await
            .list_plants_display()
            .await
            .map_err(|e| to_mcp_error("Failed to list plants", &e))?;
        text(format!("# Plants\n\n{plants}"))
    }

    pub async fn show_plant(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plant: {params:?}");

        let plant = self
            .tracker
            .lock()
            .await
            .show_plant(params.as_ref(), Timestamp::now())
            .await
            .map_err(|e| to_mcp_error("Failed to show plant", &e))?;
        text(plant)
    }

    pub async fn remove_plant(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("remove_plant: {params:?}");

        let result = self
            .tracker
            .lock()
            .await
            .remove_plant_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to remove plant", &e))?;
        text(result)
    }

    pub async fn add_task(&self, Parameters(params): Parameters<CreateTask>) -> McpResult {
        debug!("add_task: {params:?}");

        let result = self
            .tracker
            .lock()
            .await
            .create_task_result(params.as_ref(), Timestamp::now())
            .await
            .map_err(|e| to_mcp_error("Failed to add task", &e))?;
        text(result)
    }

    pub async fn list_tasks(&self, Parameters(params): Parameters<ListTasks>) -> McpResult {
        debug!("list_tasks: {params:?}");

        let inner = params.as_ref();
        let tasks = self
            .tracker
            .lock()
            .await
            .list_tasks_display(inner, Timestamp::now())
            .await
            .map_err(|e| to_mcp_error("Failed to list tasks", &e))?;
        let title = if inner.all { "All tasks" } else { "Open tasks" };
        text(format!("# {title}\n\n{tasks}"))
    }

    pub async fn show_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_task: {params:?}");

        let task = self
            .tracker
            .lock()
            .await
            .show_task(params.as_ref(), Timestamp::now())
            .await
            .map_err(|e| to_mcp_error("Failed to show task", &e))?;
        text(task)
    }

    /// Returns the markdown summary followed by the completion record as
    /// JSON.
    pub async fn complete_task(&self, Parameters(params): Parameters<CloseTask>) -> McpResult {
        debug!("complete_task: {params:?}");

        let result = self
            .tracker
            .lock()
            .await
            .complete_task_result(params.as_ref(), Timestamp::now())
            .await
            .map_err(|e| to_mcp_error("Failed to complete task", &e))?;
        completion(&result)
    }

    pub async fn skip_task(&self, Parameters(params): Parameters<CloseTask>) -> McpResult {
        debug!("skip_task: {params:?}");

        let result = self
            .tracker
            .lock()
            .await
            .skip_task_result(params.as_ref(), Timestamp::now())
            .await
            .map_err(|e| to_mcp_error("Failed to skip task", &e))?;
        completion(&result)
    }

    pub async fn agenda(&self, Parameters(params): Parameters<Agenda>) -> McpResult {
        debug!("agenda: {params:?}");

        let tasks = self
            .tracker
            .lock()
            .await
            .agenda_display(params.as_ref(), Timestamp::now())
            .await
            .map_err(|e| to_mcp_error("Failed to load agenda", &e))?;
        let output = if tasks.is_empty() {
            "# Agenda\n\nNothing needs care right now.\n".to_string()
        } else {
            format!("# Agenda\n\n{tasks}")
        };
        text(output)
    }
}

fn completion(result: &tend_core::display::CompletionResult) -> McpResult {
    let record = serde_json::to_string_pretty(&CompletionRecord::from(result)).map_err(|e| {
        McpError::internal_error(format!("Failed to serialize completion: {e}"), None)
    })?;
    Ok(CallToolResult::success(vec![
        Content::text(result.to_string()),
        Content::text(record),
    ]))
}
