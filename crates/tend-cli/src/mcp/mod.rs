//! MCP server exposing the tracker as tools over stdio.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tend_core::Tracker;
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

pub use handlers::{Agenda, CloseTask, CreatePlant, CreateTask, Id, ListTasks, McpResult};

const INSTRUCTIONS: &str = r#"Tend tracks the care of house plants: watering, feeding, misting, pruning, repotting and so on.

## Concepts
- **Plants** have a name and optional species, location and notes.
- **Care tasks** belong to a plant. A task is either a one-off with a due date, or repeats daily, weekly (on ISO weekdays, 1 = Monday) or monthly (on days of the month; days past the end of a short month fall on its last day).
- A task is `due` until the end of its due day, then `late`. Closing it makes it `done` (on time), `late` (done after the due day) or `skipped`.
- Completing or skipping a repeating task opens its next cycle, starting when the task was closed.

## Typical use
1. `agenda` lists what needs care today, including anything late.
2. `complete_task` records that care happened; pass `at` if it happened earlier.
3. `add_plant` and `add_task` set up new plants and schedules.

Dates accept RFC 3339 timestamps or plain `YYYY-MM-DD` dates in the tracker's time zone."#;

#[derive(Clone)]
pub struct TendMcpServer {
    tracker: Arc<Mutex<Tracker>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TendMcpServer {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.tracker.clone())
    }

    #[tool(
        name = "add_plant",
        description = "Add a plant to track. Requires a name; species, location and notes are optional. Returns the new plant ID for adding care tasks."
    )]
    async fn add_plant(&self, params: Parameters<CreatePlant>) -> McpResult {
        self.handlers().add_plant(params).await
    }

    #[tool(
        name = "list_plants",
        description = "List all plants with their IDs, species and locations, ordered by name."
    )]
    async fn list_plants(&self) -> McpResult {
        self.handlers().list_plants().await
    }

    #[tool(
        name = "show_plant",
        description = "Show a plant with every care task it has had, open and closed, including due dates and repeat rules."
    )]
    async fn show_plant(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_plant(params).await
    }

    #[tool(
        name = "remove_plant",
        description = "Permanently remove a plant and all of its care tasks. This cannot be undone."
    )]
    async fn remove_plant(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().remove_plant(params).await
    }

    #[tool(
        name = "add_task",
        description = "Add a care task to a plant. For a one-off task give `due`. For a repeating task give `repeat` (daily, weekly or monthly), optionally `interval` (every N days/weeks/months) and `days`: ISO weekdays 1-7 for weekly, days of the month 1-31 for monthly. Weekly and monthly tasks need `days`. `start` defaults to now and `kind` to water."
    )]
    async fn add_task(&self, params: Parameters<CreateTask>) -> McpResult {
        self.handlers().add_task(params).await
    }

    #[tool(
        name = "list_tasks",
        description = "List care tasks ordered by due date. Only open (due or late) tasks unless all=true. Filter by plant_id or kind."
    )]
    async fn list_tasks(&self, params: Parameters<ListTasks>) -> McpResult {
        self.handlers().list_tasks(params).await
    }

    #[tool(
        name = "show_task",
        description = "Show one care task: plant, status, due date, repeat rule and which task it follows."
    )]
    async fn show_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_task(params).await
    }

    #[tool(
        name = "complete_task",
        description = "Record that a care task was done, now or at `at`. Done after the due day counts as late. A repeating task opens its next cycle, which is returned along with a JSON completion record."
    )]
    async fn complete_task(&self, params: Parameters<CloseTask>) -> McpResult {
        self.handlers().complete_task(params).await
    }

    #[tool(
        name = "skip_task",
        description = "Skip a care task without doing it. A repeating task still opens its next cycle."
    )]
    async fn skip_task(&self, params: Parameters<CloseTask>) -> McpResult {
        self.handlers().skip_task(params).await
    }

    #[tool(
        name = "agenda",
        description = "Open care tasks due today or already late, optionally for one plant and including the next days_ahead days."
    )]
    async fn agenda(&self, params: Parameters<Agenda>) -> McpResult {
        self.handlers().agenda(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TendMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tend".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

pub async fn run_stdio_server(server: TendMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Tend MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
