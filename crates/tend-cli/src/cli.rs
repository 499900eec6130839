//! Command-line argument structures and the command handlers behind them.
//!
//! Each clap argument struct converts into the matching core parameter type,
//! keeping clap out of `tend-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker
//! ```

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use jiff::Timestamp;
use tend_core::{
    display::{LocalDate, Tasks},
    models::CareKind,
    params::{Agenda, CloseTask, CreatePlant, CreateTask, Id, ListTasks},
    RecurrenceKind, Tracker,
};

use crate::renderer::TerminalRenderer;

/// Add a plant
#[derive(Args)]
pub struct AddPlantArgs {
    /// Name of the plant
    pub name: String,
    /// Species or cultivar
    #[arg(short, long)]
    pub species: Option<String>,
    /// Where the plant lives
    #[arg(short, long)]
    pub location: Option<String>,
    /// Free-form notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl From<AddPlantArgs> for CreatePlant {
    fn from(val: AddPlantArgs) -> Self {
        CreatePlant {
            name: val.name,
            species: val.species,
            location: val.location,
            notes: val.notes,
        }
    }
}

/// Identify a plant or task by ID
#[derive(Args)]
pub struct IdArgs {
    #[arg(help = "Unique identifier")]
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum PlantCommands {
    /// Add a plant
    #[command(alias = "a")]
    Add(AddPlantArgs),
    /// List all plants
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a plant with all of its care tasks
    #[command(alias = "s")]
    Show(IdArgs),
    /// Remove a plant and its care tasks
    #[command(alias = "rm")]
    Remove(IdArgs),
}

/// Kinds of care, as accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CareKindArg {
    Water,
    #[value(alias = "feed")]
    Fertilize,
    Mist,
    Prune,
    Repot,
    Rotate,
    Clean,
    Other,
}

impl From<CareKindArg> for CareKind {
    fn from(val: CareKindArg) -> Self {
        match val {
            CareKindArg::Water => CareKind::Water,
            CareKindArg::Fertilize => CareKind::Fertilize,
            CareKindArg::Mist => CareKind::Mist,
            CareKindArg::Prune => CareKind::Prune,
            CareKindArg::Repot => CareKind::Repot,
            CareKindArg::Rotate => CareKind::Rotate,
            CareKindArg::Clean => CareKind::Clean,
            CareKindArg::Other => CareKind::Other,
        }
    }
}

/// Recurrence shapes, as accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RepeatArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<RepeatArg> for RecurrenceKind {
    fn from(val: RepeatArg) -> Self {
        match val {
            RepeatArg::Daily => RecurrenceKind::Daily,
            RepeatArg::Weekly => RecurrenceKind::Weekly,
            RepeatArg::Monthly => RecurrenceKind::Monthly,
        }
    }
}

/// Add a care task to a plant
///
/// Either give a due date for a one-off task, or a recurrence with
/// --repeat. Weekly tasks take weekdays (1 = Monday ... 7 = Sunday) and
/// monthly tasks take days of the month via --days.
#[derive(Args)]
pub struct AddTaskArgs {
    /// ID of the plant
    pub plant_id: u64,
    /// Kind of care
    #[arg(short, long, value_enum, default_value = "water")]
    pub kind: CareKindArg,
    /// Instructions shown with the task
    #[arg(short, long)]
    pub note: Option<String>,
    /// Start of the first cycle; defaults to now
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,
    /// Due date of a one-off task
    #[arg(long, value_name = "DATE", conflicts_with = "repeat")]
    pub due: Option<String>,
    /// Repeat daily, weekly or monthly
    #[arg(short, long, value_enum)]
    pub repeat: Option<RepeatArg>,
    /// Repeat every N days, weeks or months
    #[arg(short, long, value_name = "N", requires = "repeat")]
    pub every: Option<u32>,
    /// Weekdays or days of the month, comma-separated
    #[arg(short, long, value_delimiter = ',', requires = "repeat")]
    pub days: Option<Vec<u8>>,
}

impl From<AddTaskArgs> for CreateTask {
    fn from(val: AddTaskArgs) -> Self {
        CreateTask {
            plant_id: val.plant_id,
            kind: val.kind.into(),
            note: val.note,
            start: val.start,
            due: val.due,
            repeat: val.repeat.map(Into::into),
            interval: val.every,
            days: val.days,
        }
    }
}

/// List care tasks
#[derive(Args)]
pub struct ListTasksArgs {
    /// Only tasks of this plant
    #[arg(short, long)]
    pub plant: Option<u64>,
    /// Only tasks of this kind
    #[arg(short, long, value_enum)]
    pub kind: Option<CareKindArg>,
    /// Include completed and skipped tasks
    #[arg(short, long)]
    pub all: bool,
}

impl From<ListTasksArgs> for ListTasks {
    fn from(val: ListTasksArgs) -> Self {
        ListTasks {
            plant_id: val.plant,
            kind: val.kind.map(Into::into),
            all: val.all,
        }
    }
}

/// Complete or skip a task
#[derive(Args)]
pub struct CloseTaskArgs {
    /// ID of the task
    pub id: u64,
    /// When the care happened; defaults to now
    #[arg(long, value_name = "DATE")]
    pub on: Option<String>,
}

impl From<CloseTaskArgs> for CloseTask {
    fn from(val: CloseTaskArgs) -> Self {
        CloseTask {
            id: val.id,
            at: val.on,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a care task to a plant
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// List care tasks (open ones unless --all)
    #[command(aliases = ["l", "ls"])]
    List(ListTasksArgs),
    /// Show a care task
    #[command(alias = "s")]
    Show(IdArgs),
    /// Mark a task as done; repeating tasks open their next cycle
    #[command(aliases = ["c", "done"])]
    Complete(CloseTaskArgs),
    /// Skip a task; repeating tasks still open their next cycle
    Skip(CloseTaskArgs),
}

/// Show the agenda
#[derive(Args, Default)]
pub struct AgendaArgs {
    /// Only tasks of this plant
    #[arg(short, long)]
    pub plant: Option<u64>,
    /// Also include tasks due in the next N days
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub days: u32,
}

impl From<AgendaArgs> for Agenda {
    fn from(val: AgendaArgs) -> Self {
        Agenda {
            plant_id: val.plant,
            days_ahead: val.days,
        }
    }
}

/// Runs commands against a tracker and renders their output.
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
    now: Timestamp,
}

impl Cli {
    /// `now` is the instant every command reasons about.
    pub fn new(tracker: Tracker, renderer: TerminalRenderer, now: Timestamp) -> Self {
        Self {
            tracker,
            renderer,
            now,
        }
    }

    pub async fn handle_plant_command(&self, command: PlantCommands) -> Result<()> {
        let output = match command {
            PlantCommands::Add(args) => self
                .tracker
                .create_plant_result(&args.into(), self.now)
                .await
                .context("Failed to add plant")?
                .to_string(),
            PlantCommands::List => {
                let plants = self
                    .tracker
                    .list_plants_display()
                    .await
                    .context("Failed to list plants")?;
                format!("# Plants\n\n{plants}")
            }
            PlantCommands::Show(args) => self
                .tracker
                .show_plant(&args.into(), self.now)
                .await
                .context("Failed to show plant")?
                .to_string(),
            PlantCommands::Remove(args) => self
                .tracker
                .remove_plant_result(&args.into())
                .await
                .context("Failed to remove plant")?
                .to_string(),
        };
        self.renderer.render(&output)
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        let output = match command {
            TaskCommands::Add(args) => self
                .tracker
                .create_task_result(&args.into(), self.now)
                .await
                .context("Failed to add task")?
                .to_string(),
            TaskCommands::List(args) => {
                let params = ListTasks::from(args);
                let tasks = self
                    .tracker
                    .list_tasks_display(&params, self.now)
                    .await
                    .context("Failed to list tasks")?;
                let title = if params.all { "All tasks" } else { "Open tasks" };
                format!("# {title}\n\n{tasks}")
            }
            TaskCommands::Show(args) => self
                .tracker
                .show_task(&args.into(), self.now)
                .await
                .context("Failed to show task")?
                .to_string(),
            TaskCommands::Complete(args) => self
                .tracker
                .complete_task_result(&args.into(), self.now)
                .await
                .context("Failed to complete task")?
                .to_string(),
            TaskCommands::Skip(args) => self
                .tracker
                .skip_task_result(&args.into(), self.now)
                .await
                .context("Failed to skip task")?
                .to_string(),
        };
        self.renderer.render(&output)
    }

    pub async fn agenda(&self, params: &Agenda) -> Result<()> {
        let tasks = self
            .tracker
            .agenda_display(params, self.now)
            .await
            .context("Failed to load agenda")?;
        self.renderer.render(&self.agenda_markdown(params, &tasks))
    }

    pub async fn refresh(&self) -> Result<()> {
        let status = self
            .tracker
            .refresh_status(self.now)
            .await
            .context("Failed to refresh task statuses")?;
        self.renderer.render(&status.to_string())
    }

    fn agenda_markdown(&self, params: &Agenda, tasks: &Tasks) -> String {
        let today = self.tracker.calendar().to_zoned(self.now);
        let day = today.strftime("%a %Y-%m-%d").to_string();
        let heading = match params.days_ahead {
            0 => format!("# Agenda for {day}"),
            1 => format!("# Agenda for {day} and the next day"),
            n => format!("# Agenda for {day} and the next {n} days"),
        };
        if tasks.is_empty() {
            format!("{heading}\n\nNothing needs care. As of {}.\n", LocalDate(&today))
        } else {
            format!("{heading}\n\n{tasks}")
        }
    }
}
