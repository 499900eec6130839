use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{AgendaArgs, PlantCommands, TaskCommands};

/// Keep track of watering, feeding and the rest of your plants' care.
///
/// Tasks repeat daily, weekly or monthly. Completing a repeating task opens
/// its next cycle; a task not done by the end of its due day is late. Run
/// without a command to see today's agenda.
#[derive(Parser)]
#[command(version, about, name = "tend")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/tend/tend.db
    #[arg(long, global = true, env = "TEND_DATABASE_FILE")]
    pub database_file: Option<PathBuf>,

    /// IANA time zone in which care days start and end (e.g. Europe/Paris).
    /// Defaults to the system time zone
    #[arg(long, global = true, env = "TEND_TIME_ZONE")]
    pub time_zone: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Act as if the current time were this date (YYYY-MM-DD or RFC 3339)
    #[arg(long, global = true, value_name = "DATE")]
    pub at: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage plants
    #[command(alias = "p")]
    Plant {
        #[command(subcommand)]
        command: PlantCommands,
    },
    /// Manage care tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Show open tasks due today or already late
    #[command(alias = "a")]
    Agenda(AgendaArgs),
    /// Record tasks whose due day has passed as late
    Refresh,
    /// Start the MCP server on stdio
    Serve,
}
