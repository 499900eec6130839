//! Tend CLI
//!
//! Command-line front end and MCP server for the tend plant-care tracker.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use jiff::Timestamp;
use log::info;
use mcp::{run_stdio_server, TendMcpServer};
use renderer::TerminalRenderer;
use tend_core::{params, TrackerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        time_zone,
        no_color,
        at,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .with_time_zone(time_zone)
        .build()
        .await
        .context("Failed to initialize tracker")?;

    let now = match at {
        Some(at) => tracker
            .calendar()
            .parse("at", &at)
            .context("Invalid --at date")?
            .timestamp(),
        None => Timestamp::now(),
    };

    info!(
        "Tend started with database {}",
        tracker.database_path().display()
    );

    let renderer = TerminalRenderer::new(!no_color);

    match command {
        Some(Plant { command }) => {
            Cli::new(tracker, renderer, now)
                .handle_plant_command(command)
                .await
        }
        Some(Task { command }) => {
            Cli::new(tracker, renderer, now)
                .handle_task_command(command)
                .await
        }
        Some(Agenda(args)) => {
            Cli::new(tracker, renderer, now)
                .agenda(&args.into())
                .await
        }
        Some(Refresh) => Cli::new(tracker, renderer, now).refresh().await,
        Some(Serve) => {
            info!("Starting Tend MCP server");
            run_stdio_server(TendMcpServer::new(tracker))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(tracker, renderer, now)
                .agenda(&params::Agenda::default())
                .await
        }
    }
}
