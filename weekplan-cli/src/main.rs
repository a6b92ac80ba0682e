use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use weekplan_core::{Outcome, ScheduleReport, TaskRecord, schedule};

mod config;
mod grid;
mod logging;
mod state;
mod store;

use config::{Config, init_config, load_config};
use logging::{LogLevel, init_logging};
use store::TaskStore;

const COMPLETED_FORMAT: &str = "%H:%M %d/%m/%Y";

#[derive(Parser, Debug)]
#[command(
    name = "weekplan",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("WEEKPLAN_BUILD_SHA"), ")"),
    about = "Place recurring weekly tasks on a 7-day grid"
)]
struct Cli {
    /// Data directory (default: $WEEKPLAN_HOME, then ~/.weekplan)
    #[arg(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,

    /// Logging level; overrides WEEKPLAN_LOG
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a task and re-schedule the week
    Add {
        #[arg(long)]
        name: String,

        /// Preferred start time, HH:MM
        #[arg(long)]
        start: String,

        /// Duration in whole hours
        #[arg(long, allow_negative_numbers = true)]
        duration: i64,
    },

    /// List active tasks
    List,

    /// Place all active tasks on the week and print the grid
    Schedule {
        /// Print placements as JSON instead of a grid
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Mark a task as done (id or unique id prefix)
    Complete { id: String },

    /// Show completed tasks
    Completed,

    /// Delete a task without completing it (id or unique id prefix)
    Remove { id: String },

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;

    let home = state::ensure_weekplan_home(cli.home.as_deref())?;
    debug!(home = %home.display(), "data directory");
    let store = TaskStore::new(&home);

    match cli.command {
        Command::Add {
            name,
            start,
            duration,
        } => {
            let id = uuid::Uuid::new_v4().to_string();
            let task = TaskRecord::parse(&id, name.trim(), &start, duration)
                .context("invalid input")?;
            let tasks = store.add(task)?;
            println!("Added {} ({id})\n", name.trim());

            let cfg = load_config(&home)?;
            run_schedule(&tasks, &cfg, false)?;
        }

        Command::List => {
            let tasks = store.load_tasks()?;
            if tasks.is_empty() {
                println!("No tasks. Add one with: weekplan add --name <NAME> --start HH:MM --duration <HOURS>");
            }
            for t in &tasks {
                println!(
                    "{}  {}  {:>2}h  {}",
                    t.id(),
                    weekplan_core::time::format_time(t.preferred_start()),
                    t.duration_hours(),
                    t.name()
                );
            }
        }

        Command::Schedule { json } => {
            let tasks = store.load_tasks()?;
            let cfg = load_config(&home)?;
            run_schedule(&tasks, &cfg, json)?;
        }

        Command::Complete { id } => {
            let done = store.complete(&id, Utc::now())?;
            println!(
                "Completed {} at {}",
                done.name,
                done.completed_at.with_timezone(&Local).format(COMPLETED_FORMAT)
            );
        }

        Command::Completed => {
            let completed = store.load_completed()?;
            if completed.is_empty() {
                println!("Nothing completed yet.");
            }
            for c in &completed {
                println!(
                    "{}  {}",
                    c.completed_at.with_timezone(&Local).format(COMPLETED_FORMAT),
                    c.name
                );
            }
        }

        Command::Remove { id } => {
            let removed = store.remove(&id)?;
            println!("Removed {} ({})", removed.name(), removed.id());
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config(&home)?,
            ConfigCommand::Show => {
                let cfg = load_config(&home)?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn run_schedule(tasks: &[TaskRecord], cfg: &Config, json: bool) -> Result<()> {
    info!(tasks = tasks.len(), "scheduling");
    let report = schedule(tasks, &cfg.search.limits()).context("scheduling tasks")?;

    if json {
        print_json(tasks, &report)
    } else {
        print_report(tasks, &report, cfg.display.column_width);
        Ok(())
    }
}

fn print_report(tasks: &[TaskRecord], report: &ScheduleReport, column_width: usize) {
    match report.outcome {
        Outcome::Scheduled => {
            print!("{}", grid::render_grid(tasks, &report.state, column_width));
        }
        Outcome::CapacityExhausted => {
            eprintln!("Schedule full: no more time slots available. Cannot add more tasks this week.");
            for id in &report.unplaced {
                let name = tasks
                    .iter()
                    .find(|t| t.id() == id.as_str())
                    .map(|t| t.name())
                    .unwrap_or("?");
                eprintln!("  not placed: {name} ({id})");
            }
            println!("Partial schedule:\n");
            print!("{}", grid::render_grid(tasks, &report.state, column_width));
        }
        Outcome::NoSolution => {
            eprintln!("No solution: could not schedule tasks!");
        }
    }
}

fn print_json(tasks: &[TaskRecord], report: &ScheduleReport) -> Result<()> {
    let out = serde_json::json!({
        "outcome": report.outcome,
        "placements": grid::entries(tasks, &report.state),
        "unplaced": report.unplaced,
        "expansions": report.expansions,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
