mod logging;
mod render;
mod tui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use planner_core::time::today;
use planner_core::{
    parse_day, parse_month, DayRecordRepository, FileDayRecordRepository, MonthOverviewUseCase,
};
use tracing::level_filters::LevelFilter;
use tracing::info;

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "A daily planner for checklists, water, vitamins, sleep and notes", long_about = None)]
struct Cli {
    /// Directory holding one JSON file per day (default: ~/.planner_data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level for the log file (falls back to RUST_LOG, then info)
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the calendar and day editor
    Tui {
        /// Day to select initially (today, tom, -1d, 2025-01-31, ...)
        #[arg(long)]
        date: Option<String>,
    },
    /// Print the record for a day
    Show {
        /// Day to show (defaults to today)
        date: Option<String>,
        /// Print the stored JSON instead of the readable view
        #[arg(long)]
        json: bool,
    },
    /// List the days with records in a month
    List {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },
}

fn resolve_day(input: Option<&str>) -> Result<chrono::NaiveDate> {
    match input {
        Some(s) => parse_day(s, today()),
        None => Ok(today()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let repo = FileDayRecordRepository::new(cli.data_dir)
        .context("Failed to initialize the data directory")?;
    logging::enable_logging(repo.base_dir(), cli.log_level)?;
    info!(dir = %repo.base_dir().display(), "planner started");

    match cli.command {
        Some(Commands::Tui { date }) => {
            let date = resolve_day(date.as_deref())?;
            tui::run(repo, date)?;
        }
        Some(Commands::Show { date, json }) => {
            let date = resolve_day(date.as_deref())?;
            let record = repo.load(date)?;
            if json {
                println!("{}", record.to_pretty_json()?);
            } else {
                print!("{}", render::render_record(date, &record));
            }
        }
        Some(Commands::List { month }) => {
            let (year, month) = match month {
                Some(m) => parse_month(&m)?,
                None => {
                    let now = today();
                    (now.year(), now.month())
                }
            };
            let overview = MonthOverviewUseCase::new(&repo).overview(year, month)?;
            println!("{}", render::render_month(&overview));
        }
        None => {
            tui::run(repo, today())?;
        }
    }
    Ok(())
}
