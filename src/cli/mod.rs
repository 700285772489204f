//! Command-line front end over the scheduling engine.

pub mod output;

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;

use cadence_config::{Config, ConfigManager};
use cadence_core::{
    api_overview, calendar, BudgetPeriodConfig, Clock, PeriodCalculator, PeriodWindow, RecurrenceConfig,
    RecurrenceStatus, RecurrenceTracker, SystemClock,
};
use cadence_domain::{Budget, Frequency};

use crate::{errors::AppError, utils::persistence::load_snapshot_from_file};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit:  ",
    env!("CADENCE_BUILD_HASH"),
    " (",
    env!("CADENCE_BUILD_STATUS"),
    ")\nbuilt:   ",
    env!("CADENCE_BUILD_TIMESTAMP"),
    "\ntarget:  ",
    env!("CADENCE_BUILD_TARGET"),
    " (",
    env!("CADENCE_BUILD_PROFILE"),
    ")\nrustc:   ",
    env!("CADENCE_BUILD_RUSTC"),
);

/// Budget periods and recurring bill urgency.
#[derive(Debug, Parser)]
#[command(name = "cadence_cli", version, long_version = LONG_VERSION, about)]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the budget period containing now
    Window(WindowArgs),
    /// Show urgency, progress and cost of one recurring payment
    Status(StatusArgs),
    /// Summarize budgets and bills stored in a snapshot file
    Report(ReportArgs),
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("period").required(true).args(["weekly", "monthly"])))]
pub struct WindowArgs {
    /// Weekly period starting on this weekday (0 = Sunday .. 6 = Saturday)
    #[arg(long, value_name = "DAY")]
    pub weekly: Option<u8>,

    /// Monthly period starting on this day of the month (1-28)
    #[arg(long, value_name = "DAY")]
    pub monthly: Option<u8>,

    /// Evaluate at this local instant instead of the system clock
    #[arg(long, value_parser = parse_instant)]
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// weekly, monthly, quarterly or yearly
    #[arg(long, value_parser = parse_frequency)]
    pub frequency: Frequency,

    /// Next expected payment date (YYYY-MM-DD)
    #[arg(long = "next", value_name = "DATE", value_parser = parse_date)]
    pub next_expected_date: NaiveDate,

    #[arg(long, allow_negative_numbers = true)]
    pub amount: f64,

    #[arg(long, value_parser = parse_instant)]
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// JSON file with budgets, recurring_expenses and transactions
    #[arg(long, value_name = "FILE")]
    pub snapshot: PathBuf,

    #[arg(long, value_parser = parse_instant)]
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
struct WindowReport<'a> {
    config: &'a BudgetPeriodConfig,
    window: &'a PeriodWindow,
}

#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    frequency: Frequency,
    next_expected_date: NaiveDate,
    amount: f64,
    #[serde(flatten)]
    status: &'a RecurrenceStatus,
}

/// Parses process arguments, loads configuration, and prints the result.
pub fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let manager = match &cli.config {
        Some(path) => ConfigManager::new(path.clone()),
        None => ConfigManager::from_default_location(),
    };
    let config = manager.load()?;
    crate::init_with_filter(&config.log_filter);
    debug!(path = %manager.config_path().display(), "configuration loaded");

    if cli.plain || !config.ui_color_enabled {
        colored::control::set_override(false);
    }

    let rendered = execute(&cli, &config, &SystemClock)?;
    println!("{rendered}");
    Ok(())
}

/// Runs one parsed command and returns the rendered output.
///
/// `clock` is consulted only when the command carries no `--now`.
pub fn execute(cli: &Cli, config: &Config, clock: &dyn Clock) -> Result<String, AppError> {
    let policy = config.precondition_policy;
    match &cli.command {
        Command::Window(args) => {
            let now = args.now.unwrap_or_else(|| clock.now());
            let budget = match args.weekly {
                Some(day) => Budget::weekly("cli", 0.0, day),
                None => Budget {
                    month_start_day: args.monthly,
                    ..Budget::monthly("cli", 0.0, config.default_month_start_day)
                },
            };
            let period = BudgetPeriodConfig::from_budget(&budget, policy, config.cycle_defaults())?;
            let window = PeriodCalculator::compute_window(&period, now);
            match cli.format {
                OutputFormat::Text => Ok(output::render_window(&period, &window)),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&WindowReport {
                    config: &period,
                    window: &window,
                })?),
            }
        }
        Command::Status(args) => {
            let now = args.now.unwrap_or_else(|| clock.now());
            let recurrence = RecurrenceConfig::checked(
                args.frequency,
                args.next_expected_date,
                args.amount,
                policy,
            )?;
            let status = RecurrenceTracker::compute_status(&recurrence, now);
            match cli.format {
                OutputFormat::Text => Ok(output::render_status(&recurrence, &status)),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&StatusReport {
                    frequency: recurrence.frequency,
                    next_expected_date: recurrence.next_expected_date,
                    amount: recurrence.amount,
                    status: &status,
                })?),
            }
        }
        Command::Report(args) => {
            let now = args.now.unwrap_or_else(|| clock.now());
            let snapshot = load_snapshot_from_file(&args.snapshot)?;
            let overview = api_overview(&snapshot, now, policy, config.cycle_defaults())?;
            match cli.format {
                OutputFormat::Text => Ok(output::render_overview(&overview)),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&overview)?),
            }
        }
    }
}

/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]`, the same with a space separator, or a bare date (midnight).
///
/// Years outside [`calendar::SUPPORTED_YEARS`] are rejected.
pub fn parse_instant(value: &str) -> Result<NaiveDateTime, String> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    let trimmed = value.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| format!("'{value}' is not a date or date-time"))
        .and_then(|instant| supported(instant.date(), value).map(|_| instant))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("'{value}' is not a YYYY-MM-DD date: {err}"))
        .and_then(|date| supported(date, value))
}

fn supported(date: NaiveDate, value: &str) -> Result<NaiveDate, String> {
    if calendar::is_supported(date) {
        Ok(date)
    } else {
        Err(format!(
            "'{value}' is outside the supported years {}..={}",
            calendar::SUPPORTED_YEARS.start(),
            calendar::SUPPORTED_YEARS.end()
        ))
    }
}

fn parse_frequency(value: &str) -> Result<Frequency, String> {
    Frequency::parse(value).ok_or_else(|| {
        format!("unknown frequency '{value}': expected weekly, monthly, quarterly or yearly")
    })
}
