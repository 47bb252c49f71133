use crate::infra::parse_instant;
use crate::report::{run_follow_ups, run_list, run_report, run_validate};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use job_tracker::config::AppConfig;
use job_tracker::error::AppError;
use job_tracker::telemetry;
use job_tracker::tracking::{ApplicationStatus, Priority, SortOrder};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "job-tracker",
    about = "Summarize, search and check a snapshot of job applications",
    version
)]
struct Cli {
    /// Emit JSON instead of a text summary
    #[arg(long, global = true)]
    json: bool,
    /// Enable debug logging for the tracker
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Funnel statistics, high-priority items and this week's activity
    Report(ReportArgs),
    /// Search, filter and sort applications
    List(ListArgs),
    /// Follow-ups falling due soon
    FollowUps(ReportArgs),
    /// Check every application in the snapshot against the validation rules
    Validate(SnapshotArgs),
}

#[derive(Args, Debug)]
pub(crate) struct SnapshotArgs {
    /// JSON array of applications
    #[arg(long, short)]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    #[command(flatten)]
    pub(crate) snapshot: SnapshotArgs,
    /// Evaluate relative to this instant (YYYY-MM-DD or RFC 3339; defaults to now)
    #[arg(long, value_parser = parse_instant)]
    pub(crate) now: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    pub(crate) snapshot: SnapshotArgs,
    /// Case-insensitive text matched against company, role, location and notes
    #[arg(long, short)]
    pub(crate) search: Option<String>,
    /// Only applications in this status
    #[arg(long)]
    pub(crate) status: Option<ApplicationStatus>,
    /// Only applications with this priority
    #[arg(long)]
    pub(crate) priority: Option<Priority>,
    /// date-desc, date-asc, company-asc, company-desc, priority-desc, priority-asc or status
    #[arg(long, default_value = "date-desc")]
    pub(crate) sort: SortOrder,
    /// Bucket results by priority or status when sorting by either
    #[arg(long)]
    pub(crate) grouped: bool,
}

/// Output switches shared by every command.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OutputOptions {
    pub(crate) json: bool,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, cli.verbose)?;

    let output = OutputOptions { json: cli.json };
    match cli.command {
        Command::Report(args) => run_report(args, config.tracker, output),
        Command::List(args) => run_list(args, config.tracker, output),
        Command::FollowUps(args) => run_follow_ups(args, config.tracker, output),
        Command::Validate(args) => run_validate(args, output),
    }
}
