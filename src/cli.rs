use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::models::EntityId;
use crate::time_format::parse_day;

const DEFAULT_WATCH_INTERVAL_SECS: &str = "30";

#[derive(Debug, Parser)]
#[command(name = "storefront-report")]
#[command(about = "Printable Arabic shift reports for the storefront back office")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Render a report from an exported orders file
    Render(RenderOptions),
    /// Fetch the orders of one shift from the API and render them
    Fetch(FetchOptions),
    /// Print one page of orders from the paged orders endpoint
    Page(PageOptions),
    /// Re-render a report from an orders file on an interval
    Watch(WatchOptions),
    /// Render every `*.json` export under a directory
    Batch(BatchOptions),
    /// Print the page selector for a position
    Paginate {
        /// Current page
        current: u32,
        /// Total number of pages
        total: u32,
    },
}

/// Header labels that override the ones stored in an export.
#[derive(Debug, Clone, Default, PartialEq, Args)]
pub struct ReportLabels {
    /// Branch name shown in the header
    #[arg(long)]
    pub branch: Option<String>,
    /// Shift name shown in the header
    #[arg(long)]
    pub shift: Option<String>,
    /// Report day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day_arg)]
    pub day: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct RenderOptions {
    /// Orders export or API order list in JSON
    pub input: PathBuf,
    #[command(flatten)]
    pub labels: ReportLabels,
    /// Output file; defaults to `<output_dir>/<input stem>.html`
    #[arg(long = "out")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct FetchOptions {
    #[arg(long, value_parser = parse_id_arg)]
    pub shift_id: EntityId,
    /// Branch used to look up the branch and shift names
    #[arg(long, value_parser = parse_id_arg)]
    pub branch_id: Option<EntityId>,
    /// Day used to look up the shift name (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day_arg)]
    pub day: Option<NaiveDate>,
    /// Output file; defaults to `<output_dir>/shift-<id>.html`
    #[arg(long = "out")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct PageOptions {
    /// Only list orders of this shift
    #[arg(long, value_parser = parse_id_arg)]
    pub shift_id: Option<EntityId>,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct WatchOptions {
    pub input: PathBuf,
    #[command(flatten)]
    pub labels: ReportLabels,
    #[arg(long = "out")]
    pub output: PathBuf,
    /// Seconds between renders
    #[arg(long, default_value = DEFAULT_WATCH_INTERVAL_SECS, value_parser = parse_interval_arg)]
    pub interval: Duration,
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct BatchOptions {
    /// Directory searched recursively for exports
    pub input_dir: PathBuf,
    /// Output directory; defaults to `output_dir` from the settings
    #[arg(long = "out-dir")]
    pub output_dir: Option<PathBuf>,
}

/// Parses arguments that follow the program name.
pub fn parse_args<I>(args: I) -> Result<Command, clap::Error>
where
    I: IntoIterator<Item = String>,
{
    let argv = std::iter::once("storefront-report".to_string()).chain(args);
    Cli::try_parse_from(argv).map(|cli| cli.command)
}

fn parse_id_arg(value: &str) -> Result<EntityId, String> {
    value
        .trim()
        .parse::<u64>()
        .map(EntityId)
        .map_err(|_| format!("invalid id {value}"))
}

fn parse_day_arg(value: &str) -> Result<NaiveDate, String> {
    parse_day(value).ok_or_else(|| format!("invalid day {value}; expected YYYY-MM-DD"))
}

fn parse_interval_arg(value: &str) -> Result<Duration, String> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err("interval must be at least 1 second".to_string()),
        Ok(seconds) => Ok(Duration::from_secs(seconds)),
        Err(_) => Err(format!("invalid interval {value}")),
    }
}
