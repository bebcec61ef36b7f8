use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use walkdir::WalkDir;

use crate::cli::{
    parse_args, BatchOptions, Cli, Command, FetchOptions, PageOptions, RenderOptions,
    ReportLabels, WatchOptions,
};
use crate::constants::{
    format_number, BRANCHES_PATH, DEFAULT_SETTINGS_FILE, ORDERS_PAGED_PATH, ORDERS_PATH,
    ORDER_SHIFTS_PATH, SETTINGS_PATH_ENV_VAR,
};
use crate::filters::{endpoint_url, print_orders_query, shifts_query, OrdersQuery};
use crate::http::HttpClient;
use crate::logging::{log_order_page, log_pagination, log_report_summary};
use crate::models::{Branch, EntityId, OrderList, OrderPage, OrderShift, ReportInput};
use crate::poll::start_polling;
use crate::report::{ShiftReport, SELECTED_SHIFT_NAME};
use crate::settings::{load_settings, ReportSettings};
use crate::theme::{FileThemeProvider, StaticTheme, ThemeProvider};
use crate::time_format::parse_day;

use super::runtime::{ReportRuntime, TimeProvider};

pub fn run_report() -> Result<()> {
    let cli = Cli::parse();
    let runtime = ReportRuntime::from_env()?;
    run_command(runtime, cli.command)
}

pub fn run_report_with<I>(runtime: ReportRuntime, args: I) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    let command = parse_args(args)?;
    run_command(runtime, command)
}

fn run_command(runtime: ReportRuntime, command: Command) -> Result<()> {
    let settings_path = resolve_settings_path(&runtime);
    let settings = load_settings(&settings_path)?;
    let theme = resolve_theme(&runtime, &settings);

    match command {
        Command::Render(options) => {
            render_to_file(&runtime, &settings, theme.as_ref(), &options)?;
            Ok(())
        }
        Command::Fetch(options) => {
            fetch_report(&runtime, &settings, theme.as_ref(), &options)?;
            Ok(())
        }
        Command::Page(options) => show_page(&runtime, &settings, &options),
        Command::Watch(options) => watch_report(runtime, settings, theme, options),
        Command::Batch(options) => render_batch(&runtime, &settings, theme.as_ref(), &options),
        Command::Paginate { current, total } => {
            log_pagination(current, total);
            Ok(())
        }
    }
}

fn render_to_file(
    runtime: &ReportRuntime,
    settings: &ReportSettings,
    theme: &dyn ThemeProvider,
    options: &RenderOptions,
) -> Result<PathBuf> {
    let input = resolve_path(&runtime.cwd, &options.input);
    let output = match &options.output {
        Some(output) => resolve_path(&runtime.cwd, output),
        None => default_output_path(runtime, settings, &input),
    };

    let time = runtime.time.as_ref();
    let report = build_report_from_file(settings, time, &input, &options.labels)?;
    write_report(&output, &report.render_html(theme))?;
    log_report_summary(&report, &output);
    Ok(output)
}

fn build_report_from_file(
    settings: &ReportSettings,
    time: &dyn TimeProvider,
    input: &Path,
    labels: &ReportLabels,
) -> Result<ShiftReport> {
    let contents = fs::read_to_string(input)
        .with_context(|| format!("failed to read orders from {}", input.display()))?;
    let export = serde_json::from_str::<ReportInput>(&contents)
        .with_context(|| format!("failed to parse orders in {}", input.display()))?
        .into_export();

    let day = match labels.day {
        Some(day) => Some(day),
        None => parse_export_day(export.day.as_deref())
            .with_context(|| format!("invalid day in {}", input.display()))?,
    };

    Ok(ShiftReport {
        restaurant_name: settings.restaurant_name.clone(),
        branch_name: labels.branch.clone().or(export.branch),
        shift_name: labels.shift.clone().or(export.shift),
        day,
        generated_at: time.now(),
        orders: export.orders,
    })
}

fn parse_export_day(day: Option<&str>) -> Result<Option<NaiveDate>> {
    match day.map(str::trim).filter(|day| !day.is_empty()) {
        Some(day) => parse_day(day)
            .map(Some)
            .ok_or_else(|| anyhow::anyhow!("day {day} is not in YYYY-MM-DD form")),
        None => Ok(None),
    }
}

fn fetch_report(
    runtime: &ReportRuntime,
    settings: &ReportSettings,
    theme: &dyn ThemeProvider,
    options: &FetchOptions,
) -> Result<PathBuf> {
    let base = settings.api_base_url()?;
    let http = runtime.http.as_ref();

    let branch_name = options
        .branch_id
        .and_then(|branch_id| lookup_branch_name(http, base, branch_id));
    let shift_name = match (options.branch_id, options.day) {
        (Some(branch_id), Some(day)) => {
            lookup_shift_name(http, base, branch_id, day, options.shift_id)
        }
        _ => None,
    }
    .filter(|name| !name.trim().is_empty())
    .unwrap_or_else(|| SELECTED_SHIFT_NAME.to_string());

    let query = print_orders_query(options.shift_id);
    let url = endpoint_url(base, ORDERS_PATH, Some(query.as_str()));
    println!("Fetching orders for shift {} from {url}", options.shift_id);
    let body = http.fetch_text(&url)?;
    let orders = serde_json::from_str::<OrderList>(&body)
        .with_context(|| format!("failed to parse orders returned by {url}"))?
        .into_orders();
    println!("Fetched {} orders for printing", format_number(orders.len() as u64));
    if orders.is_empty() {
        anyhow::bail!("no orders to print for shift {}", options.shift_id);
    }

    let report = ShiftReport {
        restaurant_name: settings.restaurant_name.clone(),
        branch_name,
        shift_name: Some(shift_name),
        day: options.day,
        generated_at: runtime.time.now(),
        orders,
    };

    let output = match &options.output {
        Some(output) => resolve_path(&runtime.cwd, output),
        None => resolve_path(&runtime.cwd, &settings.output_dir)
            .join(format!("shift-{}.html", options.shift_id)),
    };
    write_report(&output, &report.render_html(theme))?;
    log_report_summary(&report, &output);
    Ok(output)
}

fn lookup_branch_name(http: &dyn HttpClient, base: &str, branch_id: EntityId) -> Option<String> {
    let url = endpoint_url(base, BRANCHES_PATH, None);
    let branches = http.fetch_text(&url).and_then(|body| {
        serde_json::from_str::<Vec<Branch>>(&body)
            .with_context(|| format!("failed to parse branches returned by {url}"))
    });
    match branches {
        Ok(branches) => branches
            .into_iter()
            .find(|branch| branch.id == branch_id)
            .map(|branch| branch.name),
        Err(error) => {
            eprintln!("Failed to load branches; using fallback name ({error:?})");
            None
        }
    }
}

fn lookup_shift_name(
    http: &dyn HttpClient,
    base: &str,
    branch_id: EntityId,
    day: NaiveDate,
    shift_id: EntityId,
) -> Option<String> {
    let query = shifts_query(branch_id, day);
    let url = endpoint_url(base, ORDER_SHIFTS_PATH, Some(query.as_str()));
    let shifts = http.fetch_text(&url).and_then(|body| {
        serde_json::from_str::<Vec<OrderShift>>(&body)
            .with_context(|| format!("failed to parse shifts returned by {url}"))
    });
    match shifts {
        Ok(shifts) => shifts
            .into_iter()
            .find(|shift| shift.id == shift_id)
            .map(|shift| shift.name),
        Err(error) => {
            eprintln!("Failed to load shifts; using fallback name ({error:?})");
            None
        }
    }
}

fn show_page(
    runtime: &ReportRuntime,
    settings: &ReportSettings,
    options: &PageOptions,
) -> Result<()> {
    let base = settings.api_base_url()?;
    let query = OrdersQuery::new(options.page, settings.page_size).with_shift(options.shift_id);
    let url = endpoint_url(base, ORDERS_PAGED_PATH, None);
    let body = runtime.http.post_json(&url, &query.to_json()?)?;
    let page = serde_json::from_str::<OrderPage>(&body)
        .with_context(|| format!("failed to parse order page returned by {url}"))?
        .normalized(settings.page_size);
    if page.data.is_empty() {
        anyhow::bail!("no orders for the selected day");
    }
    log_order_page(&page, settings.utc_offset_hours);
    Ok(())
}

fn watch_report(
    runtime: ReportRuntime,
    settings: ReportSettings,
    theme: Arc<dyn ThemeProvider>,
    options: WatchOptions,
) -> Result<()> {
    let input = resolve_path(&runtime.cwd, &options.input);
    let output = resolve_path(&runtime.cwd, &options.output);
    let time = Arc::clone(&runtime.time);
    let labels = options.labels;
    println!(
        "Rendering {} to {} every {}s",
        input.display(),
        output.display(),
        options.interval.as_secs()
    );

    let label = input.display().to_string();
    let handle = start_polling(&label, options.interval, move || {
        let report = build_report_from_file(&settings, time.as_ref(), &input, &labels)?;
        write_report(&output, &report.render_html(theme.as_ref()))?;
        println!(
            "Refreshed {} ({} orders)",
            output.display(),
            format_number(report.order_count() as u64)
        );
        Ok(())
    })?;

    runtime.stop.wait();
    handle.stop();
    println!("Stopped watching {label}");
    Ok(())
}

fn render_batch(
    runtime: &ReportRuntime,
    settings: &ReportSettings,
    theme: &dyn ThemeProvider,
    options: &BatchOptions,
) -> Result<()> {
    let input_dir = resolve_path(&runtime.cwd, &options.input_dir);
    let output_dir = resolve_path(
        &runtime.cwd,
        options
            .output_dir
            .as_deref()
            .unwrap_or(settings.output_dir.as_path()),
    );

    let mut rendered = 0usize;
    let mut failures = Vec::new();
    for entry in WalkDir::new(&input_dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", input_dir.display()))?;
        let path = entry.path();
        let is_json = path.extension().and_then(|ext| ext.to_str()) == Some("json");
        if !entry.file_type().is_file() || !is_json {
            continue;
        }

        let relative = path.strip_prefix(&input_dir).unwrap_or(path);
        let output = output_dir.join(relative).with_extension("html");
        let labels = ReportLabels::default();
        let result = build_report_from_file(settings, runtime.time.as_ref(), path, &labels)
            .and_then(|report| {
                write_report(&output, &report.render_html(theme))?;
                log_report_summary(&report, &output);
                Ok(())
            });
        match result {
            Ok(()) => rendered += 1,
            Err(error) => {
                eprintln!("Failed to render {}: {error:?}", path.display());
                failures.push(path.display().to_string());
            }
        }
    }

    if rendered == 0 && failures.is_empty() {
        println!("No shift exports found under {}", input_dir.display());
        return Ok(());
    }
    if !failures.is_empty() {
        anyhow::bail!(
            "{} of {} reports failed: {}",
            failures.len(),
            rendered + failures.len(),
            failures.join(", ")
        );
    }
    println!(
        "Rendered {} reports into {}",
        format_number(rendered as u64),
        output_dir.display()
    );
    Ok(())
}

fn write_report(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create report directory {}", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("failed to write report to {}", path.display()))
}

fn default_output_path(
    runtime: &ReportRuntime,
    settings: &ReportSettings,
    input: &Path,
) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("shift-report");
    resolve_path(&runtime.cwd, &settings.output_dir).join(format!("{stem}.html"))
}

fn resolve_settings_path(runtime: &ReportRuntime) -> PathBuf {
    runtime
        .env
        .get(SETTINGS_PATH_ENV_VAR)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(|value| resolve_path(&runtime.cwd, Path::new(value)))
        .unwrap_or_else(|| runtime.cwd.join(DEFAULT_SETTINGS_FILE))
}

fn resolve_theme(runtime: &ReportRuntime, settings: &ReportSettings) -> Arc<dyn ThemeProvider> {
    if let Some(theme) = &runtime.theme {
        return Arc::clone(theme);
    }
    match &settings.theme_state_path {
        Some(path) => Arc::new(FileThemeProvider::new(resolve_path(&runtime.cwd, path))),
        None => Arc::new(StaticTheme::default()),
    }
}

pub(crate) fn resolve_path(base: &Path, configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        base.join(configured)
    }
}
