pub mod app;
pub mod arabic;
pub mod cli;
pub mod constants;
pub mod filters;
pub mod http;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod poll;
pub mod report;
pub mod settings;
pub mod theme;
pub mod time_format;

pub use app::{run_report, run_report_with, ReportRuntime};
pub use arabic::{format_currency_arabic, format_number_arabic, to_arabic_digits};
pub use pagination::{pagination_numbers, PageMarker};
