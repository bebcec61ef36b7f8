mod orchestrator;
mod runtime;

pub use orchestrator::{run_report, run_report_with};
pub use runtime::{ReportRuntime, StopSignal, TimeProvider};
