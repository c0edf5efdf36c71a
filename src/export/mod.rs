mod csv;
mod json;
pub mod model;

pub use model::{AllocationRow, ClockEventRow, ShiftReport};

use crate::errors::AppResult;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for report writers.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} report written: {}", path.display()));
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Write the submitted shift report in the requested format.
pub fn write_report(format: &ExportFormat, path: &str, report: &ShiftReport) -> AppResult<()> {
    match format {
        ExportFormat::Csv => csv::write_csv(path, report)?,
        ExportFormat::Json => json::write_json(path, report)?,
    }
    notify_export_success(format.as_str().to_uppercase().as_str(), Path::new(path));
    Ok(())
}
