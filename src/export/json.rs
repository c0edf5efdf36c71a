use super::model::ShiftReport;
use crate::errors::{AppError, AppResult};

/// Write the full report as formatted JSON.
pub fn write_json(path: &str, report: &ShiftReport) -> AppResult<()> {
    let json =
        serde_json::to_string_pretty(report).map_err(|e| AppError::Export(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}
