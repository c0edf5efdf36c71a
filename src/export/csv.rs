use super::model::{ShiftReport, csv_headers};
use crate::errors::{AppError, AppResult};
use csv::Writer;

/// Write the allocation rows as CSV.
pub fn write_csv(path: &str, report: &ShiftReport) -> AppResult<()> {
    let mut wtr = Writer::from_path(path).map_err(|e| AppError::Export(e.to_string()))?;

    wtr.write_record(csv_headers())
        .map_err(|e| AppError::Export(e.to_string()))?;

    for row in &report.allocations {
        wtr.write_record(&[
            row.task_id.to_string(),
            row.task.clone(),
            row.category.clone(),
            row.tracked_seconds.to_string(),
            row.manual_seconds.to_string(),
            row.allocated_seconds.to_string(),
            row.original_tracked_seconds.to_string(),
            row.note.clone(),
        ])
        .map_err(|e| AppError::Export(e.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}
