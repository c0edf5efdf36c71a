// src/export/model.rs

use crate::core::allocation::AllocationPlan;
use crate::models::summary::ShiftSummary;
use crate::models::task::Task;
use serde::Serialize;

/// Flat per-task allocation row for export.
#[derive(Serialize, Clone, Debug)]
pub struct AllocationRow {
    pub task_id: u32,
    pub task: String,
    pub category: String,
    pub tracked_seconds: i64,
    pub manual_seconds: i64,
    pub allocated_seconds: i64,
    pub original_tracked_seconds: i64,
    pub note: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct ClockEventRow {
    pub kind: String,
    pub timestamp: String,
}

/// Submitted-shift report.
#[derive(Serialize, Clone, Debug)]
pub struct ShiftReport {
    pub app_variant: String,
    pub project: String,
    pub total_shift_seconds: i64,
    pub allocated_seconds: i64,
    pub submitted: bool,
    pub clock_log: Vec<ClockEventRow>,
    pub allocations: Vec<AllocationRow>,
}

impl ShiftReport {
    pub fn build(
        project_name: &str,
        catalog: &[Task],
        summary: &ShiftSummary,
        plan: &AllocationPlan,
    ) -> Self {
        let allocations = plan
            .entries_in_order()
            .map(|(id, entry)| {
                let task = catalog.iter().find(|t| t.id == id);
                AllocationRow {
                    task_id: id,
                    task: task.map(|t| t.name.clone()).unwrap_or_default(),
                    category: task.map(|t| t.category.code().to_string()).unwrap_or_default(),
                    tracked_seconds: entry.tracked,
                    manual_seconds: entry.manual,
                    allocated_seconds: entry.allocated(),
                    original_tracked_seconds: entry.original_tracked,
                    note: entry.note.clone().unwrap_or_default(),
                }
            })
            .collect();

        let clock_log = summary
            .clock_log
            .iter()
            .map(|ev| ClockEventRow {
                kind: ev.kind.et_as_str().to_string(),
                timestamp: ev.timestamp.to_rfc3339(),
            })
            .collect();

        Self {
            app_variant: plan.variant().code().to_string(),
            project: project_name.to_string(),
            total_shift_seconds: summary.total_seconds,
            allocated_seconds: plan.totals().allocated,
            submitted: plan.is_submitted(),
            clock_log,
            allocations,
        }
    }
}

/// Header for CSV
pub(crate) fn csv_headers() -> Vec<&'static str> {
    vec![
        "task_id",
        "task",
        "category",
        "tracked_seconds",
        "manual_seconds",
        "allocated_seconds",
        "original_tracked_seconds",
        "note",
    ]
}
