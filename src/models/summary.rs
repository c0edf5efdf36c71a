use super::event::ClockEvent;
use std::collections::BTreeMap;

/// Finalized result of one shift, handed to the allocation screen.
///
/// `task_seconds` and `task_logs` are empty for variants without per-task
/// tracking. Once this is produced, the shift clock and the ledger have been
/// fully reset for the next shift.
#[derive(Debug, Default, Clone)]
pub struct ShiftSummary {
    pub total_seconds: i64,
    pub task_seconds: BTreeMap<u32, i64>,
    pub task_logs: BTreeMap<u32, Vec<ClockEvent>>,
    pub clock_log: Vec<ClockEvent>,
}
