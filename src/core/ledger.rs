//! Per-task time ledger: at most one task runs at a time, and seconds only
//! accumulate while the shift clock is IN.

use crate::models::event::ClockEvent;
use crate::utils::time::ms_to_rounded_seconds;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started,
    Stopped,
    Switched { from: u32 },
    /// Not clocked in, or the variant has no per-task tracking.
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct ActiveTask {
    id: u32,
    started_at: DateTime<Local>,
}

#[derive(Debug, Default)]
pub struct TaskLedger {
    active: Option<ActiveTask>,
    accumulated: BTreeMap<u32, i64>,
    logs: BTreeMap<u32, Vec<ClockEvent>>,
}

impl TaskLedger {
    pub fn new(task_ids: impl IntoIterator<Item = u32>) -> Self {
        Self {
            active: None,
            accumulated: task_ids.into_iter().map(|id| (id, 0)).collect(),
            logs: BTreeMap::new(),
        }
    }

    pub fn active_task_id(&self) -> Option<u32> {
        self.active.map(|a| a.id)
    }

    pub fn accumulated_seconds(&self, task_id: u32) -> i64 {
        self.accumulated.get(&task_id).copied().unwrap_or(0)
    }

    pub fn log(&self, task_id: u32) -> &[ClockEvent] {
        self.logs.get(&task_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Start, stop, or switch. Switching stops the previous task and starts
    /// the new one as one logical transition: both log writes and the timer
    /// accumulation land before control returns, so there is no observable
    /// "no task active" state in between.
    pub fn toggle(
        &mut self,
        task_id: u32,
        now: DateTime<Local>,
        multiplier: i64,
        clocked_in: bool,
    ) -> ToggleOutcome {
        if !clocked_in {
            return ToggleOutcome::Ignored;
        }

        match self.active {
            None => {
                self.start(task_id, now);
                ToggleOutcome::Started
            }
            Some(active) if active.id == task_id => {
                self.stop(active, now, multiplier);
                ToggleOutcome::Stopped
            }
            Some(active) => {
                self.stop(active, now, multiplier);
                self.start(task_id, now);
                ToggleOutcome::Switched { from: active.id }
            }
        }
    }

    fn start(&mut self, task_id: u32, now: DateTime<Local>) {
        self.logs
            .entry(task_id)
            .or_default()
            .push(ClockEvent::clock_in(now));
        self.active = Some(ActiveTask {
            id: task_id,
            started_at: now,
        });
    }

    fn stop(&mut self, active: ActiveTask, now: DateTime<Local>, multiplier: i64) {
        let elapsed_ms = (now - active.started_at).num_milliseconds().max(0) * multiplier;
        *self.accumulated.entry(active.id).or_insert(0) += ms_to_rounded_seconds(elapsed_ms);
        self.logs
            .entry(active.id)
            .or_default()
            .push(ClockEvent::clock_out(now));
        self.active = None;
    }

    /// Seconds shown for a task while ticking: banked time plus the running
    /// slice of the active task, recomputed on every tick.
    pub fn display_seconds(&self, task_id: u32, now: DateTime<Local>, multiplier: i64) -> i64 {
        let banked = self.accumulated_seconds(task_id);
        match self.active {
            Some(active) if active.id == task_id => {
                let running_ms = (now - active.started_at).num_milliseconds().max(0) * multiplier;
                banked + ms_to_rounded_seconds(running_ms)
            }
            _ => banked,
        }
    }

    /// Stop any running task, hand back the final snapshot and per-task logs,
    /// and reset to empty for the next shift.
    pub fn finalize(
        &mut self,
        now: DateTime<Local>,
        multiplier: i64,
    ) -> (BTreeMap<u32, i64>, BTreeMap<u32, Vec<ClockEvent>>) {
        if let Some(active) = self.active {
            self.stop(active, now, multiplier);
        }

        let task_ids: Vec<u32> = self.accumulated.keys().copied().collect();
        let snapshot = std::mem::take(&mut self.accumulated);
        let logs = std::mem::take(&mut self.logs);

        self.accumulated = task_ids.into_iter().map(|id| (id, 0)).collect();
        self.active = None;

        (snapshot, logs)
    }
}
