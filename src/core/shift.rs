//! Shift clock: clock in/out state, elapsed time under the test multiplier,
//! ceiling cap and minute rounding at finalization.

use crate::models::event::ClockEvent;
use crate::utils::time::round_to_minute;
use chrono::{DateTime, Local};

/// Maximum shift length; every finalized total is capped here. 8 hours.
pub const SHIFT_GOAL_SECONDS: i64 = 8 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockInOutcome {
    ClockedIn,
    AlreadyClockedIn,
    OutsideGeofence,
}

/// Clock in/out state machine for a single shift: `OUT -> IN -> OUT`,
/// nothing else. Exactly one live session at a time.
#[derive(Debug, Default)]
pub struct ShiftClock {
    clock_in_time: Option<DateTime<Local>>,
    clock_log: Vec<ClockEvent>,
}

impl ShiftClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_clocked_in(&self) -> bool {
        self.clock_in_time.is_some()
    }

    pub fn clock_in_time(&self) -> Option<DateTime<Local>> {
        self.clock_in_time
    }

    pub fn clock_log(&self) -> &[ClockEvent] {
        &self.clock_log
    }

    pub fn clock_in(&mut self, now: DateTime<Local>, effective_is_inside: bool) -> ClockInOutcome {
        if self.is_clocked_in() {
            return ClockInOutcome::AlreadyClockedIn;
        }
        if !effective_is_inside {
            return ClockInOutcome::OutsideGeofence;
        }

        self.clock_in_time = Some(now);
        self.clock_log.push(ClockEvent::clock_in(now));
        ClockInOutcome::ClockedIn
    }

    /// Whole wall-clock seconds since clock-in. The raw measurement is never
    /// scaled; the multiplier applies at read time only, so a multiplier
    /// change mid-shift recomputes from the raw delta at the new rate.
    pub fn elapsed_raw_seconds(&self, now: DateTime<Local>) -> i64 {
        match self.clock_in_time {
            Some(start) => ((now - start).num_milliseconds() / 1000).max(0),
            None => 0,
        }
    }

    pub fn simulated_seconds(&self, now: DateTime<Local>, multiplier: i64) -> i64 {
        self.elapsed_raw_seconds(now) * multiplier
    }

    /// Finalize the shift total: cap the simulated elapsed time at the
    /// ceiling, then round to the nearest whole minute so the allocation
    /// screen (which steps in minutes) matches exactly.
    ///
    /// Idempotent: while already OUT this returns `None` and appends nothing,
    /// so the duration check and the geofence check may both fire the same
    /// transition without producing a duplicate finalization.
    pub fn clock_out(&mut self, now: DateTime<Local>, multiplier: i64) -> Option<i64> {
        self.clock_in_time?;

        let simulated = self.simulated_seconds(now, multiplier);
        let capped = simulated.min(SHIFT_GOAL_SECONDS);

        self.clock_in_time = None;
        self.clock_log.push(ClockEvent::clock_out(now));

        Some(round_to_minute(capped))
    }

    /// Hand the log over and reset it for the next shift.
    pub fn take_log(&mut self) -> Vec<ClockEvent> {
        std::mem::take(&mut self.clock_log)
    }
}
