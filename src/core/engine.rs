//! Shift engine: the timer screen's logic. Owns the geofence watcher, the
//! shift clock, the task ledger, the transient notices, and the 1-second
//! check schedule; everything runs cooperatively on a single thread, so each
//! step runs to completion without interleaving.

use crate::core::geofence::{GeofenceEvaluator, GeofenceState};
use crate::core::ledger::{TaskLedger, ToggleOutcome};
use crate::core::position::PositionWatch;
use crate::core::shift::{ClockInOutcome, ShiftClock};
use crate::core::variant::Variant;
use crate::models::event::ClockEvent;
use crate::models::summary::ShiftSummary;
use crate::models::task::Task;
use crate::utils::clock::Ticker;
use chrono::{DateTime, Duration, Local};
use std::collections::BTreeMap;

/// Banner shown when the geofence forces a clock-out.
pub const AUTO_CLOCK_OUT_NOTICE: &str =
    "You have been automatically clocked out for leaving the job site.";

/// How long the auto-clock-out banner stays visible.
const AUTO_CLOCK_OUT_NOTICE_SECS: i64 = 5;

/// Transient on-screen notice with an expiry.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub raised_at: DateTime<Local>,
    pub ttl: Duration,
}

impl Notice {
    pub fn is_expired(&self, now: DateTime<Local>) -> bool {
        now - self.raised_at >= self.ttl
    }
}

#[derive(Debug)]
pub enum EngineEvent {
    /// Geofence exit forced the clock-out; a transient banner accompanies it.
    AutoClockedOut(ShiftSummary),
    /// The simulated time reached the shift ceiling. No distinct notice;
    /// behaves exactly like a manual clock-out.
    ShiftComplete(ShiftSummary),
}

impl EngineEvent {
    pub fn summary(&self) -> &ShiftSummary {
        match self {
            EngineEvent::AutoClockedOut(summary) => summary,
            EngineEvent::ShiftComplete(summary) => summary,
        }
    }
}

pub struct ShiftEngine {
    variant: Variant,
    multiplier: i64,
    goal_seconds: i64,
    geofence: GeofenceEvaluator,
    watch: PositionWatch,
    shift: ShiftClock,
    ledger: TaskLedger,
    ticker: Option<Ticker>,
    notices: Vec<Notice>,
}

impl ShiftEngine {
    pub fn new(
        variant: Variant,
        multiplier: i64,
        goal_seconds: i64,
        geofence: GeofenceEvaluator,
        watch: PositionWatch,
        catalog: &[Task],
    ) -> Self {
        Self {
            variant,
            multiplier,
            goal_seconds,
            geofence,
            watch,
            shift: ShiftClock::new(),
            ledger: TaskLedger::new(catalog.iter().map(|t| t.id)),
            ticker: None,
            notices: Vec::new(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn multiplier(&self) -> i64 {
        self.multiplier
    }

    /// Change the acceleration knob. Takes effect at the next read; elapsed
    /// time is recomputed from the raw wall-clock delta at the new rate.
    pub fn set_multiplier(&mut self, multiplier: i64) {
        self.multiplier = multiplier;
    }

    pub fn is_clocked_in(&self) -> bool {
        self.shift.is_clocked_in()
    }

    pub fn geofence_state(&self) -> &GeofenceState {
        self.geofence.state()
    }

    pub fn effective_is_inside(&self) -> bool {
        self.geofence.effective_is_inside()
    }

    pub fn clock_log(&self) -> &[ClockEvent] {
        self.shift.clock_log()
    }

    pub fn active_task_id(&self) -> Option<u32> {
        self.ledger.active_task_id()
    }

    /// Seconds displayed for a task on the ticking screen.
    pub fn task_display_seconds(&self, task_id: u32, now: DateTime<Local>) -> i64 {
        self.ledger.display_seconds(task_id, now, self.multiplier)
    }

    pub fn simulated_shift_seconds(&self, now: DateTime<Local>) -> i64 {
        self.shift.simulated_seconds(now, self.multiplier)
    }

    /// Deliver the latest position update to the geofence.
    pub fn poll_position(&mut self) {
        let fix = self.watch.poll();
        self.geofence.apply_fix(fix);
    }

    pub fn clock_in(&mut self, now: DateTime<Local>) -> ClockInOutcome {
        let outcome = self.shift.clock_in(now, self.geofence.effective_is_inside());
        if outcome == ClockInOutcome::ClockedIn {
            self.ticker = Some(Ticker::every_second(now));
        }
        outcome
    }

    pub fn clock_out(&mut self, now: DateTime<Local>) -> Option<ShiftSummary> {
        self.finalize_shift(now)
    }

    pub fn toggle_task(&mut self, task_id: u32, now: DateTime<Local>) -> ToggleOutcome {
        if !self.variant.has_task_tracking() {
            return ToggleOutcome::Ignored;
        }
        self.ledger
            .toggle(task_id, now, self.multiplier, self.shift.is_clocked_in())
    }

    /// Drive the engine forward: deliver the pending position update, then
    /// run every 1-second check due up to `now`. The geofence check and the
    /// duration check are independent, and both funnel into the same
    /// idempotent clock-out, so their relative order cannot double-fire it.
    pub fn advance_to(&mut self, now: DateTime<Local>) -> Vec<EngineEvent> {
        self.poll_position();

        let mut events = Vec::new();
        let due = match &mut self.ticker {
            Some(ticker) => ticker.poll(now),
            None => Vec::new(),
        };

        for tick in due {
            if !self.shift.is_clocked_in() {
                break;
            }

            if !self.geofence.effective_is_inside() {
                if let Some(summary) = self.finalize_shift(tick) {
                    self.notices.push(Notice {
                        text: AUTO_CLOCK_OUT_NOTICE.to_string(),
                        raised_at: tick,
                        ttl: Duration::seconds(AUTO_CLOCK_OUT_NOTICE_SECS),
                    });
                    events.push(EngineEvent::AutoClockedOut(summary));
                }
                continue;
            }

            if self.shift.simulated_seconds(tick, self.multiplier) >= self.goal_seconds
                && let Some(summary) = self.finalize_shift(tick)
            {
                events.push(EngineEvent::ShiftComplete(summary));
            }
        }

        events
    }

    /// Active notices, with expired ones pruned.
    pub fn notices(&mut self, now: DateTime<Local>) -> &[Notice] {
        self.notices.retain(|n| !n.is_expired(now));
        &self.notices
    }

    /// Stop the running task, finalize the shift total, and hand everything
    /// to the allocation screen. The ledger stop and the total computation
    /// happen as one transition, and both clock and ledger come out reset.
    fn finalize_shift(&mut self, now: DateTime<Local>) -> Option<ShiftSummary> {
        if !self.shift.is_clocked_in() {
            return None;
        }

        let (task_seconds, task_logs) = if self.variant.has_task_tracking() {
            self.ledger.finalize(now, self.multiplier)
        } else {
            (BTreeMap::new(), BTreeMap::new())
        };

        let total_seconds = self.shift.clock_out(now, self.multiplier)?;

        // Periodic checks stop with the IN state; no leaked callbacks.
        self.ticker = None;

        Some(ShiftSummary {
            total_seconds,
            task_seconds,
            task_logs,
            clock_log: self.shift.take_log(),
        })
    }

    /// Screen teardown: release the position subscription so no stale update
    /// can arrive afterwards.
    pub fn teardown(&mut self) {
        self.watch.release();
        self.ticker = None;
    }

    pub fn is_torn_down(&self) -> bool {
        self.watch.is_released()
    }
}
