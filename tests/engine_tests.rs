use chrono::Local;
use shiftclock::core::engine::{AUTO_CLOCK_OUT_NOTICE, EngineEvent, ShiftEngine};
use shiftclock::core::geofence::GeofenceEvaluator;
use shiftclock::core::position::{PositionWatch, SimulatedPositionSource};
use shiftclock::core::shift::{ClockInOutcome, SHIFT_GOAL_SECONDS};
use shiftclock::core::variant::Variant;
use shiftclock::models::event_type::EventType;
use shiftclock::models::location::Location;
use shiftclock::models::task::task_catalog;
use shiftclock::utils::clock::{Clock, ManualClock};
use std::cell::Cell;
use std::rc::Rc;

fn site() -> Location {
    Location::new(37.7749, -122.4194)
}

/// Engine on a simulated position source whose distance can be moved
/// mid-test, like the testing panel's slider.
fn engine_at_distance(
    variant: Variant,
    multiplier: i64,
    distance_m: f64,
) -> (ShiftEngine, Rc<Cell<f64>>) {
    let knob = Rc::new(Cell::new(distance_m));
    let source = SimulatedPositionSource::new(site(), Rc::clone(&knob));
    let geofence = GeofenceEvaluator::new(site(), 500.0);
    let engine = ShiftEngine::new(
        variant,
        multiplier,
        SHIFT_GOAL_SECONDS,
        geofence,
        PositionWatch::subscribe(Box::new(source)),
        &task_catalog(),
    );
    (engine, knob)
}

fn tick(engine: &mut ShiftEngine, clock: &mut ManualClock, secs: i64) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    for _ in 0..secs {
        clock.advance_secs(1);
        events.extend(engine.advance_to(clock.now()));
    }
    events
}

#[test]
fn test_geofence_exit_auto_clocks_out_with_notice() {
    let (mut engine, knob) = engine_at_distance(Variant::V1, 100, 100.0);
    let mut clock = ManualClock::starting_at(Local::now());

    engine.advance_to(clock.now());
    assert_eq!(engine.clock_in(clock.now()), ClockInOutcome::ClockedIn);

    tick(&mut engine, &mut clock, 5);
    assert!(engine.is_clocked_in());

    // Walk off site: next delivered fix is far outside the 500 m fence.
    knob.set(50_000.0);
    let events = tick(&mut engine, &mut clock, 1);

    assert!(matches!(events.as_slice(), [EngineEvent::AutoClockedOut(_)]));
    assert!(!engine.is_clocked_in());

    let notices = engine.notices(clock.now());
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].text, AUTO_CLOCK_OUT_NOTICE);
}

#[test]
fn test_auto_clock_out_notice_expires_after_five_seconds() {
    let (mut engine, knob) = engine_at_distance(Variant::V1, 100, 100.0);
    let mut clock = ManualClock::starting_at(Local::now());

    engine.advance_to(clock.now());
    engine.clock_in(clock.now());
    knob.set(50_000.0);
    tick(&mut engine, &mut clock, 1);

    assert_eq!(engine.notices(clock.now()).len(), 1);
    clock.advance_secs(5);
    assert!(engine.notices(clock.now()).is_empty());
}

#[test]
fn test_shift_ceiling_auto_clocks_out_without_notice() {
    let (mut engine, _knob) = engine_at_distance(Variant::V1, 1000, 100.0);
    let mut clock = ManualClock::starting_at(Local::now());

    engine.advance_to(clock.now());
    engine.clock_in(clock.now());

    // At x1000, the 8-hour ceiling falls inside the 29th raw second.
    let events = tick(&mut engine, &mut clock, 29);

    match events.as_slice() {
        [EngineEvent::ShiftComplete(summary)] => {
            assert_eq!(summary.total_seconds, SHIFT_GOAL_SECONDS);
        }
        other => panic!("expected a single ShiftComplete, got {} events", other.len()),
    }
    assert!(!engine.is_clocked_in());
    assert!(engine.notices(clock.now()).is_empty());
}

#[test]
fn test_auto_triggers_cannot_double_finalize() {
    let (mut engine, knob) = engine_at_distance(Variant::V1, 1000, 100.0);
    let mut clock = ManualClock::starting_at(Local::now());

    engine.advance_to(clock.now());
    engine.clock_in(clock.now());

    // Arm both conditions at once: past the ceiling AND outside the fence.
    knob.set(50_000.0);
    let mut events = tick(&mut engine, &mut clock, 40);
    events.extend(tick(&mut engine, &mut clock, 10));

    assert_eq!(events.len(), 1);
    let summary = events[0].summary();
    let outs = summary
        .clock_log
        .iter()
        .filter(|e| e.kind == EventType::Out)
        .count();
    assert_eq!(outs, 1);
}

#[test]
fn test_no_ticks_after_clock_out() {
    let (mut engine, _knob) = engine_at_distance(Variant::V1, 100, 100.0);
    let mut clock = ManualClock::starting_at(Local::now());

    engine.advance_to(clock.now());
    engine.clock_in(clock.now());
    tick(&mut engine, &mut clock, 3);

    assert!(engine.clock_out(clock.now()).is_some());

    // The per-second schedule died with the IN state.
    let events = tick(&mut engine, &mut clock, 60);
    assert!(events.is_empty());
}

#[test]
fn test_clock_out_finalizes_active_task_first() {
    let (mut engine, _knob) = engine_at_distance(Variant::V4, 100, 100.0);
    let mut clock = ManualClock::starting_at(Local::now());

    engine.advance_to(clock.now());
    engine.clock_in(clock.now());
    engine.toggle_task(2, clock.now());
    tick(&mut engine, &mut clock, 6);

    let summary = engine.clock_out(clock.now()).unwrap();

    // The running task was stopped as part of finalization: 6 s x100.
    assert_eq!(summary.task_seconds.get(&2), Some(&600));
    assert_eq!(summary.task_logs.get(&2).map(Vec::len), Some(2));
    assert!(engine.active_task_id().is_none());
}

#[test]
fn test_task_toggle_ignored_for_v1() {
    use shiftclock::core::ledger::ToggleOutcome;

    let (mut engine, _knob) = engine_at_distance(Variant::V1, 100, 100.0);
    let mut clock = ManualClock::starting_at(Local::now());

    engine.advance_to(clock.now());
    engine.clock_in(clock.now());
    assert_eq!(engine.toggle_task(1, clock.now()), ToggleOutcome::Ignored);
}

#[test]
fn test_teardown_releases_position_watch() {
    let (mut engine, _knob) = engine_at_distance(Variant::V1, 100, 100.0);

    assert!(!engine.is_torn_down());
    engine.teardown();
    assert!(engine.is_torn_down());
}
