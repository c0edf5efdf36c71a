use shiftclock::core::geofence::{GeofenceEvaluator, evaluate, haversine_meters};
use shiftclock::core::position::{LOCATION_ERROR, PositionFix};
use shiftclock::models::location::Location;

fn site() -> Location {
    Location::new(37.7749, -122.4194)
}

/// A point `meters` due north of the site, using the simulator's
/// 1 degree of latitude ~ 111.1 km rule.
fn north_of_site(meters: f64) -> Location {
    Location::new(37.7749 + meters / 111_100.0, -122.4194)
}

#[test]
fn test_haversine_matches_latitude_offsets() {
    // Equal-longitude points: the great-circle distance must track the
    // latitude offset to within a fraction of a percent.
    for d in [100.0, 500.0, 1_000.0, 5_000.0, 50_000.0] {
        let computed = haversine_meters(north_of_site(d), site());
        assert!(
            (computed - d).abs() / d < 0.01,
            "offset {} m computed as {} m",
            d,
            computed
        );
    }
}

/// A point `meters` due east of the site: equal latitude, one degree of
/// longitude shrinks with cos(latitude).
fn east_of_site(meters: f64) -> Location {
    let meters_per_degree = 111_194.9 * (37.7749f64).to_radians().cos();
    Location::new(37.7749, -122.4194 + meters / meters_per_degree)
}

#[test]
fn test_haversine_matches_equal_latitude_offsets() {
    for d in [100.0, 500.0, 1_000.0, 10_000.0] {
        let computed = haversine_meters(east_of_site(d), site());
        assert!(
            (computed - d).abs() / d < 0.01,
            "offset {} m computed as {} m",
            d,
            computed
        );
    }
}

#[test]
fn test_inside_matches_distance_for_equal_latitude_points() {
    let near = evaluate(site(), 500.0, Some(east_of_site(400.0)), None);
    assert_eq!(near.is_inside, Some(true));

    let far = evaluate(site(), 500.0, Some(east_of_site(600.0)), None);
    assert_eq!(far.is_inside, Some(false));
}

#[test]
fn test_haversine_zero_distance() {
    assert!(haversine_meters(site(), site()) < 1e-6);
}

#[test]
fn test_inside_iff_distance_within_radius() {
    let inside = evaluate(site(), 500.0, Some(north_of_site(400.0)), None);
    assert_eq!(inside.is_inside, Some(true));

    let outside = evaluate(site(), 500.0, Some(north_of_site(1_000.0)), None);
    assert_eq!(outside.is_inside, Some(false));
    assert!(outside.distance_m.unwrap() > 500.0);
}

#[test]
fn test_override_location_wins_over_observed() {
    // Observed fix is far away; the override pins us to the site center.
    let state = evaluate(site(), 500.0, Some(north_of_site(10_000.0)), Some(site()));
    assert_eq!(state.is_inside, Some(true));
    assert!(state.distance_m.unwrap() < 1.0);
}

#[test]
fn test_no_fix_is_unknown_not_outside() {
    let state = evaluate(site(), 500.0, None, None);
    assert_eq!(state.is_inside, None);
    assert_eq!(state.distance_m, None);
    assert_eq!(state.error, None);
}

#[test]
fn test_provider_error_reports_and_stays_unknown() {
    let mut evaluator = GeofenceEvaluator::new(site(), 500.0);
    evaluator.apply_fix(PositionFix::Error(LOCATION_ERROR.to_string()));

    let state = evaluator.state();
    assert_eq!(state.error.as_deref(), Some(LOCATION_ERROR));
    assert_eq!(state.is_inside, None);
    assert!(!evaluator.effective_is_inside());
}

#[test]
fn test_manual_override_forces_inside() {
    let mut evaluator = GeofenceEvaluator::new(site(), 500.0).with_manual_override(true);
    // Even a provider error cannot block the manual testing toggle.
    evaluator.apply_fix(PositionFix::Error(LOCATION_ERROR.to_string()));
    assert!(evaluator.effective_is_inside());

    evaluator.set_manual_override(false);
    assert!(!evaluator.effective_is_inside());
}

#[test]
fn test_distance_change_recomputes_without_reset() {
    // Slider at 1000 m, radius 500 m: outside. Slide to 100 m: inside.
    let mut evaluator = GeofenceEvaluator::new(site(), 500.0);

    evaluator.apply_fix(PositionFix::Fix(north_of_site(1_000.0)));
    assert_eq!(evaluator.state().is_inside, Some(false));

    evaluator.apply_fix(PositionFix::Fix(north_of_site(100.0)));
    assert_eq!(evaluator.state().is_inside, Some(true));
    assert_eq!(evaluator.state().error, None);
}

#[test]
fn test_error_then_fix_clears_error() {
    let mut evaluator = GeofenceEvaluator::new(site(), 500.0);
    evaluator.apply_fix(PositionFix::Error(LOCATION_ERROR.to_string()));
    evaluator.apply_fix(PositionFix::Fix(north_of_site(100.0)));

    assert_eq!(evaluator.state().error, None);
    assert_eq!(evaluator.state().is_inside, Some(true));
}
