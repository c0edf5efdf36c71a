//! Geofence evaluation: is the observed position within the site radius?

use crate::core::position::PositionFix;
use crate::models::location::Location;

/// Mean earth radius in meters, spherical approximation.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Geofence evaluation result. `is_inside` is tri-state: unknown until the
/// first position is computed, and it stays unknown on provider errors.
/// An unavailable position never silently means "outside".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeofenceState {
    pub current_location: Option<Location>,
    pub is_inside: Option<bool>,
    pub distance_m: Option<f64>,
    pub error: Option<String>,
}

/// Great-circle (haversine) distance in meters between two points.
pub fn haversine_meters(from: Location, to: Location) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let d_phi = (to.latitude - from.latitude).to_radians();
    let d_lambda = (to.longitude - from.longitude).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Evaluate one observation against the fence. The override location wins
/// unconditionally over the observed fix; with neither, the state is unknown.
pub fn evaluate(
    target: Location,
    radius_m: f64,
    observed: Option<Location>,
    override_location: Option<Location>,
) -> GeofenceState {
    match override_location.or(observed) {
        Some(location) => {
            let distance = haversine_meters(location, target);
            GeofenceState {
                current_location: Some(location),
                is_inside: Some(distance <= radius_m),
                distance_m: Some(distance),
                error: None,
            }
        }
        None => GeofenceState::default(),
    }
}

/// Stateful fence watcher fed by a position subscription. Recomputes on
/// every delivered fix and whenever the override changes.
#[derive(Debug)]
pub struct GeofenceEvaluator {
    target: Location,
    radius_m: f64,
    override_location: Option<Location>,
    manual_override: bool,
    state: GeofenceState,
}

impl GeofenceEvaluator {
    pub fn new(target: Location, radius_m: f64) -> Self {
        Self {
            target,
            radius_m,
            override_location: None,
            manual_override: false,
            state: GeofenceState::default(),
        }
    }

    pub fn with_manual_override(mut self, on: bool) -> Self {
        self.manual_override = on;
        self
    }

    pub fn set_manual_override(&mut self, on: bool) {
        self.manual_override = on;
    }

    pub fn set_override_location(&mut self, location: Option<Location>) {
        self.override_location = location;
        self.state = evaluate(self.target, self.radius_m, None, self.override_location);
    }

    /// Deliver a provider update. While a location override is set, live
    /// fixes and live errors are both ignored.
    pub fn apply_fix(&mut self, fix: PositionFix) {
        if self.override_location.is_some() {
            self.state = evaluate(self.target, self.radius_m, None, self.override_location);
            return;
        }

        match fix {
            PositionFix::Fix(location) => {
                self.state = evaluate(self.target, self.radius_m, Some(location), None);
            }
            PositionFix::Error(message) => {
                self.state.is_inside = None;
                self.state.distance_m = None;
                self.state.error = Some(message);
            }
            PositionFix::None => {}
        }
    }

    pub fn state(&self) -> &GeofenceState {
        &self.state
    }

    /// Inside as consumed by the shift clock: the computed state OR the
    /// manual testing toggle that forces "inside".
    pub fn effective_is_inside(&self) -> bool {
        self.state.is_inside.unwrap_or(false) || self.manual_override
    }
}
