//! Geolocation boundary: position sources and the subscription guard.
//!
//! The real app watches a platform geolocation provider. Here the provider is
//! a trait; the simulator plugs in a source that fabricates fixes from the
//! testing panel's distance slider, or one that always fails to stand in for
//! denied/unavailable positioning.

use crate::models::location::Location;
use std::cell::Cell;
use std::rc::Rc;

/// Error text shown when the provider cannot deliver a fix.
pub const LOCATION_ERROR: &str = "Unable to retrieve your location.";

#[derive(Debug, Clone, PartialEq)]
pub enum PositionFix {
    /// No update available.
    None,
    Fix(Location),
    Error(String),
}

pub trait PositionSource {
    fn poll_fix(&mut self) -> PositionFix;
}

/// Simulated provider: fabricates a fix due north of the target by the
/// simulated distance. 1 degree of latitude is approximately 111.1 km.
pub struct SimulatedPositionSource {
    target: Location,
    distance_m: Rc<Cell<f64>>,
}

impl SimulatedPositionSource {
    pub fn new(target: Location, distance_m: Rc<Cell<f64>>) -> Self {
        Self { target, distance_m }
    }
}

impl PositionSource for SimulatedPositionSource {
    fn poll_fix(&mut self) -> PositionFix {
        let latitude_offset = self.distance_m.get() / 111_100.0;
        PositionFix::Fix(Location::new(
            self.target.latitude + latitude_offset,
            self.target.longitude,
        ))
    }
}

/// Provider that always fails: positioning denied or unsupported.
pub struct DeniedPositionSource;

impl PositionSource for DeniedPositionSource {
    fn poll_fix(&mut self) -> PositionFix {
        PositionFix::Error(LOCATION_ERROR.to_string())
    }
}

/// Subscription guard for a position source. Once released, polling yields
/// nothing, so stale updates cannot reach a torn-down consumer.
pub struct PositionWatch {
    source: Option<Box<dyn PositionSource>>,
}

impl PositionWatch {
    pub fn subscribe(source: Box<dyn PositionSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    pub fn poll(&mut self) -> PositionFix {
        match &mut self.source {
            Some(source) => source.poll_fix(),
            None => PositionFix::None,
        }
    }

    pub fn release(&mut self) {
        self.source = None;
    }

    pub fn is_released(&self) -> bool {
        self.source.is_none()
    }
}
