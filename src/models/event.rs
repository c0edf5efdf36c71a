use super::event_type::EventType;
use chrono::{DateTime, Local};
use serde::Serialize;

/// Single clock transition. Appended to the shift log or to a task's log,
/// never mutated or removed.
#[derive(Debug, Clone, Serialize)]
pub struct ClockEvent {
    pub kind: EventType,
    pub timestamp: DateTime<Local>,
}

impl ClockEvent {
    pub fn clock_in(timestamp: DateTime<Local>) -> Self {
        Self {
            kind: EventType::In,
            timestamp,
        }
    }

    pub fn clock_out(timestamp: DateTime<Local>) -> Self {
        Self {
            kind: EventType::Out,
            timestamp,
        }
    }

    pub fn time_str(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}
