//! Time utilities: duration parsing, rounding rules, timer formatting.

use crate::errors::{AppError, AppResult};
use regex::Regex;

/// Format a second count as `H:MM:SS` (timer-style).
pub fn format_hms(total_seconds: i64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format a second count as `H:MM` (clock-style, seconds dropped).
pub fn format_hm(total_seconds: i64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    format!("{}:{:02}", hours, minutes)
}

/// Round a second count to the nearest whole minute, half-up.
/// Allocation steps in minutes, so finalized totals go through this.
pub fn round_to_minute(seconds: i64) -> i64 {
    (seconds + 30) / 60 * 60
}

/// Round a millisecond count to the nearest whole second, half-up.
pub fn ms_to_rounded_seconds(ms: i64) -> i64 {
    (ms + 500) / 1000
}

/// Parse durations like `45s`, `17m`, `8h` or `1h30m` into seconds.
pub fn parse_duration(input: &str) -> AppResult<i64> {
    let re = Regex::new(r"^(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s)?$").unwrap();

    let caps = re
        .captures(input.trim())
        .ok_or_else(|| AppError::InvalidDuration(input.to_string()))?;

    if caps.get(1).is_none() && caps.get(2).is_none() && caps.get(3).is_none() {
        return Err(AppError::InvalidDuration(input.to_string()));
    }

    let part = |i: usize| -> i64 {
        caps.get(i)
            .map(|m| m.as_str().parse::<i64>().unwrap_or(0))
            .unwrap_or(0)
    };

    Ok(part(1) * 3600 + part(2) * 60 + part(3))
}
