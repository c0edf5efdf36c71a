/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Remaining-budget color:
/// 0 → green (fully allocated)
/// \>0 → yellow (still unallocated)
/// \<0 → red (over-allocated, submit blocked)
pub fn color_for_remaining(value: i64) -> &'static str {
    if value < 0 {
        RED
    } else if value == 0 {
        GREEN
    } else {
        YELLOW
    }
}

/// Grey out zero timer values ("0:00:00"), leave real ones alone.
pub fn colorize_timer(value: &str) -> String {
    if value.trim() == "0:00:00" || value.trim() == "0:00" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
