//! Formatting utilities used for CLI outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn secs2readable(secs: i64, short: bool) -> String {
    let abs_s = secs.abs();
    let hours = abs_s / 3600;
    let minutes = (abs_s % 3600) / 60;

    let sign = if secs < 0 { "-" } else { "" };

    if short {
        // e.g. 7:43
        format!("{}{}:{:02}", sign, hours, minutes)
    } else {
        // e.g. 07h 43m
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Human-readable label and an ANSI color for a task category code.
pub fn describe_category(code: &str) -> (String, &'static str) {
    match code.to_uppercase().as_str() {
        "T&M" => ("Time & Material".into(), "\x1b[34m"),
        "PL" => ("Planned".into(), "\x1b[36m"),
        "ST" => ("Standard".into(), "\x1b[33m"),
        other => (other.to_string(), "\x1b[0m"),
    }
}
