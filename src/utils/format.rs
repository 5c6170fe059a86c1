// ============================================================================
// FORMAT - Display helpers for durations, costs and timestamps
// ============================================================================

use chrono::{DateTime, Local, TimeZone};

const EMPTY: &str = "—";

pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 0.42 -> "420ms", 12.34 -> "12.3s", 125 -> "2m 5s"
pub fn format_time(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds.filter(|s| s.is_finite()) else {
        return EMPTY.to_string();
    };
    if seconds < 1.0 {
        return format!("{}ms", (seconds * 1000.0).round() as i64);
    }
    if seconds < 60.0 {
        return format!("{:.1}s", seconds);
    }
    let mins = (seconds / 60.0).floor() as i64;
    let secs = (seconds % 60.0).round() as i64;
    format!("{}m {}s", mins, secs)
}

pub fn format_cost(cost: Option<f64>) -> String {
    match cost.filter(|c| c.is_finite()) {
        Some(cost) => format!("${:.4}", cost),
        None => EMPTY.to_string(),
    }
}

/// Local-time rendering of an RFC 3339 timestamp
pub fn format_date(value: Option<&str>) -> String {
    format_date_in(value, &Local)
}

pub fn format_date_in<Tz: TimeZone>(value: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return "N/A".to_string(),
    };
    match DateTime::parse_from_rfc3339(value) {
        Ok(parsed) => parsed
            .with_timezone(tz)
            .format("%b %-d, %Y, %I:%M %p")
            .to_string(),
        Err(_) => value.to_string(),
    }
}
