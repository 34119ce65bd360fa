//! Date and time utility functions
//!
//! Task timestamps arrive as UTC instants. These helpers render them in local
//! time, either with a configured strftime format or as a short relative
//! description ("5 minutes ago", "yesterday").

use chrono::{DateTime, Local, TimeZone, Utc};

/// Format a UTC timestamp in local time with a strftime `format`
pub fn format_timestamp(timestamp: &DateTime<Utc>, format: &str) -> String {
    format_timestamp_in(timestamp, format, &Local)
}

/// Same as [`format_timestamp`] for an explicit time zone
pub fn format_timestamp_in<Tz: TimeZone>(timestamp: &DateTime<Utc>, format: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(tz).format(format).to_string()
}

/// Describe how long ago `timestamp` was, relative to `now`
///
/// # Arguments
/// * `timestamp` - The instant to describe
/// * `now` - Reference instant, normally `Utc::now()`
///
/// # Returns
/// * `String` - "just now", "N minutes ago", "N hours ago", "yesterday",
///   "N days ago", or the calendar date for anything older than a month.
///   Future instants read as "just now".
pub fn format_relative(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed = *now - *timestamp;

    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }

    match elapsed.num_days() {
        1 => "yesterday".to_string(),
        days @ 2..=30 => plural(days, "day"),
        _ => timestamp.format("%Y-%m-%d").to_string(),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
