use std::fmt::Display;

use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Parse a store version token (nanoseconds since the Unix epoch)
pub fn parse_version(token: &str) -> Option<DateTime<Utc>> {
    let nanos: i64 = token.trim().parse().ok()?;
    Some(DateTime::from_timestamp_nanos(nanos))
}

/// Format a to-do date:
/// - Same year as `current_year`: "Nov 14 @ 22:13"
/// - Any other year: "2023-11-14 @ 22:13"
pub fn format_todo_date<Tz>(timestamp: &DateTime<Tz>, current_year: i32) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if timestamp.year() == current_year {
        timestamp.format("%b %d @ %H:%M").to_string()
    } else {
        timestamp.format("%Y-%m-%d @ %H:%M").to_string()
    }
}
