//! Date/time utilities for filecat.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Storage format for timestamps (UTC, millisecond precision).
const DB_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Format a UTC instant the way timestamps are stored in the database.
pub fn to_db_string(dt: &DateTime<Utc>) -> String {
    dt.format(DB_FORMAT).to_string()
}

/// Current time in database format.
pub fn now_db_string() -> String {
    to_db_string(&Utc::now())
}

/// Parse a stored timestamp (`YYYY-MM-DD HH:MM:SS[.fff]`, or RFC 3339).
pub fn parse_db_string(datetime_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(datetime_str) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Convert a database datetime string to RFC 3339.
///
/// The database stores UTC, so the result carries a `Z` suffix.
/// Unparsable input is returned unchanged.
pub fn to_rfc3339(datetime_str: &str) -> String {
    match parse_db_string(datetime_str) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        None => datetime_str.to_string(),
    }
}
