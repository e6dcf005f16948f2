//! ISO-8601 timestamps as accepted on the wire.
//!
//! The grammar is `YYYY-MM-DDThh:mm:ss[.fraction][Z|±hh:mm]` with exactly
//! four year digits and no sign, so every accepted string with an offset is
//! also valid RFC 3339. Timestamps without an offset are read as UTC.

use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, Utc};
use regex::Regex;

use crate::error::{TreeError, TreeResult};

lazy_static::lazy_static! {
    static ref ISO8601: Regex = Regex::new(
        r"^([0-9]{4})-(1[0-2]|0[1-9])-(3[01]|0[1-9]|[12][0-9])T(2[0-3]|[01][0-9]):([0-5][0-9]):([0-5][0-9])(\.[0-9]+)?(Z|[+-](?:2[0-3]|[01][0-9]):[0-5][0-9])?$"
    )
    .expect("ISO-8601 pattern compiles");
}

/// Length of the trailing change-feed window.
pub fn window_length() -> Duration {
    Duration::hours(24)
}

/// Checks the textual grammar only.
pub fn matches_grammar(s: &str) -> bool {
    ISO8601.is_match(s)
}

/// Parses a timestamp that satisfies the grammar into a UTC instant.
///
/// Strings that match the grammar but do not name a real instant
/// (`2022-02-30T00:00:00Z`) are rejected as well.
pub fn parse_timestamp(s: &str) -> TreeResult<DateTime<Utc>> {
    if !matches_grammar(s) {
        return Err(TreeError::InvalidDate(format!("'{}' is not an ISO-8601 timestamp", s)));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = s.strip_suffix('Z').unwrap_or(s);
    NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.and_utc())
        .map_err(|e| TreeError::InvalidDate(format!("'{}' is not a valid instant: {}", s, e)))
}

/// A fresh UTC timestamp in the wire format, evaluated on every call.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The inclusive window `[at - 24h, at]`.
pub fn window_ending_at(at: DateTime<Utc>) -> TreeResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start = at
        .checked_sub_signed(window_length())
        .ok_or_else(|| TreeError::InvalidDate(format!("window start before {} is out of range", at)))?;
    Ok((start, at))
}
