//! Conversions between in-memory dates/times and their wire strings.
//!
//! Dates travel as `YYYY-MM-DD`. Date-times are held in memory as local wall
//! clock values and travel as UTC strings; seconds are not modeled and are
//! dropped on the way in.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};

use crate::error::CoreError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const DATE_TIME_WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Naive forms accepted in addition to RFC 3339. They are read as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| CoreError::InvalidDateFormat(s.to_string()))
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Parses `HH:MM` or `HH:MM:SS`; seconds are dropped.
pub fn parse_time(s: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, TIME_FORMAT))
        .map(|t| NaiveTime::from_hms_opt(t.hour(), t.minute(), 0).unwrap_or(t))
        .map_err(|_| CoreError::InvalidDateFormat(s.to_string()))
}

/// Renders a local date-time as a UTC wire string using the system zone.
pub fn format_date_time(local: NaiveDateTime) -> String {
    format_date_time_in(local, &Local)
}

/// Parses a UTC wire string into a local date-time using the system zone.
pub fn parse_date_time(s: &str) -> Result<NaiveDateTime, CoreError> {
    parse_date_time_in(s, &Local)
}

pub fn format_date_time_in<Tz: TimeZone>(local: NaiveDateTime, tz: &Tz) -> String {
    resolve_local(truncate_to_minute(local), tz)
        .format(DATE_TIME_WIRE_FORMAT)
        .to_string()
}

pub fn parse_date_time_in<Tz: TimeZone>(s: &str, tz: &Tz) -> Result<NaiveDateTime, CoreError> {
    let utc = parse_utc(s)?;
    Ok(truncate_to_minute(tz.from_utc_datetime(&utc.naive_utc()).naive_local()))
}

fn parse_utc(s: &str) -> Result<DateTime<Utc>, CoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CoreError::InvalidDateFormat(s.to_string()))
}

/// Maps a local wall-clock value to UTC. Ambiguous times take the earliest
/// instant; times inside a spring-forward gap move one hour later.
fn resolve_local<Tz: TimeZone>(local: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    if let Some(dt) = tz.from_local_datetime(&local).earliest() {
        return dt.with_timezone(&Utc);
    }

    let shifted = local + Duration::hours(1);
    match tz.from_local_datetime(&shifted).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        None => local.and_utc(),
    }
}

/// Drops seconds and sub-second precision.
pub fn truncate_to_minute(value: NaiveDateTime) -> NaiveDateTime {
    value
        .with_second(0)
        .and_then(|v| v.with_nanosecond(0))
        .unwrap_or(value)
}
