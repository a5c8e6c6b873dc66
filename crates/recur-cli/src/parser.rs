use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_english::{parse_date_string, Dialect};
use chrono_tz::Tz;
use recur_core::calendar::{Clock, ZonedClock};
use recur_core::wire;

/// Resolves the date commands treat as "today": an explicit `YYYY-MM-DD`, a
/// human phrase relative to now, or the current date in `timezone`.
pub fn resolve_today(input: Option<&str>, timezone: Tz) -> Result<NaiveDate> {
    let Some(input) = input else {
        return Ok(ZonedClock::new(timezone).today());
    };

    if let Ok(date) = wire::parse_date(input) {
        return Ok(date);
    }

    parse_date_string(input, Utc::now(), Dialect::Us)
        .map(|dt| dt.with_timezone(&timezone).date_naive())
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", input, e))
}

/// Parses a local wall-clock date-time as typed on the command line.
pub fn parse_local_date_time(input: &str) -> Result<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| {
            anyhow!(
                "Failed to parse date-time '{}'. Use YYYY-MM-DDTHH:MM.",
                input
            )
        })
}
