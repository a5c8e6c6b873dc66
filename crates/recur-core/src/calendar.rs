//! Calendar arithmetic for computing the next occurrence of a deadline.
//!
//! Every "next" computation is relative to the clock's current date and moves
//! strictly into the future. Requested days of month are clamped to the length
//! of the target month, so "the 31st" in April is April 30th and in February
//! is the 28th or 29th.

use chrono::{Datelike, Days, Duration, Local, Months, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::error::CoreError;
use crate::models::{DayOfWeek, Month};

/// Source of the current calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Local wall-clock date of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Current date in a named IANA timezone.
#[derive(Debug, Clone, Copy)]
pub struct ZonedClock {
    timezone: Tz,
}

impl ZonedClock {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn timezone(&self) -> &Tz {
        &self.timezone
    }
}

impl Clock for ZonedClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

/// A clock stopped at one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Number of days in `month` (1-12) of `year`; 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Next-occurrence arithmetic bound to a clock.
#[derive(Debug, Clone, Default)]
pub struct Calendar<C: Clock = SystemClock> {
    clock: C,
}

impl<C: Clock> Calendar<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Today plus exactly one day.
    pub fn tomorrow(&self) -> Result<NaiveDate, CoreError> {
        let today = self.today();
        let next = add_days(today, 1)?;
        tracing::trace!(%today, %next, "tomorrow");
        Ok(next)
    }

    pub fn tomorrow_at(&self, hour: u32, minute: u32) -> Result<NaiveDateTime, CoreError> {
        check_time(hour, minute)?;
        at(self.tomorrow()?, hour, minute)
    }

    /// The date seven days out, moved onto `day_of_week` within the ISO week
    /// containing it. The result is 1 to 13 days ahead when a weekday is
    /// given.
    pub fn next_week(&self, day_of_week: Option<DayOfWeek>) -> Result<NaiveDate, CoreError> {
        let today = self.today();
        let anchor = add_days(today, 7)?;
        let next = match day_of_week {
            None => anchor,
            Some(target) => {
                let current = anchor.weekday().number_from_monday() as i64;
                let offset = target.number() as i64 - current;
                anchor
                    .checked_add_signed(Duration::days(offset))
                    .ok_or_else(|| out_of_range(anchor))?
            }
        };
        tracing::trace!(%today, %next, ?day_of_week, "next week");
        Ok(next)
    }

    pub fn next_week_at(
        &self,
        hour: u32,
        minute: u32,
        day_of_week: Option<DayOfWeek>,
    ) -> Result<NaiveDateTime, CoreError> {
        check_time(hour, minute)?;
        at(self.next_week(day_of_week)?, hour, minute)
    }

    /// Today advanced by one calendar month, then moved to `day_of_month`
    /// clamped to the length of that month.
    pub fn next_month(&self, day_of_month: Option<u32>) -> Result<NaiveDate, CoreError> {
        let today = self.today();
        let anchor = today
            .checked_add_months(Months::new(1))
            .ok_or_else(|| out_of_range(today))?;
        let next = match day_of_month {
            None => anchor,
            Some(day) => with_day_clamped(anchor, day)?,
        };
        tracing::trace!(%today, %next, ?day_of_month, "next month");
        Ok(next)
    }

    pub fn next_month_at(
        &self,
        hour: u32,
        minute: u32,
        day_of_month: Option<u32>,
    ) -> Result<NaiveDateTime, CoreError> {
        check_time(hour, minute)?;
        at(self.next_month(day_of_month)?, hour, minute)
    }

    /// Today advanced by one calendar year, then moved to `month` and
    /// `day_of_month`. Without a day the current day of month is kept, clamped
    /// to the target month.
    pub fn next_year(
        &self,
        month: Option<Month>,
        day_of_month: Option<u32>,
    ) -> Result<NaiveDate, CoreError> {
        let today = self.today();
        let anchor = today
            .checked_add_months(Months::new(12))
            .ok_or_else(|| out_of_range(today))?;
        let day = day_of_month.unwrap_or(today.day());
        let next = match month {
            None => with_day_clamped(anchor, day)?,
            Some(month) => {
                let first = NaiveDate::from_ymd_opt(anchor.year(), month.number(), 1)
                    .ok_or_else(|| out_of_range(anchor))?;
                with_day_clamped(first, day)?
            }
        };
        tracing::trace!(%today, %next, ?month, ?day_of_month, "next year");
        Ok(next)
    }

    pub fn next_year_at(
        &self,
        hour: u32,
        minute: u32,
        month: Option<Month>,
        day_of_month: Option<u32>,
    ) -> Result<NaiveDateTime, CoreError> {
        check_time(hour, minute)?;
        at(self.next_year(month, day_of_month)?, hour, minute)
    }
}

// Free functions against the system clock.

pub fn tomorrow() -> Result<NaiveDate, CoreError> {
    Calendar::new(SystemClock).tomorrow()
}

pub fn tomorrow_at(hour: u32, minute: u32) -> Result<NaiveDateTime, CoreError> {
    Calendar::new(SystemClock).tomorrow_at(hour, minute)
}

pub fn next_week(day_of_week: Option<DayOfWeek>) -> Result<NaiveDate, CoreError> {
    Calendar::new(SystemClock).next_week(day_of_week)
}

pub fn next_week_at(
    hour: u32,
    minute: u32,
    day_of_week: Option<DayOfWeek>,
) -> Result<NaiveDateTime, CoreError> {
    Calendar::new(SystemClock).next_week_at(hour, minute, day_of_week)
}

pub fn next_month(day_of_month: Option<u32>) -> Result<NaiveDate, CoreError> {
    Calendar::new(SystemClock).next_month(day_of_month)
}

pub fn next_month_at(
    hour: u32,
    minute: u32,
    day_of_month: Option<u32>,
) -> Result<NaiveDateTime, CoreError> {
    Calendar::new(SystemClock).next_month_at(hour, minute, day_of_month)
}

pub fn next_year(month: Option<Month>, day_of_month: Option<u32>) -> Result<NaiveDate, CoreError> {
    Calendar::new(SystemClock).next_year(month, day_of_month)
}

pub fn next_year_at(
    hour: u32,
    minute: u32,
    month: Option<Month>,
    day_of_month: Option<u32>,
) -> Result<NaiveDateTime, CoreError> {
    Calendar::new(SystemClock).next_year_at(hour, minute, month, day_of_month)
}

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate, CoreError> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| out_of_range(date))
}

fn with_day_clamped(date: NaiveDate, day: u32) -> Result<NaiveDate, CoreError> {
    if day == 0 {
        return Err(CoreError::InvalidArgument(
            "day of month must be at least 1".to_string(),
        ));
    }
    let clamped = day.min(days_in_month(date.year(), date.month()));
    date.with_day(clamped).ok_or_else(|| out_of_range(date))
}

fn check_time(hour: u32, minute: u32) -> Result<(), CoreError> {
    if hour > 23 || minute > 59 {
        return Err(CoreError::InvalidArgument(format!(
            "invalid time of day {hour:02}:{minute:02}"
        )));
    }
    Ok(())
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> Result<NaiveDateTime, CoreError> {
    date.and_hms_opt(hour, minute, 0).ok_or_else(|| {
        CoreError::InvalidArgument(format!("invalid time of day {hour:02}:{minute:02}"))
    })
}

fn out_of_range(date: NaiveDate) -> CoreError {
    CoreError::OutOfRange(format!("cannot advance past {date}"))
}
