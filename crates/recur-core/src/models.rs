use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::calendar::{Calendar, Clock, SystemClock};
use crate::error::CoreError;
use crate::recurrence::RecurrenceRule;
use crate::wire;

// ============================================================================
// Calendar enumerations
// ============================================================================

/// ISO weekday, Monday=1 through Sunday=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid day of week: {0}")]
pub struct ParseDayOfWeekError(pub String);

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// ISO number of the weekday (Monday=1 … Sunday=7).
    pub fn number(self) -> u32 {
        match self {
            DayOfWeek::Monday => 1,
            DayOfWeek::Tuesday => 2,
            DayOfWeek::Wednesday => 3,
            DayOfWeek::Thursday => 4,
            DayOfWeek::Friday => 5,
            DayOfWeek::Saturday => 6,
            DayOfWeek::Sunday => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MONDAY",
            DayOfWeek::Tuesday => "TUESDAY",
            DayOfWeek::Wednesday => "WEDNESDAY",
            DayOfWeek::Thursday => "THURSDAY",
            DayOfWeek::Friday => "FRIDAY",
            DayOfWeek::Saturday => "SATURDAY",
            DayOfWeek::Sunday => "SUNDAY",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = ParseDayOfWeekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MONDAY" => Ok(DayOfWeek::Monday),
            "TUESDAY" => Ok(DayOfWeek::Tuesday),
            "WEDNESDAY" => Ok(DayOfWeek::Wednesday),
            "THURSDAY" => Ok(DayOfWeek::Thursday),
            "FRIDAY" => Ok(DayOfWeek::Friday),
            "SATURDAY" => Ok(DayOfWeek::Saturday),
            "SUNDAY" => Ok(DayOfWeek::Sunday),
            _ => Err(ParseDayOfWeekError(s.to_string())),
        }
    }
}

impl From<DayOfWeek> for chrono::Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => chrono::Weekday::Mon,
            DayOfWeek::Tuesday => chrono::Weekday::Tue,
            DayOfWeek::Wednesday => chrono::Weekday::Wed,
            DayOfWeek::Thursday => chrono::Weekday::Thu,
            DayOfWeek::Friday => chrono::Weekday::Fri,
            DayOfWeek::Saturday => chrono::Weekday::Sat,
            DayOfWeek::Sunday => chrono::Weekday::Sun,
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// Calendar month, January=1 through December=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid month: {0}")]
pub struct ParseMonthError(pub String);

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn number(self) -> u32 {
        match self {
            Month::January => 1,
            Month::February => 2,
            Month::March => 3,
            Month::April => 4,
            Month::May => 5,
            Month::June => 6,
            Month::July => 7,
            Month::August => 8,
            Month::September => 9,
            Month::October => 10,
            Month::November => 11,
            Month::December => 12,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Month::January => "JANUARY",
            Month::February => "FEBRUARY",
            Month::March => "MARCH",
            Month::April => "APRIL",
            Month::May => "MAY",
            Month::June => "JUNE",
            Month::July => "JULY",
            Month::August => "AUGUST",
            Month::September => "SEPTEMBER",
            Month::October => "OCTOBER",
            Month::November => "NOVEMBER",
            Month::December => "DECEMBER",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Month {
    type Err = ParseMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JANUARY" => Ok(Month::January),
            "FEBRUARY" => Ok(Month::February),
            "MARCH" => Ok(Month::March),
            "APRIL" => Ok(Month::April),
            "MAY" => Ok(Month::May),
            "JUNE" => Ok(Month::June),
            "JULY" => Ok(Month::July),
            "AUGUST" => Ok(Month::August),
            "SEPTEMBER" => Ok(Month::September),
            "OCTOBER" => Ok(Month::October),
            "NOVEMBER" => Ok(Month::November),
            "DECEMBER" => Ok(Month::December),
            _ => Err(ParseMonthError(s.to_string())),
        }
    }
}

impl From<Month> for chrono::Month {
    fn from(month: Month) -> Self {
        match month {
            Month::January => chrono::Month::January,
            Month::February => chrono::Month::February,
            Month::March => chrono::Month::March,
            Month::April => chrono::Month::April,
            Month::May => chrono::Month::May,
            Month::June => chrono::Month::June,
            Month::July => chrono::Month::July,
            Month::August => chrono::Month::August,
            Month::September => chrono::Month::September,
            Month::October => chrono::Month::October,
            Month::November => chrono::Month::November,
            Month::December => chrono::Month::December,
        }
    }
}

// ============================================================================
// Task
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

/// A task's due point. Date-only and date+time deadlines are mutually
/// exclusive; date+time values never carry seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deadline {
    #[default]
    None,
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Deadline {
    /// Builds a date+time deadline, dropping seconds and sub-second precision.
    pub fn date_time(value: NaiveDateTime) -> Self {
        Deadline::DateTime(wire::truncate_to_minute(value))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Deadline::None)
    }

    /// Calendar day of the deadline regardless of representation.
    pub fn day(&self) -> Option<NaiveDate> {
        match self {
            Deadline::None => None,
            Deadline::Date(date) => Some(*date),
            Deadline::DateTime(dt) => Some(dt.date()),
        }
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deadline::None => f.write_str("none"),
            Deadline::Date(date) => write!(f, "{}", wire::format_date(*date)),
            Deadline::DateTime(dt) => write!(
                f,
                "{} {}",
                wire::format_date(dt.date()),
                wire::format_time(dt.time())
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    deadline: Deadline,
    pub recurrence: Option<RecurrenceRule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            name: "".to_string(),
            description: None,
            status: TaskStatus::Pending,
            deadline: Deadline::None,
            recurrence: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// Outcome of [`Task::complete`].
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionResult {
    /// The task is done for good.
    Completed,
    /// The task recurs: it stays pending with its deadline moved forward.
    Rescheduled { previous: Deadline, next: Deadline },
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.set_deadline(deadline);
        self
    }

    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    pub fn set_deadline(&mut self, deadline: Deadline) {
        self.deadline = match deadline {
            Deadline::DateTime(dt) => Deadline::date_time(dt),
            other => other,
        };
        self.touch();
    }

    pub fn deadline_date(&self) -> Option<NaiveDate> {
        match self.deadline {
            Deadline::Date(date) => Some(date),
            _ => None,
        }
    }

    /// Sets a date-only deadline, clearing any date+time deadline.
    pub fn set_deadline_date(&mut self, date: NaiveDate) {
        self.set_deadline(Deadline::Date(date));
    }

    pub fn deadline_date_time(&self) -> Option<NaiveDateTime> {
        match self.deadline {
            Deadline::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Sets a date+time deadline, clearing any date-only deadline.
    pub fn set_deadline_date_time(&mut self, date_time: NaiveDateTime) {
        self.set_deadline(Deadline::date_time(date_time));
    }

    pub fn clear_deadline(&mut self) {
        self.set_deadline(Deadline::None);
    }

    pub fn clear_recurrence(&mut self) {
        self.recurrence = None;
        self.touch();
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// Completes the task against the system clock.
    pub fn complete(&mut self) -> Result<CompletionResult, CoreError> {
        self.complete_with(&Calendar::new(SystemClock))
    }

    /// Completes the task. A recurring task with a deadline is not closed:
    /// its deadline moves to the next occurrence and it stays pending.
    pub fn complete_with<C: Clock>(
        &mut self,
        calendar: &Calendar<C>,
    ) -> Result<CompletionResult, CoreError> {
        if self.status == TaskStatus::Completed {
            return Err(CoreError::InvalidArgument(format!(
                "Task '{}' is already completed",
                self.name
            )));
        }

        match self.recurrence {
            Some(rule) if !self.deadline.is_none() => {
                let previous = self.deadline;
                rule.reschedule_with(calendar, Some(&mut *self))?;
                Ok(CompletionResult::Rescheduled {
                    previous,
                    next: self.deadline,
                })
            }
            _ => {
                self.status = TaskStatus::Completed;
                self.touch();
                Ok(CompletionResult::Completed)
            }
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Parses a task document, reading date-times as UTC and converting them
    /// into `tz`.
    pub fn from_json_in<Tz: TimeZone>(json: &str, tz: &Tz) -> Result<Self, CoreError> {
        let document: TaskDocument = serde_json::from_str(json)?;
        document.into_task_in(tz)
    }

    /// Renders the task document, converting date-times from `tz` to UTC.
    pub fn to_json_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<String, CoreError> {
        let document = TaskDocument::from_task_in(self, tz);
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

impl Serialize for Task {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TaskDocument::from_task_in(self, &Local).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Task {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        TaskDocument::deserialize(deserializer)?
            .into_task_in(&Local)
            .map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Wire document
// ============================================================================

/// JSON shape of a task as exchanged with the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDocument {
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_status() -> TaskStatus {
    TaskStatus::Pending
}

impl TaskDocument {
    pub fn from_task_in<Tz: TimeZone>(task: &Task, tz: &Tz) -> Self {
        let (deadline_date, deadline_date_time) = match task.deadline {
            Deadline::None => (None, None),
            Deadline::Date(date) => (Some(wire::format_date(date)), None),
            Deadline::DateTime(dt) => (None, Some(wire::format_date_time_in(dt, tz))),
        };

        Self {
            id: task.id,
            name: task.name.clone(),
            description: task.description.clone(),
            status: task.status,
            deadline_date,
            deadline_date_time,
            recurrence: task.recurrence,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }

    pub fn into_task_in<Tz: TimeZone>(self, tz: &Tz) -> Result<Task, CoreError> {
        let deadline = match (self.deadline_date, self.deadline_date_time) {
            (Some(_), Some(_)) => {
                return Err(CoreError::InvalidArgument(
                    "a task cannot carry both deadlineDate and deadlineDateTime".to_string(),
                ))
            }
            (Some(date), None) => Deadline::Date(wire::parse_date(&date)?),
            (None, Some(dt)) => Deadline::DateTime(wire::parse_date_time_in(&dt, tz)?),
            (None, None) => Deadline::None,
        };

        Ok(Task {
            id: self.id,
            name: self.name,
            description: self.description,
            status: self.status,
            deadline,
            recurrence: self.recurrence,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
