use chrono::Timelike;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::calendar::{Calendar, Clock, SystemClock};
use crate::error::CoreError;
use crate::models::{DayOfWeek, Deadline, Month, Task};

const TYPE_FIELD: &str = "type";
const DAY_OF_WEEK_FIELD: &str = "dayOfWeek";
const DAY_OF_MONTH_FIELD: &str = "dayOfMonth";
const MONTH_FIELD: &str = "month";

/// How a task's deadline moves forward once it has passed.
///
/// On the wire a rule is a JSON object tagged by `type`:
///
/// ```json
/// { "type": "daily" }
/// { "type": "weekly", "dayOfWeek": "MONDAY" }
/// { "type": "monthly", "dayOfMonth": 31 }
/// { "type": "annually", "month": "JANUARY", "dayOfMonth": 1 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecurrenceRule {
    Daily,
    Weekly { day_of_week: DayOfWeek },
    /// `day_of_month` is 1-31 and is clamped to shorter months.
    Monthly { day_of_month: u32 },
    Annually { month: Month, day_of_month: u32 },
}

impl RecurrenceRule {
    /// Wire discriminants in UI order.
    pub const TYPES: [&'static str; 4] = ["daily", "weekly", "monthly", "annually"];

    pub fn daily() -> Self {
        RecurrenceRule::Daily
    }

    pub fn weekly(day_of_week: DayOfWeek) -> Self {
        RecurrenceRule::Weekly { day_of_week }
    }

    pub fn monthly(day_of_month: u32) -> Result<Self, CoreError> {
        Ok(RecurrenceRule::Monthly {
            day_of_month: check_day_of_month(day_of_month)?,
        })
    }

    pub fn annually(month: Month, day_of_month: u32) -> Result<Self, CoreError> {
        Ok(RecurrenceRule::Annually {
            month,
            day_of_month: check_day_of_month(day_of_month)?,
        })
    }

    /// Stable discriminant used on the wire and for UI option selection.
    pub fn get_type(&self) -> &'static str {
        match self {
            RecurrenceRule::Daily => "daily",
            RecurrenceRule::Weekly { .. } => "weekly",
            RecurrenceRule::Monthly { .. } => "monthly",
            RecurrenceRule::Annually { .. } => "annually",
        }
    }

    /// Reconstructs a rule from its tagged wire payload.
    pub fn from_wire(payload: &Value) -> Result<Self, CoreError> {
        let object = payload
            .as_object()
            .ok_or_else(|| CoreError::malformed(TYPE_FIELD, payload.to_string()))?;
        let rule_type = match object.get(TYPE_FIELD) {
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return Err(CoreError::malformed(TYPE_FIELD, other.to_string())),
            None => return Err(CoreError::malformed(TYPE_FIELD, "missing")),
        };

        match rule_type {
            "daily" => Ok(RecurrenceRule::Daily),
            "weekly" => deserialize_weekly(object),
            "monthly" => deserialize_monthly(object),
            "annually" => deserialize_annually(object),
            other => Err(CoreError::UnsupportedRecurrenceType(other.to_string())),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let payload: Value = serde_json::from_str(json)?;
        Self::from_wire(&payload)
    }

    /// Emits `{type, ...variant fields}`.
    pub fn to_wire(&self) -> Value {
        match self {
            RecurrenceRule::Daily => json!({ TYPE_FIELD: "daily" }),
            RecurrenceRule::Weekly { day_of_week } => json!({
                TYPE_FIELD: "weekly",
                DAY_OF_WEEK_FIELD: day_of_week.as_str(),
            }),
            RecurrenceRule::Monthly { day_of_month } => json!({
                TYPE_FIELD: "monthly",
                DAY_OF_MONTH_FIELD: day_of_month,
            }),
            RecurrenceRule::Annually { month, day_of_month } => json!({
                TYPE_FIELD: "annually",
                MONTH_FIELD: month.as_str(),
                DAY_OF_MONTH_FIELD: day_of_month,
            }),
        }
    }

    /// Moves the task's deadline to its next occurrence against the system
    /// clock.
    pub fn reschedule(&self, task: Option<&mut Task>) -> Result<(), CoreError> {
        self.reschedule_with(&Calendar::new(SystemClock), task)
    }

    /// Overwrites the task's deadline with the next occurrence, keeping its
    /// representation: a date stays a date, a date-time keeps its hour and
    /// minute. Tasks without a deadline are left untouched.
    pub fn reschedule_with<C: Clock>(
        &self,
        calendar: &Calendar<C>,
        task: Option<&mut Task>,
    ) -> Result<(), CoreError> {
        let task = task.ok_or_else(|| {
            CoreError::InvalidArgument("cannot reschedule a missing task".to_string())
        })?;

        let previous = task.deadline();
        if previous.is_none() {
            tracing::debug!(task_id = %task.id, rule = self.get_type(), "task has no deadline, nothing to reschedule");
            return Ok(());
        }

        let next = self.next_deadline_with(calendar, &previous)?;
        task.set_deadline(next);
        tracing::debug!(
            task_id = %task.id,
            rule = self.get_type(),
            from = %previous,
            to = %next,
            "rescheduled task"
        );
        Ok(())
    }

    pub fn next_deadline(&self, current: &Deadline) -> Result<Deadline, CoreError> {
        self.next_deadline_with(&Calendar::new(SystemClock), current)
    }

    /// Computes the deadline that follows `current` without mutating anything.
    pub fn next_deadline_with<C: Clock>(
        &self,
        calendar: &Calendar<C>,
        current: &Deadline,
    ) -> Result<Deadline, CoreError> {
        let next = match current {
            Deadline::None => Deadline::None,
            Deadline::Date(_) => Deadline::Date(match *self {
                RecurrenceRule::Daily => calendar.tomorrow()?,
                RecurrenceRule::Weekly { day_of_week } => calendar.next_week(Some(day_of_week))?,
                RecurrenceRule::Monthly { day_of_month } => {
                    calendar.next_month(Some(day_of_month))?
                }
                RecurrenceRule::Annually { month, day_of_month } => {
                    calendar.next_year(Some(month), Some(day_of_month))?
                }
            }),
            Deadline::DateTime(dt) => {
                let (hour, minute) = (dt.hour(), dt.minute());
                Deadline::DateTime(match *self {
                    RecurrenceRule::Daily => calendar.tomorrow_at(hour, minute)?,
                    RecurrenceRule::Weekly { day_of_week } => {
                        calendar.next_week_at(hour, minute, Some(day_of_week))?
                    }
                    RecurrenceRule::Monthly { day_of_month } => {
                        calendar.next_month_at(hour, minute, Some(day_of_month))?
                    }
                    RecurrenceRule::Annually { month, day_of_month } => {
                        calendar.next_year_at(hour, minute, Some(month), Some(day_of_month))?
                    }
                })
            }
        };
        Ok(next)
    }
}

fn deserialize_weekly(object: &Map<String, Value>) -> Result<RecurrenceRule, CoreError> {
    let name = required_str(object, DAY_OF_WEEK_FIELD)?;
    let day_of_week = name
        .parse::<DayOfWeek>()
        .map_err(|e| CoreError::malformed(DAY_OF_WEEK_FIELD, e.0))?;
    Ok(RecurrenceRule::Weekly { day_of_week })
}

fn deserialize_monthly(object: &Map<String, Value>) -> Result<RecurrenceRule, CoreError> {
    RecurrenceRule::monthly(required_day_of_month(object)?)
}

fn deserialize_annually(object: &Map<String, Value>) -> Result<RecurrenceRule, CoreError> {
    let name = required_str(object, MONTH_FIELD)?;
    let month = name
        .parse::<Month>()
        .map_err(|e| CoreError::malformed(MONTH_FIELD, e.0))?;
    RecurrenceRule::annually(month, required_day_of_month(object)?)
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, CoreError> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(CoreError::malformed(field, other.to_string())),
        None => Err(CoreError::malformed(field, "missing")),
    }
}

fn required_day_of_month(object: &Map<String, Value>) -> Result<u32, CoreError> {
    let value = object
        .get(DAY_OF_MONTH_FIELD)
        .ok_or_else(|| CoreError::malformed(DAY_OF_MONTH_FIELD, "missing"))?;
    value
        .as_u64()
        .and_then(|day| u32::try_from(day).ok())
        .ok_or_else(|| CoreError::malformed(DAY_OF_MONTH_FIELD, value.to_string()))
}

fn check_day_of_month(day_of_month: u32) -> Result<u32, CoreError> {
    if (1..=31).contains(&day_of_month) {
        Ok(day_of_month)
    } else {
        Err(CoreError::malformed(
            DAY_OF_MONTH_FIELD,
            format!("{day_of_month} is outside 1-31"),
        ))
    }
}

impl Serialize for RecurrenceRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RecurrenceRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let payload = Value::deserialize(deserializer)?;
        RecurrenceRule::from_wire(&payload).map_err(serde::de::Error::custom)
    }
}
