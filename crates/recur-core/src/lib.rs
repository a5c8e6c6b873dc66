//! # Recur Core Library
//!
//! Rescheduling engine for recurring tasks. A task's deadline is either a
//! calendar date or a local date and time; a [`recurrence::RecurrenceRule`]
//! moves it to the next occurrence with calendar-correct arithmetic.
//!
//! ## Core Modules
//!
//! - [`calendar`]: "tomorrow", "next week on W", "next month on D",
//!   "next year on M/D" with day-of-month clamping
//! - [`recurrence`]: the closed set of recurrence rules, their wire form and
//!   rescheduling
//! - [`models`]: tasks, deadlines, weekday and month enumerations
//! - [`wire`]: date and date-time string conversions
//! - [`error`]: error type shared by all of the above
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use recur_core::calendar::{Calendar, FixedClock};
//! use recur_core::models::{Deadline, Task};
//! use recur_core::recurrence::RecurrenceRule;
//! use serde_json::json;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
//! let calendar = Calendar::new(FixedClock(today));
//!
//! let rule = RecurrenceRule::from_wire(&json!({ "type": "monthly", "dayOfMonth": 31 })).unwrap();
//! let mut task = Task::new("Send invoice").with_deadline(Deadline::Date(today));
//!
//! rule.reschedule_with(&calendar, Some(&mut task)).unwrap();
//! assert_eq!(task.deadline_date(), NaiveDate::from_ymd_opt(2025, 5, 31));
//! ```

pub mod calendar;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod wire;
