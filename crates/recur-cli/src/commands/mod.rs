pub mod next;
pub mod task_file;
pub mod types;

use chrono::NaiveDate;
use chrono_humanize::HumanTime;
use recur_core::models::Deadline;

/// "in 3 weeks" style description of how far `deadline` is from `today`.
pub(crate) fn relative_to(today: NaiveDate, deadline: &Deadline) -> String {
    match deadline.day() {
        Some(day) => HumanTime::from(day - today).to_string(),
        None => "no deadline".to_string(),
    }
}
