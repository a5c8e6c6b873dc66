use anyhow::Result;
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use recur_core::calendar::{Calendar, FixedClock};
use recur_core::models::Deadline;
use recur_core::recurrence::RecurrenceRule;
use recur_core::wire;

use crate::cli::NextCommand;
use crate::commands::relative_to;
use crate::parser::{parse_local_date_time, resolve_today};

pub fn next_deadline(command: NextCommand, timezone: Tz) -> Result<()> {
    let rule = RecurrenceRule::from_json(&command.rule)?;
    let today = resolve_today(command.today.as_deref(), timezone)?;
    let calendar = Calendar::new(FixedClock(today));

    let current = match (&command.date, &command.date_time) {
        (Some(date), _) => Deadline::Date(wire::parse_date(date)?),
        (None, Some(date_time)) => Deadline::date_time(parse_local_date_time(date_time)?),
        (None, None) => Deadline::Date(today),
    };

    let next = rule.next_deadline_with(&calendar, &current)?;
    tracing::info!(rule = rule.get_type(), %today, from = %current, to = %next, "computed next deadline");

    println!("{} {}", "Rule:".bold(), rule.to_wire().to_string().cyan());
    println!("{} {}", "Current:".bold(), current);
    println!(
        "{} {} ({})",
        "Next:".bold(),
        next.green(),
        relative_to(today, &next)
    );
    Ok(())
}
