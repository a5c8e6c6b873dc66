use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use recur_core::calendar::{Calendar, FixedClock};
use recur_core::error::CoreError;
use recur_core::models::{CompletionResult, Task};
use std::fs;

use crate::cli::TaskFileCommand;
use crate::commands::relative_to;
use crate::parser::resolve_today;

pub fn reschedule_task(command: TaskFileCommand, timezone: Tz) -> Result<()> {
    let today = resolve_today(command.today.as_deref(), timezone)?;
    let mut task = read_task(&command, timezone)?;

    let rule = task.recurrence.ok_or_else(|| {
        anyhow!(CoreError::InvalidArgument(format!(
            "task '{}' has no recurrence rule",
            task.name
        )))
    })?;

    let previous = task.deadline();
    rule.reschedule_with(&Calendar::new(FixedClock(today)), Some(&mut task))?;

    let summary = format!(
        "Rescheduled '{}' ({}): {} -> {} ({})",
        task.name,
        rule.get_type(),
        previous,
        task.deadline(),
        relative_to(today, &task.deadline())
    );
    finish(&command, &task, timezone, &summary)
}

pub fn complete_task(command: TaskFileCommand, timezone: Tz) -> Result<()> {
    let today = resolve_today(command.today.as_deref(), timezone)?;
    let mut task = read_task(&command, timezone)?;

    let summary = match task.complete_with(&Calendar::new(FixedClock(today)))? {
        CompletionResult::Completed => format!("Task '{}' marked as complete.", task.name),
        CompletionResult::Rescheduled { previous, next } => format!(
            "Task '{}' recurs: {} -> {} ({})",
            task.name,
            previous,
            next,
            relative_to(today, &next)
        ),
    };
    finish(&command, &task, timezone, &summary)
}

fn read_task(command: &TaskFileCommand, timezone: Tz) -> Result<Task> {
    let contents = fs::read_to_string(&command.file)
        .with_context(|| format!("Failed to read task file '{}'", command.file.display()))?;
    let task = Task::from_json_in(&contents, &timezone)?;
    tracing::debug!(task_id = %task.id, file = %command.file.display(), "loaded task");
    Ok(task)
}

/// Writes the task back to its file when asked to, otherwise prints it.
fn finish(command: &TaskFileCommand, task: &Task, timezone: Tz, summary: &str) -> Result<()> {
    let json = task.to_json_in(&timezone)?;
    if command.write {
        fs::write(&command.file, format!("{json}\n"))
            .with_context(|| format!("Failed to write task file '{}'", command.file.display()))?;
        println!("{}", summary.green());
    } else {
        eprintln!("{}", summary.green());
        println!("{json}");
    }
    Ok(())
}
