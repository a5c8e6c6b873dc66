use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reschedule recurring tasks: daily, weekly, monthly and annual deadlines
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the next deadline a rule produces
    Next(NextCommand),
    /// Move a task's deadline to its next occurrence
    Reschedule(TaskFileCommand),
    /// Complete a task, rescheduling it if it recurs
    Complete(TaskFileCommand),
    /// List the supported recurrence rule types
    Types,
}

#[derive(Parser, Debug, Clone)]
pub struct NextCommand {
    /// Recurrence rule as JSON, e.g. '{"type":"weekly","dayOfWeek":"MONDAY"}'
    #[arg(long)]
    pub rule: String,
    /// Current date-only deadline (YYYY-MM-DD); defaults to today
    #[arg(long, conflicts_with = "date_time")]
    pub date: Option<String>,
    /// Current date-time deadline in local time (YYYY-MM-DDTHH:MM)
    #[arg(long)]
    pub date_time: Option<String>,
    /// Treat this date as today (YYYY-MM-DD or phrases like "next friday")
    #[arg(long)]
    pub today: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct TaskFileCommand {
    /// Path to the task JSON document
    pub file: PathBuf,
    /// Write the updated task back to the file instead of printing it
    #[arg(long, short)]
    pub write: bool,
    /// Treat this date as today (YYYY-MM-DD or phrases like "next friday")
    #[arg(long)]
    pub today: Option<String>,
}
