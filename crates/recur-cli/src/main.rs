use chrono_tz::Tz;
use clap::Parser;
use owo_colors::{OwoColorize, Style};
use recur_core::error::CoreError;

mod cli;
mod commands;
mod config;
mod logging;
mod parser;

fn main() {
    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} ignoring invalid configuration: {}", "Warning:".yellow().bold(), e);
            config::Config::default()
        }
    };
    logging::init(&config.log_level);

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Next(command) => {
            timezone(&config).and_then(|tz| commands::next::next_deadline(command, tz))
        }
        cli::Commands::Reschedule(command) => {
            timezone(&config).and_then(|tz| commands::task_file::reschedule_task(command, tz))
        }
        cli::Commands::Complete(command) => {
            timezone(&config).and_then(|tz| commands::task_file::complete_task(command, tz))
        }
        cli::Commands::Types => commands::types::list_types(),
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

/// Resolves the configured zone for commands that read or write deadlines.
fn timezone(config: &config::Config) -> anyhow::Result<Tz> {
    let timezone = config.timezone().map_err(anyhow::Error::msg)?;
    tracing::debug!(%timezone, "using timezone");
    Ok(timezone)
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::UnsupportedRecurrenceType(t) => {
                eprintln!(
                    "{} Unsupported recurrence type '{}'. Supported: {}",
                    "Error:".style(error_style),
                    t.yellow(),
                    recur_core::recurrence::RecurrenceRule::TYPES.join(", ")
                );
            }
            CoreError::MalformedRuleField { field, value } => {
                eprintln!(
                    "{} Malformed recurrence field '{}': {}",
                    "Error:".style(error_style),
                    field.yellow(),
                    value
                );
            }
            CoreError::InvalidArgument(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            _ => eprintln!("{} {:#}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
