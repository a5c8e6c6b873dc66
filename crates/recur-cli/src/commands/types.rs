use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use recur_core::models::{DayOfWeek, Month};
use recur_core::recurrence::RecurrenceRule;

pub fn list_types() -> Result<()> {
    let examples = [
        (RecurrenceRule::Daily, "-", "every day"),
        (
            RecurrenceRule::weekly(DayOfWeek::Monday),
            "dayOfWeek (MONDAY..SUNDAY)",
            "same weekday, in the week starting 7 days out",
        ),
        (
            RecurrenceRule::monthly(31)?,
            "dayOfMonth (1-31)",
            "next month, day clamped to month length",
        ),
        (
            RecurrenceRule::annually(Month::January, 1)?,
            "month (JANUARY..DECEMBER), dayOfMonth (1-31)",
            "next year, day clamped to month length",
        ),
    ];

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Type").add_attribute(Attribute::Bold),
            Cell::new("Fields").add_attribute(Attribute::Bold),
            Cell::new("Next occurrence").add_attribute(Attribute::Bold),
            Cell::new("Example").add_attribute(Attribute::Bold),
        ]);

    for (rule, fields, description) in examples {
        table.add_row(vec![
            Cell::new(rule.get_type()),
            Cell::new(fields),
            Cell::new(description),
            Cell::new(rule.to_wire().to_string()),
        ]);
    }

    println!("{table}");
    Ok(())
}
