/// CLI integration tests for recur
///
/// These tests drive the binary as a black box with a fixed `--today` so every
/// expected deadline is deterministic.
use predicates::prelude::*;
use rstest::rstest;
use serde_json::json;

mod helpers;
use helpers::{assertions, CliTestHarness};

#[test]
fn test_cli_help_and_version() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["--help"])
        .stdout(predicate::str::contains("rescheduling recurring tasks"));

    harness
        .run_success(&["--version"])
        .stdout(predicate::str::contains("recur"));

    harness
        .run_failure(&["invalid-command"])
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_types_lists_every_rule() {
    let harness = CliTestHarness::new();
    let output = harness.run_success(&["types"]).get_output().stdout.clone();
    let stdout = String::from_utf8_lossy(&output);
    for rule_type in ["daily", "weekly", "monthly", "annually"] {
        assert!(stdout.contains(rule_type), "missing {rule_type} in:\n{stdout}");
    }
}

#[rstest]
#[case(r#"{"type":"daily"}"#, "2025-04-15", "2025-04-16")]
#[case(r#"{"type":"weekly","dayOfWeek":"MONDAY"}"#, "2025-10-19", "2025-10-20")]
#[case(r#"{"type":"monthly","dayOfMonth":31}"#, "2025-04-15", "2025-05-31")]
#[case(r#"{"type":"monthly","dayOfMonth":31}"#, "2024-01-31", "2024-02-29")]
#[case(r#"{"type":"annually","month":"JANUARY","dayOfMonth":31}"#, "2025-07-01", "2026-01-31")]
fn test_next_date_only(#[case] rule: &str, #[case] today: &str, #[case] expected: &str) {
    let harness = CliTestHarness::new();
    harness
        .run_success(&["next", "--rule", rule, "--today", today, "--date", today])
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_next_defaults_current_deadline_to_today() {
    let harness = CliTestHarness::new();
    harness
        .run_success(&["next", "--rule", r#"{"type":"daily"}"#, "--today", "2025-12-31"])
        .stdout(predicate::str::contains("2026-01-01"));
}

#[test]
fn test_next_keeps_time_of_day() {
    let harness = CliTestHarness::new();
    harness
        .run_success(&[
            "next",
            "--rule",
            r#"{"type":"weekly","dayOfWeek":"MONDAY"}"#,
            "--today",
            "2025-10-19",
            "--date-time",
            "2025-10-19T13:45",
        ])
        .stdout(predicate::str::contains("2025-10-20 13:45"));
}

#[test]
fn test_next_rejects_unknown_type() {
    let harness = CliTestHarness::new();
    harness
        .run_failure(&["next", "--rule", r#"{"type":"fortnightly"}"#])
        .stderr(assertions::has_error())
        .stderr(predicate::str::contains("Unsupported recurrence type"))
        .stderr(predicate::str::contains("fortnightly"));
}

#[test]
fn test_next_rejects_malformed_fields() {
    let harness = CliTestHarness::new();
    harness
        .run_failure(&["next", "--rule", r#"{"type":"weekly","dayOfWeek":"Mon"}"#])
        .stderr(predicate::str::contains("dayOfWeek"));
    harness
        .run_failure(&["next", "--rule", r#"{"type":"monthly","dayOfMonth":0}"#])
        .stderr(predicate::str::contains("dayOfMonth"));
    harness
        .run_failure(&["next", "--rule", "not json"])
        .stderr(assertions::has_error());
}

#[test]
fn test_next_rejects_both_deadline_forms() {
    let harness = CliTestHarness::new();
    harness.run_failure(&[
        "next",
        "--rule",
        r#"{"type":"daily"}"#,
        "--date",
        "2025-01-01",
        "--date-time",
        "2025-01-01T10:00",
    ]);
}

#[test]
fn test_reschedule_writes_file() {
    let harness = CliTestHarness::new();
    let path = harness.write_task(
        "rent.json",
        &json!({
            "name": "Pay rent",
            "deadlineDate": "2025-03-31",
            "recurrence": { "type": "monthly", "dayOfMonth": 31 }
        }),
    );

    harness
        .run_success(&["reschedule", path.to_str().unwrap(), "--write", "--today", "2025-03-31"])
        .stdout(predicate::str::contains("Rescheduled 'Pay rent'"));

    let task = harness.read_task(&path);
    assert_eq!(task["deadlineDate"], "2025-04-30");
    assert_eq!(task["recurrence"], json!({ "type": "monthly", "dayOfMonth": 31 }));
    assert!(task.get("deadlineDateTime").is_none());
}

#[test]
fn test_reschedule_prints_without_touching_file() {
    let harness = CliTestHarness::new();
    let document = json!({
        "name": "Birthday card",
        "deadlineDate": "2025-07-01",
        "recurrence": { "type": "annually", "month": "JULY", "dayOfMonth": 4 }
    });
    let path = harness.write_task("card.json", &document);

    harness
        .run_success(&["reschedule", path.to_str().unwrap(), "--today", "2025-07-01"])
        .stdout(predicate::str::contains("\"deadlineDate\": \"2026-07-04\""));

    assert_eq!(harness.read_task(&path)["deadlineDate"], "2025-07-01");
}

#[test]
fn test_reschedule_converts_date_times_through_timezone() {
    let harness = CliTestHarness::with_timezone("America/New_York");
    let path = harness.write_task(
        "standup.json",
        &json!({
            "name": "Standup",
            "deadlineDateTime": "2025-07-04T13:00:00Z",
            "recurrence": { "type": "daily" }
        }),
    );

    harness.run_success(&["reschedule", path.to_str().unwrap(), "-w", "--today", "2025-07-04"]);

    // 09:00 EDT stays 09:00 EDT
    assert_eq!(harness.read_task(&path)["deadlineDateTime"], "2025-07-05T13:00:00Z");
}

#[test]
fn test_reschedule_requires_recurrence() {
    let harness = CliTestHarness::new();
    let path = harness.write_task("once.json", &json!({ "name": "Once", "deadlineDate": "2025-01-01" }));

    harness
        .run_failure(&["reschedule", path.to_str().unwrap()])
        .stderr(predicate::str::contains("no recurrence rule"));
}

#[test]
fn test_reschedule_missing_file() {
    let harness = CliTestHarness::new();
    harness
        .run_failure(&["reschedule", "does-not-exist.json"])
        .stderr(predicate::str::contains("Failed to read task file"));
}

#[test]
fn test_complete_recurring_task_stays_pending() {
    let harness = CliTestHarness::new();
    let path = harness.write_task(
        "gym.json",
        &json!({
            "name": "Gym",
            "deadlineDate": "2025-10-19",
            "recurrence": { "type": "weekly", "dayOfWeek": "MONDAY" }
        }),
    );

    harness
        .run_success(&["complete", path.to_str().unwrap(), "--write", "--today", "2025-10-19"])
        .stdout(predicate::str::contains("recurs"));

    let task = harness.read_task(&path);
    assert_eq!(task["status"], "pending");
    assert_eq!(task["deadlineDate"], "2025-10-20");
}

#[test]
fn test_complete_one_off_task() {
    let harness = CliTestHarness::new();
    let path = harness.write_task("tax.json", &json!({ "name": "File taxes", "deadlineDate": "2025-04-15" }));

    harness
        .run_success(&["complete", path.to_str().unwrap(), "--write"])
        .stdout(predicate::str::contains("marked as complete"));
    assert_eq!(harness.read_task(&path)["status"], "completed");

    harness
        .run_failure(&["complete", path.to_str().unwrap()])
        .stderr(predicate::str::contains("already completed"));
}

#[test]
fn test_invalid_timezone_only_fails_commands_that_need_it() {
    let harness = CliTestHarness::with_timezone("Nowhere/Special");

    harness.run_success(&["--help"]);
    harness
        .run_success(&["types"])
        .stdout(predicate::str::contains("monthly"));

    harness
        .run_failure(&["next", "--rule", r#"{"type":"daily"}"#, "--today", "2025-01-01"])
        .stderr(assertions::has_error())
        .stderr(predicate::str::contains("Invalid timezone"));

    let path = harness.write_task("daily.json", &json!({
        "name": "Journal",
        "deadlineDate": "2025-01-01",
        "recurrence": { "type": "daily" }
    }));
    harness
        .run_failure(&["reschedule", path.to_str().unwrap()])
        .stderr(predicate::str::contains("Invalid timezone"));
    harness
        .run_failure(&["complete", path.to_str().unwrap()])
        .stderr(predicate::str::contains("Invalid timezone"));
}
