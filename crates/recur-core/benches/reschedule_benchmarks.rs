use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use recur_core::calendar::{Calendar, FixedClock};
use recur_core::models::{DayOfWeek, Deadline, Month, Task};
use recur_core::recurrence::RecurrenceRule;
use serde_json::json;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
}

fn create_test_task() -> Task {
    Task::new("Benchmark Task")
        .with_deadline(Deadline::DateTime(today().and_hms_opt(9, 30, 0).unwrap()))
}

fn bench_reschedule_variants(c: &mut Criterion) {
    let calendar = Calendar::new(FixedClock(today()));
    let rules = [
        RecurrenceRule::Daily,
        RecurrenceRule::weekly(DayOfWeek::Thursday),
        RecurrenceRule::monthly(31).unwrap(),
        RecurrenceRule::annually(Month::February, 29).unwrap(),
    ];

    for rule in rules {
        c.bench_function(&format!("reschedule_{}", rule.get_type()), |b| {
            b.iter(|| {
                let mut task = create_test_task();
                black_box(rule)
                    .reschedule_with(&calendar, Some(&mut task))
                    .unwrap();
                task
            })
        });
    }
}

fn bench_from_wire(c: &mut Criterion) {
    let payload = json!({ "type": "annually", "month": "JANUARY", "dayOfMonth": 31 });

    c.bench_function("from_wire_annually", |b| {
        b.iter(|| RecurrenceRule::from_wire(black_box(&payload)).unwrap())
    });
}

criterion_group!(benches, bench_reschedule_variants, bench_from_wire);
criterion_main!(benches);
