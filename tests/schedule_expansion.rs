mod common;

use common::{date, timeline_from_json};
use spendable_core::config::{DateWindow, PlanConfig};
use spendable_core::errors::PlanError;
use spendable_core::timeline::{Recurrence, RecurrenceKind, Schedule, Timeline};

fn window(start: &str, end: &str) -> DateWindow {
    DateWindow::new(date(start), date(end)).expect("window")
}

#[test]
fn monthly_two_days_over_one_month() {
    let schedule = Schedule::Monthly {
        start: date("2016-01-01"),
        days: vec![1, 15],
    };
    assert_eq!(
        schedule.expand(window("2016-01-01", "2016-02-01")),
        vec![date("2016-01-01"), date("2016-01-15")]
    );
}

#[test]
fn monthly_start_mid_month_drops_earlier_days_once() {
    let schedule = Schedule::Monthly {
        start: date("2016-02-03"),
        days: vec![1, 15],
    };
    assert_eq!(
        schedule.expand(window("2016-01-01", "2016-04-01")),
        vec![
            date("2016-02-15"),
            date("2016-03-01"),
            date("2016-03-15"),
        ]
    );
}

#[test]
fn monthly_day_offset_rolls_into_next_month() {
    let schedule = Schedule::Monthly {
        start: date("2016-04-01"),
        days: vec![31],
    };
    // April has 30 days; the offset lands on May 1st.
    assert_eq!(
        schedule.expand(window("2016-04-01", "2016-05-01")),
        vec![date("2016-05-01")]
    );
}

#[test]
fn one_time_outside_window_is_not_clipped() {
    let schedule = Schedule::OneTime {
        start: date("2016-03-15"),
    };
    assert_eq!(
        schedule.expand(window("2016-01-01", "2016-02-01")),
        vec![date("2016-03-15")]
    );
}

#[test]
fn interval_emits_through_window_end_inclusive() {
    let schedule = Schedule::Interval {
        start: date("2016-01-01"),
        period_days: 7,
    };
    let dates = schedule.expand(window("2016-01-01", "2016-02-01"));
    assert_eq!(dates.len(), 5);
    assert_eq!(dates.last(), Some(&date("2016-01-29")));

    let boundary = Schedule::Interval {
        start: date("2016-01-25"),
        period_days: 7,
    };
    assert_eq!(
        boundary.expand(window("2016-01-01", "2016-02-01")),
        vec![date("2016-01-25"), date("2016-02-01")]
    );
}

#[test]
fn monthly_without_days_is_rejected() {
    let recurrence = Recurrence::new(
        "Rent",
        RecurrenceKind::Expense,
        120.0,
        Schedule::Monthly {
            start: date("2016-01-01"),
            days: Vec::new(),
        },
    );
    let config = PlanConfig::new(window("2016-01-01", "2016-02-01"));
    assert!(matches!(
        Timeline::new(config, vec![recurrence]),
        Err(PlanError::InvalidSchedule { .. })
    ));
}

#[test]
fn monthly_day_zero_is_rejected() {
    let recurrence = Recurrence::new(
        "Rent",
        RecurrenceKind::Expense,
        120.0,
        Schedule::Monthly {
            start: date("2016-01-01"),
            days: vec![0, 15],
        },
    );
    let config = PlanConfig::new(window("2016-01-01", "2016-02-01"));
    assert!(matches!(
        Timeline::new(config, vec![recurrence]),
        Err(PlanError::InvalidSchedule { .. })
    ));
}

#[test]
fn interval_with_non_positive_period_is_rejected() {
    let recurrence = Recurrence::new(
        "groceries",
        RecurrenceKind::Expense,
        50.0,
        Schedule::Interval {
            start: date("2016-01-01"),
            period_days: 0,
        },
    );
    let config = PlanConfig::new(window("2016-01-01", "2016-02-01"));
    assert!(matches!(
        Timeline::new(config, vec![recurrence]),
        Err(PlanError::InvalidSchedule { .. })
    ));
}

#[test]
fn generation_is_idempotent() {
    let document = r#"{
      "incomes": [
        {"name": "Walmart", "amount": 300,
         "schedule": {"type": "MONTHLY", "days": [1, 15]}}
      ],
      "expenses": []
    }"#;
    let mut timeline = timeline_from_json(document, "2016-01-01", "2016-02-01");
    timeline.generate();
    let first = timeline.flattened();
    timeline.generate();
    assert_eq!(first, timeline.flattened());
}
