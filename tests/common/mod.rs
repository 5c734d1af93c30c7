#![allow(dead_code)]

use chrono::NaiveDate;
use spendable_core::config::{DateWindow, PlanConfig};
use spendable_core::input::PlanDocument;
use spendable_core::timeline::Timeline;

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

pub fn timeline_from_json(document: &str, start: &str, end: &str) -> Timeline {
    let window = DateWindow::new(date(start), date(end)).expect("window");
    let document = PlanDocument::parse(document).expect("parse document");
    let recurrences = document
        .into_recurrences(window.start)
        .expect("recurrences");
    Timeline::new(PlanConfig::new(window), recurrences).expect("timeline")
}

/// Mirrors the product rule: the daily allowance must never drop by more
/// than the smoothing fuzziness between consecutive income days.
pub fn assert_non_decreasing(rates: &[(NaiveDate, f64)], fuzziness: f64) {
    assert!(!rates.is_empty(), "expected at least one income day");
    let mut previous = rates[0].1;
    for (date, rate) in rates {
        assert!(
            previous <= rate + fuzziness,
            "allowance dropped from {previous:.2} to {rate:.2} on {date}"
        );
        previous = *rate;
    }
}

/// Total money represented by a smoothed series: each income day's rate
/// applied until the next income day (the last day covers itself only).
pub fn windowed_total(rates: &[(NaiveDate, f64)]) -> f64 {
    let mut total = 0.0;
    for (idx, (date, rate)) in rates.iter().enumerate() {
        let gap = match rates.get(idx + 1) {
            Some((next, _)) => (*next - *date).num_days() as f64,
            None => 1.0,
        };
        total += rate * gap;
    }
    total
}

pub fn spendable_total(timeline: &Timeline) -> f64 {
    timeline
        .transactions()
        .iter()
        .filter(|txn| txn.is_income())
        .map(|txn| txn.spendable)
        .sum()
}
