use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::DateWindow;
use crate::errors::PlanError;

/// Timing rule for a recurrence. `start` is always concrete; the input layer
/// defaults it to the horizon start when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Schedule {
    OneTime { start: NaiveDate },
    Monthly { start: NaiveDate, days: Vec<u32> },
    Interval { start: NaiveDate, period_days: i64 },
}

impl Schedule {
    pub fn start(&self) -> NaiveDate {
        match self {
            Schedule::OneTime { start }
            | Schedule::Monthly { start, .. }
            | Schedule::Interval { start, .. } => *start,
        }
    }

    /// Rejects degenerate rules before any expansion runs.
    pub fn ensure_valid(&self, name: &str) -> Result<(), PlanError> {
        match self {
            Schedule::OneTime { .. } => Ok(()),
            Schedule::Monthly { days, .. } => {
                if days.is_empty() {
                    return Err(PlanError::InvalidSchedule {
                        name: name.to_string(),
                        reason: "monthly schedule needs at least one day-of-month".into(),
                    });
                }
                if days.iter().any(|&d| d == 0) {
                    return Err(PlanError::InvalidSchedule {
                        name: name.to_string(),
                        reason: "day-of-month is 1-based".into(),
                    });
                }
                Ok(())
            }
            Schedule::Interval { period_days, .. } => {
                if *period_days <= 0 {
                    return Err(PlanError::InvalidSchedule {
                        name: name.to_string(),
                        reason: format!("interval period must be positive, got {}", period_days),
                    });
                }
                Ok(())
            }
        }
    }

    /// Expands the rule into dated occurrences for the given horizon.
    ///
    /// One-time events are emitted even outside the window. Monthly rules walk
    /// whole months until the month start reaches the window end, skipping
    /// computed dates earlier than the schedule start; a day offset past the
    /// month's length rolls into the following month. Interval rules emit up
    /// to and including the window end.
    pub fn expand(&self, window: DateWindow) -> Vec<NaiveDate> {
        match self {
            Schedule::OneTime { start } => vec![*start],
            Schedule::Monthly { start, days } => {
                let mut dates = Vec::new();
                let mut current = *start;
                while current < window.end {
                    let first = first_of_month(current);
                    for &day in days {
                        let date = first + Duration::days(day as i64 - 1);
                        if date < *start {
                            continue;
                        }
                        dates.push(date);
                    }
                    current = first_of_next_month(first);
                }
                dates
            }
            Schedule::Interval { start, period_days } => {
                let mut dates = Vec::new();
                let mut current = *start;
                while current <= window.end {
                    dates.push(current);
                    current += Duration::days(*period_days);
                }
                dates
            }
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month.
    date.with_day(1).unwrap_or(date)
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_of_next_month_rolls_over_year() {
        assert_eq!(first_of_next_month(date(2016, 12, 20)), date(2017, 1, 1));
        assert_eq!(first_of_next_month(date(2016, 3, 1)), date(2016, 4, 1));
    }

    #[test]
    fn interval_includes_window_end() {
        let window = DateWindow::new(date(2016, 1, 1), date(2016, 2, 1)).unwrap();
        let schedule = Schedule::Interval {
            start: date(2016, 1, 25),
            period_days: 7,
        };
        assert_eq!(
            schedule.expand(window),
            vec![date(2016, 1, 25), date(2016, 2, 1)]
        );
    }
}
