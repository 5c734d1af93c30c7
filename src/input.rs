//! JSON input document for a planning run and its conversion into validated
//! recurrences.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::PlanError;
use crate::timeline::{Recurrence, RecurrenceKind, Schedule};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDocument {
    #[serde(default)]
    pub incomes: Vec<EntryInput>,
    #[serde(default)]
    pub expenses: Vec<EntryInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryInput {
    pub name: String,
    pub amount: f64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub schedule: ScheduleInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    #[serde(rename = "type")]
    pub kind: ScheduleKindInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<DaysInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleKindInput {
    OneTime,
    Monthly,
    Interval,
}

/// `days` accepts a single 1-based day-of-month or a list of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DaysInput {
    Single(u32),
    Many(Vec<u32>),
}

impl PlanDocument {
    pub fn parse(text: &str) -> Result<Self, PlanError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Converts the document into recurrences, defaulting missing schedule
    /// starts to the horizon start. Incomes come first, preserving the input
    /// order on each side.
    pub fn into_recurrences(self, window_start: NaiveDate) -> Result<Vec<Recurrence>, PlanError> {
        let mut recurrences = Vec::with_capacity(self.incomes.len() + self.expenses.len());
        for entry in self.incomes {
            recurrences.push(entry.into_recurrence(RecurrenceKind::Income, window_start)?);
        }
        for entry in self.expenses {
            recurrences.push(entry.into_recurrence(RecurrenceKind::Expense, window_start)?);
        }
        Ok(recurrences)
    }
}

impl EntryInput {
    fn into_recurrence(
        self,
        kind: RecurrenceKind,
        window_start: NaiveDate,
    ) -> Result<Recurrence, PlanError> {
        if self.amount < 0.0 {
            return Err(PlanError::InvalidInput(format!(
                "`{}` has a negative amount; expenses are negated internally",
                self.name
            )));
        }
        let schedule = build_schedule(&self.name, self.schedule, window_start)?;
        let mut recurrence = Recurrence::new(self.name, kind, self.amount, schedule);
        recurrence.tag = self.tag;
        Ok(recurrence)
    }
}

fn build_schedule(
    name: &str,
    input: ScheduleInput,
    window_start: NaiveDate,
) -> Result<Schedule, PlanError> {
    let start = input.start.unwrap_or(window_start);
    let schedule = match input.kind {
        ScheduleKindInput::OneTime => Schedule::OneTime { start },
        ScheduleKindInput::Monthly => {
            let days = match input.days {
                Some(DaysInput::Single(day)) => vec![day],
                Some(DaysInput::Many(days)) => days,
                None => Vec::new(),
            };
            Schedule::Monthly { start, days }
        }
        ScheduleKindInput::Interval => {
            let period_days = input.period.ok_or_else(|| PlanError::InvalidSchedule {
                name: name.to_string(),
                reason: "interval schedule needs a period in days".into(),
            })?;
            Schedule::Interval { start, period_days }
        }
    };
    schedule.ensure_valid(name)?;
    Ok(schedule)
}
