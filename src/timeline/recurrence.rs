use serde::{Deserialize, Serialize};

use super::schedule::Schedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    Income,
    Expense,
}

/// A named repeating monetary obligation. The amount is stored as entered
/// (non-negative); expenses contribute negatively through `signed_amount`.
/// Immutable once the timeline is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Recurrence {
    pub name: String,
    pub kind: RecurrenceKind,
    pub amount: f64,
    pub tag: Option<String>,
    pub schedule: Schedule,
}

impl Recurrence {
    pub fn new(name: impl Into<String>, kind: RecurrenceKind, amount: f64, schedule: Schedule) -> Self {
        Self {
            name: name.into(),
            kind,
            amount,
            tag: None,
            schedule,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            RecurrenceKind::Income => self.amount,
            RecurrenceKind::Expense => -self.amount,
        }
    }
}
