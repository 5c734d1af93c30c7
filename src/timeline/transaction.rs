use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::recurrence::{Recurrence, RecurrenceKind};

/// Tolerance for money comparisons over f64 sums.
pub(crate) const AMOUNT_EPSILON: f64 = 1e-6;

/// One side of an income-funds-expense link. The pair (counterparty, date)
/// uniquely identifies the other transaction within a planning run, so the
/// many-to-many relation is stored as plain value records on both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub counterparty: String,
    pub date: NaiveDate,
    pub amount: f64,
}

/// One dated occurrence of a recurrence's amount, stored in the timeline's
/// transaction arena and referenced by index from its day bucket.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Index of the owning recurrence in the timeline.
    pub recurrence: usize,
    pub kind: RecurrenceKind,
    pub name: String,
    pub date: NaiveDate,
    /// Signed: positive for income, negative for expense.
    pub amount: f64,
    /// Income only: remaining balance not yet assigned to fund an expense.
    /// Starts at the amount and only decreases.
    pub spendable: f64,
    /// Income side of the funding links.
    pub allocations: Vec<AllocationRecord>,
    /// Expense side of the funding links.
    pub sources: Vec<AllocationRecord>,
    pub unsmoothed_daily_spendable: Option<f64>,
    pub smoothed_daily_spendable: Option<f64>,
}

impl Transaction {
    pub fn new(recurrence: usize, definition: &Recurrence, date: NaiveDate) -> Self {
        let amount = definition.signed_amount();
        Self {
            recurrence,
            kind: definition.kind,
            name: definition.name.clone(),
            date,
            amount,
            spendable: amount.max(0.0),
            allocations: Vec::new(),
            sources: Vec::new(),
            unsmoothed_daily_spendable: None,
            smoothed_daily_spendable: None,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == RecurrenceKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == RecurrenceKind::Expense
    }

    /// Total already promised to expenses (income side).
    pub fn allocated(&self) -> f64 {
        self.allocations.iter().map(|record| record.amount).sum()
    }

    pub fn unallocated(&self) -> f64 {
        self.amount - self.allocated()
    }

    pub fn is_fully_allocated(&self) -> bool {
        self.unallocated() <= AMOUNT_EPSILON
    }

    /// Total already covered by incomes (expense side).
    pub fn sourced(&self) -> f64 {
        self.sources.iter().map(|record| record.amount).sum()
    }

    pub fn unsourced(&self) -> f64 {
        self.amount.abs() - self.sourced()
    }

    pub fn is_sourced(&self) -> bool {
        self.unsourced() <= AMOUNT_EPSILON
    }
}
