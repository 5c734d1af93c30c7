//! Serializable result of a planning run, one record per transaction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::timeline::{AllocationRecord, RecurrenceKind, Timeline, TimelineStats};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub solvent: bool,
    pub stats: TimelineStats,
    pub transactions: Vec<PlannedTransaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedTransaction {
    pub kind: RecurrenceKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spendable: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsmoothed_daily_spendable: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoothed_daily_spendable: Option<f64>,
    /// Income side: the expenses this transaction funds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allocations: Vec<AllocationRecord>,
    /// Expense side: the incomes funding this transaction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<AllocationRecord>,
}

impl PlanReport {
    pub(crate) fn from_timeline(timeline: &Timeline) -> Self {
        let transactions = timeline
            .flattened()
            .into_iter()
            .map(|idx| {
                let txn = &timeline.transactions()[idx];
                let tag = timeline.recurrences()[txn.recurrence].tag.clone();
                PlannedTransaction {
                    kind: txn.kind,
                    name: txn.name.clone(),
                    tag,
                    date: txn.date,
                    amount: txn.amount,
                    spendable: txn.is_income().then_some(txn.spendable),
                    unsmoothed_daily_spendable: txn.unsmoothed_daily_spendable,
                    smoothed_daily_spendable: txn.smoothed_daily_spendable,
                    allocations: txn.allocations.clone(),
                    sources: txn.sources.clone(),
                }
            })
            .collect();
        PlanReport {
            solvent: true,
            // Computed by the solvency gate before any report is built.
            stats: timeline.cached_stats().cloned().unwrap_or_default(),
            transactions,
        }
    }

    /// The output contract for a plan that never got past the solvency gate.
    pub fn insolvent_document() -> serde_json::Value {
        json!({ "error": "Insolvent" })
    }
}
