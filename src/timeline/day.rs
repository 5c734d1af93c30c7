use chrono::NaiveDate;

use super::transaction::{Transaction, AMOUNT_EPSILON};

/// Calendar-date bucket of transaction indices, incomes strictly before
/// expenses by construction order. Per-day sums are recomputed over the arena
/// on demand rather than cached, so there is no staleness to invalidate.
#[derive(Debug, Clone)]
pub struct Day {
    pub date: NaiveDate,
    /// Offset of this day in the timeline's slot array.
    pub slot: usize,
    pub txns: Vec<usize>,
}

impl Day {
    pub fn new(date: NaiveDate, slot: usize) -> Self {
        Self {
            date,
            slot,
            txns: Vec::new(),
        }
    }

    pub fn push(&mut self, txn: usize) {
        self.txns.push(txn);
    }

    pub fn income_indices(&self, arena: &[Transaction]) -> Vec<usize> {
        self.txns
            .iter()
            .copied()
            .filter(|&idx| arena[idx].is_income())
            .collect()
    }

    pub fn has_income(&self, arena: &[Transaction]) -> bool {
        self.txns.iter().any(|&idx| arena[idx].is_income())
    }

    pub fn unsmoothed_daily_spendable(&self, arena: &[Transaction]) -> f64 {
        self.txns
            .iter()
            .filter_map(|&idx| arena[idx].unsmoothed_daily_spendable)
            .sum()
    }

    pub fn smoothed_daily_spendable(&self, arena: &[Transaction]) -> f64 {
        self.txns
            .iter()
            .filter_map(|&idx| arena[idx].smoothed_daily_spendable)
            .sum()
    }

    /// Rewrites this day's smoothed rate, spreading it across the day's
    /// incomes in proportion to their unsmoothed values so the day total
    /// equals the new rate exactly.
    pub fn set_smoothed_rate(&self, arena: &mut [Transaction], rate: f64) {
        let incomes = self.income_indices(arena);
        if incomes.is_empty() {
            return;
        }
        let total_unsmoothed: f64 = incomes
            .iter()
            .filter_map(|&idx| arena[idx].unsmoothed_daily_spendable)
            .sum();
        if total_unsmoothed > AMOUNT_EPSILON {
            for &idx in &incomes {
                let share = arena[idx].unsmoothed_daily_spendable.unwrap_or(0.0) / total_unsmoothed;
                arena[idx].smoothed_daily_spendable = Some(rate * share);
            }
        } else {
            let even = rate / incomes.len() as f64;
            for &idx in &incomes {
                arena[idx].smoothed_daily_spendable = Some(even);
            }
        }
    }
}
