use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::PlanConfig;
use crate::errors::PlanError;
use crate::report::PlanReport;

use super::allocate;
use super::day::Day;
use super::recurrence::{Recurrence, RecurrenceKind};
use super::smooth;
use super::transaction::Transaction;

/// Aggregate figures over the flattened transaction stream. Averages are
/// taken over the horizon length minus one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineStats {
    pub income_total: f64,
    pub income_avg: f64,
    pub expense_total: f64,
    pub expense_avg: f64,
    pub net_avg: f64,
}

/// Owns the recurrences, the transaction arena, and the day slots spanning
/// the horizon; orchestrates expansion, allocation, and smoothing for one
/// planning run. Day slots are indexed by offset from `origin` (the earlier
/// of the window start and the earliest transaction), and the next-income
/// lookup is a precomputed per-slot table so back-propagation during
/// smoothing is plain index walking.
#[derive(Debug)]
pub struct Timeline {
    pub(crate) config: PlanConfig,
    pub(crate) recurrences: Vec<Recurrence>,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) slots: Vec<Option<Day>>,
    pub(crate) origin: NaiveDate,
    pub(crate) next_income: Vec<Option<usize>>,
    generated: bool,
    allocated: bool,
    planned: bool,
    solvent: Option<bool>,
    stats: Option<TimelineStats>,
}

impl Timeline {
    pub fn new(config: PlanConfig, recurrences: Vec<Recurrence>) -> Result<Self, PlanError> {
        for recurrence in &recurrences {
            recurrence.schedule.ensure_valid(&recurrence.name)?;
            if recurrence.amount < 0.0 {
                return Err(PlanError::InvalidInput(format!(
                    "`{}` has a negative base amount",
                    recurrence.name
                )));
            }
        }
        Ok(Self {
            origin: config.window.start,
            config,
            recurrences,
            transactions: Vec::new(),
            slots: Vec::new(),
            next_income: Vec::new(),
            generated: false,
            allocated: false,
            planned: false,
            solvent: None,
            stats: None,
        })
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    pub fn recurrences(&self) -> &[Recurrence] {
        &self.recurrences
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn days(&self) -> impl Iterator<Item = &Day> {
        self.slots.iter().flatten()
    }

    /// Expands every income, then every expense, and buckets the produced
    /// transactions into day slots. Runs once; later calls are no-ops.
    pub fn generate(&mut self) {
        if self.generated {
            return;
        }
        let window = self.config.window;
        let mut arena: Vec<Transaction> = Vec::new();
        for kind in [RecurrenceKind::Income, RecurrenceKind::Expense] {
            for (idx, recurrence) in self
                .recurrences
                .iter()
                .enumerate()
                .filter(|(_, r)| r.kind == kind)
            {
                for date in recurrence.schedule.expand(window) {
                    arena.push(Transaction::new(idx, recurrence, date));
                }
            }
        }

        // One-time and tail occurrences may land outside the window; widen the
        // slot range so every transaction keeps its true date offset.
        let origin = arena
            .iter()
            .map(|txn| txn.date)
            .min()
            .map_or(window.start, |earliest| earliest.min(window.start));
        let last = arena
            .iter()
            .map(|txn| txn.date)
            .max()
            .map_or(window.end, |latest| latest.max(window.end));
        let len = (last - origin).num_days() as usize + 1;

        let mut slots: Vec<Option<Day>> = vec![None; len];
        for (txn_idx, txn) in arena.iter().enumerate() {
            let slot = (txn.date - origin).num_days() as usize;
            slots[slot]
                .get_or_insert_with(|| Day::new(txn.date, slot))
                .push(txn_idx);
        }

        let mut next_income: Vec<Option<usize>> = vec![None; len];
        let mut upcoming: Option<usize> = None;
        for slot in (0..len).rev() {
            next_income[slot] = upcoming;
            if slots[slot]
                .as_ref()
                .is_some_and(|day| day.has_income(&arena))
            {
                upcoming = Some(slot);
            }
        }

        debug!(
            "generated {} transactions across {} day slots",
            arena.len(),
            len
        );
        self.transactions = arena;
        self.slots = slots;
        self.origin = origin;
        self.next_income = next_income;
        self.generated = true;
    }

    /// Transaction indices in date order, incomes before expenses within a day.
    pub fn flattened(&self) -> Vec<usize> {
        self.slots
            .iter()
            .flatten()
            .flat_map(|day| day.txns.iter().copied())
            .collect()
    }

    fn ensure_stats(&mut self) {
        self.generate();
        if self.stats.is_some() {
            return;
        }
        let mut running = 0.0;
        let mut income_total = 0.0;
        let mut expense_total = 0.0;
        let mut solvent = true;
        for idx in self.flattened() {
            let txn = &self.transactions[idx];
            running += txn.amount;
            debug!(
                "balance {:.2} on {} after `{}` {:+.2}",
                running, txn.date, txn.name, txn.amount
            );
            if txn.is_income() {
                income_total += txn.amount;
            } else {
                expense_total += txn.amount.abs();
            }
            if running < 0.0 {
                solvent = false;
            }
        }
        let horizon_days = (self.config.window.num_days() as f64 - 1.0).max(1.0);
        self.stats = Some(TimelineStats {
            income_total,
            income_avg: income_total / horizon_days,
            expense_total,
            expense_avg: expense_total / horizon_days,
            net_avg: (income_total - expense_total) / horizon_days,
        });
        self.solvent = Some(solvent);
    }

    /// Whether the running balance stays non-negative across the horizon.
    pub fn solvent(&mut self) -> bool {
        self.ensure_stats();
        self.solvent == Some(true)
    }

    pub fn stats(&mut self) -> TimelineStats {
        self.ensure_stats();
        self.stats.clone().unwrap_or_default()
    }

    pub(crate) fn cached_stats(&self) -> Option<&TimelineStats> {
        self.stats.as_ref()
    }

    /// Runs the full pipeline: expansion, solvency gate, expense allocation,
    /// daily-spend seeding and smoothing. Each phase runs at most once, so a
    /// repeated call returns the same plan without recomputing.
    pub fn plan(&mut self) -> Result<PlanReport, PlanError> {
        self.generate();
        if !self.solvent() {
            info!("plan is insolvent; skipping allocation and smoothing");
            return Err(PlanError::Insolvent);
        }
        if !self.allocated {
            allocate::allocate(self)?;
            self.allocated = true;
        }
        if !self.planned {
            smooth::plan_daily_spend(self)?;
            self.planned = true;
        }
        let report = PlanReport::from_timeline(self);
        info!(
            "planned {} transactions, income avg {:.2}/day, expense avg {:.2}/day",
            report.transactions.len(),
            report.stats.income_avg,
            report.stats.expense_avg
        );
        Ok(report)
    }

    /// The smoothed daily allowance per income day, in date order.
    pub fn income_day_rates(&self) -> Vec<(NaiveDate, f64)> {
        self.slots
            .iter()
            .flatten()
            .filter(|day| day.has_income(&self.transactions))
            .map(|day| (day.date, day.smoothed_daily_spendable(&self.transactions)))
            .collect()
    }

    pub(crate) fn income_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, day)| {
                day.as_ref()
                    .filter(|d| d.has_income(&self.transactions))
                    .map(|_| slot)
            })
            .collect()
    }

    pub(crate) fn next_income_slot(&self, slot: usize) -> Option<usize> {
        self.next_income.get(slot).copied().flatten()
    }

    /// Distance in days to the next income day, defaulting to 1 for the last
    /// income day so its allowance applies to itself only.
    pub(crate) fn days_til_next_income(&self, slot: usize) -> i64 {
        self.next_income_slot(slot)
            .map_or(1, |next| (next - slot) as i64)
    }

    pub(crate) fn day_smoothed_rate(&self, slot: usize) -> f64 {
        self.slots[slot]
            .as_ref()
            .map_or(0.0, |day| day.smoothed_daily_spendable(&self.transactions))
    }

    pub(crate) fn set_day_rate(&mut self, slot: usize, rate: f64) {
        if let Some(day) = self.slots[slot].as_ref() {
            day.set_smoothed_rate(&mut self.transactions, rate);
        }
    }
}
