//! Backward greedy matching of expenses to the incomes that fund them.
//!
//! The matching walks the reversed transaction stream so every expense is
//! covered by the most recent income with unallocated balance on or before
//! its date. Deliberately a locality-preserving heuristic rather than an
//! optimal matching: the resulting links stay easy to audit.

use tracing::debug;

use crate::errors::PlanError;

use super::timeline::Timeline;
use super::transaction::{AllocationRecord, AMOUNT_EPSILON};

pub(crate) fn allocate(timeline: &mut Timeline) -> Result<(), PlanError> {
    let mut reversed = timeline.flattened();
    reversed.reverse();

    for position in 0..reversed.len() {
        let expense_idx = reversed[position];
        if !timeline.transactions[expense_idx].is_expense() {
            continue;
        }
        {
            let expense = &timeline.transactions[expense_idx];
            debug!(
                "finding sources for `{}` on {}: {:.2} of {:.2} unsourced",
                expense.name,
                expense.date,
                expense.unsourced(),
                expense.amount.abs()
            );
        }

        // Scan further into the past, most recent income first.
        for &income_idx in &reversed[position..] {
            if timeline.transactions[expense_idx].is_sourced() {
                break;
            }
            {
                let income = &timeline.transactions[income_idx];
                if !income.is_income() || income.is_fully_allocated() {
                    continue;
                }
            }

            let unsourced = timeline.transactions[expense_idx].unsourced();
            let unallocated = timeline.transactions[income_idx].unallocated();
            let amount = unsourced.min(unallocated);
            let (expense_name, expense_date) = {
                let expense = &timeline.transactions[expense_idx];
                (expense.name.clone(), expense.date)
            };
            let (income_name, income_date) = {
                let income = &timeline.transactions[income_idx];
                (income.name.clone(), income.date)
            };

            let income = &mut timeline.transactions[income_idx];
            income.allocations.push(AllocationRecord {
                counterparty: expense_name,
                date: expense_date,
                amount,
            });
            income.spendable -= amount;
            if income.spendable < -AMOUNT_EPSILON {
                return Err(PlanError::AllocationInvariant(format!(
                    "income `{}` on {} allocated past its amount",
                    income_name, income_date
                )));
            }

            timeline.transactions[expense_idx]
                .sources
                .push(AllocationRecord {
                    counterparty: income_name,
                    date: income_date,
                    amount,
                });
        }
    }

    // The solvency gate runs first, so an uncovered expense here means the
    // matching itself is broken.
    for idx in timeline.flattened() {
        let txn = &timeline.transactions[idx];
        if txn.is_expense() && !txn.is_sourced() {
            return Err(PlanError::AllocationInvariant(format!(
                "expense `{}` on {} left {:.2} unsourced in a solvent plan",
                txn.name,
                txn.date,
                txn.unsourced()
            )));
        }
    }
    Ok(())
}
