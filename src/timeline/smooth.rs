//! Daily-spend seeding and the windowed smoothing convergence loop.
//!
//! Seeding spreads each income's remaining balance evenly across the days
//! until the next income. Smoothing then repeatedly walks the income days,
//! redistributing any downward step larger than the configured fuzziness over
//! the combined span, until a full pass makes no adjustment. Fixing one dip
//! can expose a larger one further ahead that reaches back over already
//! smoothed ground, which is why single-pass local smoothing is not enough.

use tracing::debug;

use crate::errors::PlanError;

use super::timeline::Timeline;

pub(crate) fn plan_daily_spend(timeline: &mut Timeline) -> Result<(), PlanError> {
    seed_daily_spend(timeline);
    converge(timeline)
}

fn seed_daily_spend(timeline: &mut Timeline) {
    for slot in timeline.income_slots() {
        let days_between = timeline.days_til_next_income(slot) as f64;
        let incomes = match timeline.slots[slot].as_ref() {
            Some(day) => day.income_indices(&timeline.transactions),
            None => continue,
        };
        for idx in incomes {
            let txn = &mut timeline.transactions[idx];
            let rate = txn.spendable / days_between;
            txn.unsmoothed_daily_spendable = Some(rate);
            txn.smoothed_daily_spendable = Some(rate);
        }
    }
}

fn converge(timeline: &mut Timeline) -> Result<(), PlanError> {
    let income_slots = timeline.income_slots();
    let Some(&first) = income_slots.first() else {
        return Ok(());
    };
    let fuzziness = timeline.config.smoothing_fuzziness;

    for pass in 1..=timeline.config.max_smoothing_passes {
        let mut adjusted = false;
        let mut window = first;
        let mut candidate = timeline.next_income_slot(window);
        while let Some(current) = candidate {
            let window_rate = timeline.day_smoothed_rate(window);
            let candidate_rate = timeline.day_smoothed_rate(current);
            if window_rate > candidate_rate + fuzziness {
                down_smooth(timeline, window, current)?;
                adjusted = true;
            } else {
                // Dip resolved; start a new window at the candidate.
                window = current;
            }
            candidate = timeline.next_income_slot(current);
        }
        debug!("smoothing pass {pass}: adjusted = {adjusted}");
        if !adjusted {
            return Ok(());
        }
    }
    Err(PlanError::SmoothingDiverged(
        timeline.config.max_smoothing_passes,
    ))
}

/// Blends the window's spend with the dipping day's and writes the new rate
/// to every income day from `from` through `to` along the next-income chain.
fn down_smooth(timeline: &mut Timeline, from: usize, to: usize) -> Result<(), PlanError> {
    let from_rate = timeline.day_smoothed_rate(from);
    let to_rate = timeline.day_smoothed_rate(to);
    if to_rate >= from_rate {
        return Err(PlanError::SmoothingInvariant(format!(
            "down-smoothing requires a strictly lower target rate, got {:.2} -> {:.2}",
            from_rate, to_rate
        )));
    }

    let days_up_to_now = (to - from) as f64;
    let tail_days = timeline.days_til_next_income(to) as f64;
    let spend_to_now = from_rate * days_up_to_now;
    let spend_from_to = to_rate * tail_days;
    let new_rate = round2((spend_to_now + spend_from_to) / (days_up_to_now + tail_days));
    debug!(
        "down-smoothing slots {from}..={to}: {:.2}/{:.2} -> {new_rate:.2}",
        from_rate, to_rate
    );

    let mut slot = from;
    loop {
        timeline.set_day_rate(slot, new_rate);
        if slot == to {
            break;
        }
        slot = timeline.next_income_slot(slot).ok_or_else(|| {
            PlanError::SmoothingInvariant(
                "next-income chain ended before the window did".to_string(),
            )
        })?;
    }
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn round2_rounds_to_cents() {
        assert_eq!(round2(96.248), 96.25);
        assert_eq!(round2(96.2449), 96.24);
        assert_eq!(round2(-0.005), -0.01);
    }
}
