use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::PlanError;

const DEFAULT_SMOOTHING_FUZZINESS: f64 = 1.0;
const DEFAULT_MAX_SMOOTHING_PASSES: usize = 100;

/// Half-open planning horizon `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PlanError> {
        if start >= end {
            return Err(PlanError::InvalidWindow(format!(
                "start {} must be before end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Per-run planning configuration. Passed explicitly into the Timeline so
/// independent runs never share mutable globals.
#[derive(Debug, Clone, Copy)]
pub struct PlanConfig {
    pub window: DateWindow,
    /// Monetary tolerance under which a downward step in the smoothed series
    /// is accepted instead of redistributed.
    pub smoothing_fuzziness: f64,
    /// Safety valve for the smoothing loop. Exceeding it is an internal
    /// error, not a property of any valid input.
    pub max_smoothing_passes: usize,
}

impl PlanConfig {
    pub fn new(window: DateWindow) -> Self {
        Self {
            window,
            smoothing_fuzziness: DEFAULT_SMOOTHING_FUZZINESS,
            max_smoothing_passes: DEFAULT_MAX_SMOOTHING_PASSES,
        }
    }
}
