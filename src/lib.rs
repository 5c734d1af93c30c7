#![doc(test(attr(deny(warnings))))]

//! Cash-flow planning primitives: recurring income/expense expansion,
//! backward matching of expenses to the incomes that fund them, and a
//! smoothed, monotonically non-decreasing daily safe-to-spend series.

pub mod cli;
pub mod config;
pub mod errors;
pub mod input;
pub mod report;
pub mod timeline;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with sensible defaults and emits a startup log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("spendable_core=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("Spendable planner tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
