use thiserror::Error;

/// Error type that captures planning failures, from user-facing insolvency
/// to internal invariant violations that must never be recovered locally.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Expected business outcome: cumulative balance goes negative somewhere
    /// on the horizon. No allocation or smoothing is attempted.
    #[error("plan is insolvent")]
    Insolvent,
    #[error("invalid schedule for `{name}`: {reason}")]
    InvalidSchedule { name: String, reason: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid horizon: {0}")]
    InvalidWindow(String),
    /// Internal: an income balance went negative during allocation.
    #[error("allocation invariant violated: {0}")]
    AllocationInvariant(String),
    /// Internal: down-smoothing called against a non-decreasing step.
    #[error("smoothing invariant violated: {0}")]
    SmoothingInvariant(String),
    /// Internal: the smoothing loop hit its pass-count safety valve.
    #[error("smoothing did not converge after {0} passes")]
    SmoothingDiverged(usize),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
