//! Planning domain models and the allocation/smoothing passes.

mod allocate;
pub mod day;
pub mod recurrence;
pub mod schedule;
mod smooth;
#[allow(clippy::module_inception)]
pub mod timeline;
pub mod transaction;

pub use day::Day;
pub use recurrence::{Recurrence, RecurrenceKind};
pub use schedule::Schedule;
pub use timeline::{Timeline, TimelineStats};
pub use transaction::{AllocationRecord, Transaction};
