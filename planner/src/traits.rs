//! Trait definitions with mockall annotations for testing
//!
//! The planner core is pure; the only I/O seam is where raw driver and job
//! records come from. Sources are injected into [`crate::Planner`] so that the
//! CLI can read files while the HTTP front-end and tests pass records inline.

use shared::{DriverRecord, JobRecord};

use crate::error::PlannerResult;

/// Source of raw input records
///
/// Implementations only read; validation happens in [`crate::core::loader`].
#[mockall::automock]
pub trait RecordSource: Send + Sync {
    /// Read every driver record, in source order
    fn driver_records(&self) -> PlannerResult<Vec<DriverRecord>>;

    /// Read every job record, in source order
    fn job_records(&self) -> PlannerResult<Vec<JobRecord>>;
}
