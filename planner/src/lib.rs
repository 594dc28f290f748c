//! Deterministic driver and job planner
//!
//! Loads drivers and zone-to-zone jobs, assigns every job to a driver so that
//! each route chains dropoff to pickup and stays within the per-driver
//! capacity, and renders the result. Assignments produced elsewhere can be
//! checked against the same constraints.

pub mod config;
pub mod core;
pub mod error;
pub mod planner;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use config::{OutputFormat, PlannerConfig};
pub use self::core::{CompatibilityGraph, RenderedPrompt, Solution, SolveStats, Solver, Strategy, VerificationReport, Violation};
pub use error::{PlannerError, PlannerResult};
pub use planner::{PlanOutcome, Planner};
pub use services::{FileSource, InlineSource};
pub use traits::{MockRecordSource, RecordSource};
