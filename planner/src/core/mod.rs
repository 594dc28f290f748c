//! Core planning logic
//!
//! Pure functions and data structures with no I/O. Everything here is
//! deterministic for a given input.

pub mod extract;
pub mod graph;
pub mod loader;
pub mod presenter;
pub mod prompt;
pub mod solver;
pub mod verify;

pub use extract::ResponseExtractor;
pub use graph::CompatibilityGraph;
pub use prompt::RenderedPrompt;
pub use solver::{Solution, SolveStats, Solver, Strategy};
pub use verify::{VerificationReport, Violation};
