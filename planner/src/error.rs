//! Planner-specific error types

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use shared::{SharedError, ValidationError};

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No feasible assignment: {} job(s) cannot be placed: {}", unassigned.len(), unassigned.join(", "))]
    InfeasibleAssignment { unassigned: Vec<String> },

    #[error(
        "Search exceeded its {budget:?} budget after exploring {explored} states; \
         add drivers, raise the per-driver capacity or increase the search budget"
    )]
    SearchTimeout { budget: Duration, explored: u64 },

    #[error("Could not extract an assignment from the response: {message}")]
    Extraction { message: String },

    #[error("Configuration error: {field} = {value}")]
    ConfigurationError { field: String, value: String },

    #[error("Failed to read {}: {source}", path.display())]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Solver produced an assignment that breaks its own constraints: {message}")]
    InternalInvariant { message: String },

    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),
}

impl PlannerError {
    pub fn config(field: impl Into<String>, value: impl Into<String>) -> Self {
        PlannerError::ConfigurationError {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        PlannerError::Extraction { message: message.into() }
    }

    /// Ids the caller should look at to fix the input
    pub fn offending_ids(&self) -> Vec<String> {
        match self {
            PlannerError::Validation(error) => error.offending_ids(),
            PlannerError::InfeasibleAssignment { unassigned } => unassigned.clone(),
            _ => Vec::new(),
        }
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;
