//! Shared error types for the job planner

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::types::RecordKind;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Serialization failed: {message}")]
    SerializationError { message: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },
}

pub type SharedResult<T> = Result<T, SharedError>;

/// A single problem found in the input records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Required field absent or blank; `position` is 1-based within its file
    MissingField {
        record: RecordKind,
        position: usize,
        field: String,
    },
    /// Identifier used by more than one record
    DuplicateId { record: RecordKind, id: String },
    /// Tabular input lacks a required column
    MissingColumn { record: RecordKind, column: String },
}

impl ValidationIssue {
    /// Identifier the issue is about, if it names one
    pub fn offending_id(&self) -> Option<&str> {
        match self {
            ValidationIssue::DuplicateId { id, .. } => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingField { record, position, field } => {
                write!(f, "{record} #{position} is missing '{field}'")
            }
            ValidationIssue::DuplicateId { record, id } => write!(f, "duplicate {record} id '{id}'"),
            ValidationIssue::MissingColumn { record, column } => {
                write!(f, "{record} data must contain a '{column}' column")
            }
        }
    }
}

/// Input rejected before solving; carries every issue found
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid input: {}", summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// Ids named by the issues, for callers that want to highlight records
    pub fn offending_ids(&self) -> Vec<String> {
        self.issues
            .iter()
            .filter_map(|issue| issue.offending_id().map(str::to_string))
            .collect()
    }
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message_lists_all_issues() {
        let error = ValidationError::new(vec![
            ValidationIssue::MissingField {
                record: RecordKind::Job,
                position: 2,
                field: "pickup_zone".to_string(),
            },
            ValidationIssue::DuplicateId {
                record: RecordKind::Driver,
                id: "DR-1".to_string(),
            },
        ]);

        let message = error.to_string();
        assert!(message.contains("job #2 is missing 'pickup_zone'"));
        assert!(message.contains("duplicate driver id 'DR-1'"));
        assert_eq!(error.offending_ids(), vec!["DR-1".to_string()]);
    }
}
