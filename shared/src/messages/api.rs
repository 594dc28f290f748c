//! HTTP client ↔ WebServer request messages
//!
//! Response bodies that embed planner results live in the webserver crate.

use serde::{Deserialize, Serialize};

use crate::types::{DriverRecord, JobRecord};

/// Body of `POST /api/assign`
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AssignRequest {
    pub drivers: Vec<DriverRecord>,
    pub jobs: Vec<JobRecord>,
    /// List drivers that end up without jobs (defaults to the server setting)
    #[serde(default)]
    pub include_idle_drivers: Option<bool>,
    #[serde(default)]
    pub max_jobs_per_driver: Option<usize>,
    /// Search budget in milliseconds, 0 for unlimited
    #[serde(default)]
    pub search_budget_ms: Option<u64>,
}

/// Body of `POST /api/check`
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CheckRequest {
    pub drivers: Vec<DriverRecord>,
    pub jobs: Vec<JobRecord>,
    /// Raw text holding an assignment produced elsewhere
    pub response: String,
    #[serde(default)]
    pub max_jobs_per_driver: Option<usize>,
}

/// Error category reported to HTTP clients
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    InfeasibleAssignment,
    SearchTimeout,
    Extraction,
    Configuration,
    Internal,
}

/// Error body returned by every endpoint
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: ErrorKind,
    pub message: String,
    /// Offending ids (duplicate records, unassignable jobs)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub job_ids: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
            job_ids: Vec::new(),
        }
    }

    pub fn with_ids(mut self, ids: Vec<String>) -> Self {
        self.job_ids = ids;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_request_optional_fields() {
        let request: AssignRequest = serde_json::from_str(
            r#"{"drivers": [{"driver_id": "DR-1"}], "jobs": [{"job_id": "J1", "pickup_zone": "z1", "dropoff_zone": "z2"}]}"#,
        )
        .unwrap();

        assert_eq!(request.drivers.len(), 1);
        assert_eq!(request.include_idle_drivers, None);
        assert_eq!(request.search_budget_ms, None);
    }

    #[test]
    fn test_error_response_omits_empty_ids() {
        let body = serde_json::to_value(ErrorResponse::new(ErrorKind::SearchTimeout, "too slow")).unwrap();
        assert_eq!(body["error"], "search_timeout");
        assert!(body.get("job_ids").is_none());
    }
}
