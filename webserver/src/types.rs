//! Response bodies for the HTTP API

use planner::{Solution, Strategy, VerificationReport, Violation};
use serde::{Deserialize, Serialize};
use shared::{AssignmentDocument, AssignmentRow, DriverAssignment};

/// Body of a successful `POST /api/assign`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignResponse {
    pub assignments: Vec<DriverAssignment>,
    pub rows: Vec<AssignmentRow>,
    pub stats: AssignStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignStats {
    pub strategy: Strategy,
    pub explored: u64,
    pub elapsed_ms: u64,
}

impl AssignResponse {
    pub fn from_solution(solution: &Solution, include_idle_drivers: bool) -> Self {
        let document = solution.assignment.to_document(include_idle_drivers);
        let rows = document.rows();
        Self {
            assignments: document.assignments,
            rows,
            stats: AssignStats {
                strategy: solution.stats.strategy,
                explored: solution.stats.explored,
                elapsed_ms: u64::try_from(solution.stats.elapsed.as_millis()).unwrap_or(u64::MAX),
            },
        }
    }

    /// The wire document without rows or stats
    pub fn document(&self) -> AssignmentDocument {
        AssignmentDocument {
            assignments: self.assignments.clone(),
        }
    }
}

/// Body of `POST /api/check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub valid: bool,
    pub violations: Vec<Violation>,
}

impl From<VerificationReport> for CheckResponse {
    fn from(report: VerificationReport) -> Self {
        Self {
            valid: report.is_valid(),
            violations: report.violations,
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub requests_served: u64,
    pub server_time: i64,
}
