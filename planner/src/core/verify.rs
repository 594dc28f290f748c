//! Assignment verification
//!
//! Checks an assignment document against the dataset it claims to cover.
//! Used by the solver on its own output and by `check` on assignments
//! produced elsewhere.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use shared::{Assignment, AssignmentDocument, Dataset};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum Violation {
    UnknownDriver { driver_id: String },
    DuplicateDriver { driver_id: String },
    UnknownJob { driver_id: String, job_id: String },
    DuplicateJob { job_id: String },
    UnassignedJob { job_id: String },
    CapacityExceeded { driver_id: String, jobs: usize, capacity: usize },
    BrokenChain { driver_id: String, from_job: String, to_job: String },
    ZoneMismatch { job_id: String, expected: String, found: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnknownDriver { driver_id } => write!(f, "unknown driver '{driver_id}'"),
            Violation::DuplicateDriver { driver_id } => write!(f, "driver '{driver_id}' is listed more than once"),
            Violation::UnknownJob { driver_id, job_id } => {
                write!(f, "driver '{driver_id}' carries unknown job '{job_id}'")
            }
            Violation::DuplicateJob { job_id } => write!(f, "job '{job_id}' is assigned more than once"),
            Violation::UnassignedJob { job_id } => write!(f, "job '{job_id}' is not assigned"),
            Violation::CapacityExceeded {
                driver_id,
                jobs,
                capacity,
            } => write!(f, "driver '{driver_id}' carries {jobs} jobs, limit is {capacity}"),
            Violation::BrokenChain {
                driver_id,
                from_job,
                to_job,
            } => write!(
                f,
                "driver '{driver_id}': job '{to_job}' does not start where job '{from_job}' ends"
            ),
            Violation::ZoneMismatch { job_id, expected, found } => {
                write!(f, "job '{job_id}' has zones {found}, expected {expected}")
            }
        }
    }
}

/// Outcome of a verification pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub violations: Vec<Violation>,
}

impl VerificationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Verify a solver assignment
pub fn verify_assignment(dataset: &Dataset, assignment: &Assignment, capacity: usize) -> VerificationReport {
    verify_document(dataset, &assignment.to_document(true), capacity)
}

/// Verify an assignment document; drivers it omits are treated as idle
pub fn verify_document(dataset: &Dataset, document: &AssignmentDocument, capacity: usize) -> VerificationReport {
    let known_drivers: HashSet<&str> = dataset.drivers.iter().map(|driver| driver.id.as_str()).collect();
    let known_jobs: HashMap<&str, (&str, &str)> = dataset
        .jobs
        .iter()
        .map(|job| (job.id.as_str(), (job.pickup_zone.as_str(), job.dropoff_zone.as_str())))
        .collect();

    let mut violations = Vec::new();
    let mut seen_drivers = HashSet::new();
    let mut seen_jobs = HashSet::new();

    for entry in &document.assignments {
        let driver_id = entry.driver_id.as_str();
        if !known_drivers.contains(driver_id) {
            violations.push(Violation::UnknownDriver {
                driver_id: driver_id.to_string(),
            });
        } else if !seen_drivers.insert(driver_id) {
            violations.push(Violation::DuplicateDriver {
                driver_id: driver_id.to_string(),
            });
        }

        if entry.jobs.len() > capacity {
            violations.push(Violation::CapacityExceeded {
                driver_id: driver_id.to_string(),
                jobs: entry.jobs.len(),
                capacity,
            });
        }

        // Chaining is judged on the dataset's zones when the job is known
        let mut previous: Option<(&str, &str)> = None;
        for job in &entry.jobs {
            let zones = match known_jobs.get(job.job_id.as_str()) {
                Some(&(pickup, dropoff)) => {
                    if pickup != job.pickup_zone || dropoff != job.dropoff_zone {
                        violations.push(Violation::ZoneMismatch {
                            job_id: job.job_id.clone(),
                            expected: format!("{pickup} -> {dropoff}"),
                            found: format!("{} -> {}", job.pickup_zone, job.dropoff_zone),
                        });
                    }
                    if !seen_jobs.insert(job.job_id.as_str()) {
                        violations.push(Violation::DuplicateJob {
                            job_id: job.job_id.clone(),
                        });
                    }
                    (pickup, dropoff)
                }
                None => {
                    violations.push(Violation::UnknownJob {
                        driver_id: driver_id.to_string(),
                        job_id: job.job_id.clone(),
                    });
                    (job.pickup_zone.as_str(), job.dropoff_zone.as_str())
                }
            };

            if let Some((from_job, from_dropoff)) = previous {
                if from_dropoff != zones.0 {
                    violations.push(Violation::BrokenChain {
                        driver_id: driver_id.to_string(),
                        from_job: from_job.to_string(),
                        to_job: job.job_id.clone(),
                    });
                }
            }
            previous = Some((job.job_id.as_str(), zones.1));
        }
    }

    for job in &dataset.jobs {
        if !seen_jobs.contains(job.id.as_str()) {
            violations.push(Violation::UnassignedJob { job_id: job.id.clone() });
        }
    }

    VerificationReport { violations }
}
