//! Input validation
//!
//! Turns raw records into a [`Dataset`], collecting every problem instead of
//! stopping at the first one so the caller can fix the input in one pass.

use std::collections::HashSet;

use shared::{
    process_debug, Dataset, Driver, DriverRecord, Job, JobRecord, ProcessId, RecordKind, ValidationError,
    ValidationIssue,
};

use crate::error::PlannerResult;
use crate::traits::RecordSource;

/// Read and validate both record sets from a source
pub fn load<S>(source: &S) -> PlannerResult<Dataset>
where
    S: RecordSource + ?Sized,
{
    let drivers = source.driver_records()?;
    let jobs = source.job_records()?;

    process_debug!(
        ProcessId::current(),
        "Read {} driver record(s) and {} job record(s)",
        drivers.len(),
        jobs.len()
    );

    Ok(validate(&drivers, &jobs)?)
}

/// Validate raw records; values are trimmed, blanks count as missing
pub fn validate(drivers: &[DriverRecord], jobs: &[JobRecord]) -> Result<Dataset, ValidationError> {
    let mut issues = Vec::new();

    let mut seen_drivers = HashSet::new();
    let mut valid_drivers = Vec::with_capacity(drivers.len());
    for (index, record) in drivers.iter().enumerate() {
        let Some(id) = required(&record.driver_id, RecordKind::Driver, index, "driver_id", &mut issues) else {
            continue;
        };
        if !seen_drivers.insert(id.clone()) {
            push_duplicate(&mut issues, RecordKind::Driver, &id);
            continue;
        }
        valid_drivers.push(Driver::new(id));
    }

    let mut seen_jobs = HashSet::new();
    let mut valid_jobs = Vec::with_capacity(jobs.len());
    for (index, record) in jobs.iter().enumerate() {
        let id = required(&record.job_id, RecordKind::Job, index, "job_id", &mut issues);
        let pickup = required(&record.pickup_zone, RecordKind::Job, index, "pickup_zone", &mut issues);
        let dropoff = required(&record.dropoff_zone, RecordKind::Job, index, "dropoff_zone", &mut issues);

        let Some(id) = id else { continue };
        if !seen_jobs.insert(id.clone()) {
            push_duplicate(&mut issues, RecordKind::Job, &id);
            continue;
        }
        if let (Some(pickup), Some(dropoff)) = (pickup, dropoff) {
            valid_jobs.push(Job::new(id, pickup, dropoff));
        }
    }

    if issues.is_empty() {
        Ok(Dataset::new(valid_drivers, valid_jobs))
    } else {
        Err(ValidationError::new(issues))
    }
}

fn required(
    value: &Option<String>,
    record: RecordKind,
    index: usize,
    field: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Some(trimmed.to_string()),
        _ => {
            issues.push(ValidationIssue::MissingField {
                record,
                position: index + 1,
                field: field.to_string(),
            });
            None
        }
    }
}

// One issue per duplicated id, however many times it repeats
fn push_duplicate(issues: &mut Vec<ValidationIssue>, record: RecordKind, id: &str) {
    let issue = ValidationIssue::DuplicateId {
        record,
        id: id.to_string(),
    };
    if !issues.contains(&issue) {
        issues.push(issue);
    }
}
