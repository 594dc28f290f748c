//! File-backed record source
//!
//! Reads drivers and jobs from two files. Files ending in `.csv` are parsed
//! as CSV with a header row; everything else is parsed as a JSON array.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use shared::{process_debug, DriverRecord, JobRecord, ProcessId, RecordKind, ValidationError, ValidationIssue};

use crate::error::{PlannerError, PlannerResult};
use crate::traits::RecordSource;

const DRIVER_COLUMNS: [&str; 1] = ["driver_id"];
const JOB_COLUMNS: [&str; 3] = ["job_id", "pickup_zone", "dropoff_zone"];

pub struct FileSource {
    drivers_path: PathBuf,
    jobs_path: PathBuf,
}

impl FileSource {
    pub fn new(drivers_path: impl Into<PathBuf>, jobs_path: impl Into<PathBuf>) -> Self {
        Self {
            drivers_path: drivers_path.into(),
            jobs_path: jobs_path.into(),
        }
    }
}

impl RecordSource for FileSource {
    fn driver_records(&self) -> PlannerResult<Vec<DriverRecord>> {
        read_records(&self.drivers_path, RecordKind::Driver, &DRIVER_COLUMNS)
    }

    fn job_records(&self) -> PlannerResult<Vec<JobRecord>> {
        read_records(&self.jobs_path, RecordKind::Job, &JOB_COLUMNS)
    }
}

fn read_records<T: DeserializeOwned>(path: &Path, record: RecordKind, columns: &[&str]) -> PlannerResult<Vec<T>> {
    let text = fs::read_to_string(path).map_err(|source| PlannerError::InputFile {
        path: path.to_path_buf(),
        source,
    })?;

    let records: Vec<T> = if is_csv(path) {
        parse_csv(&text, record, columns)?
    } else {
        serde_json::from_str(&text)?
    };

    process_debug!(
        ProcessId::current(),
        "Parsed {} {} record(s) from {}",
        records.len(),
        record,
        path.display()
    );
    Ok(records)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"))
}

/// `Pickup Zone` and ` pickup_zone ` both become `pickup_zone`
fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

pub(crate) fn parse_csv<T: DeserializeOwned>(text: &str, record: RecordKind, columns: &[&str]) -> PlannerResult<Vec<T>> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(text.as_bytes());

    let headers: StringRecord = reader.headers()?.iter().map(normalize_header).collect();
    let missing: Vec<ValidationIssue> = columns
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| ValidationIssue::MissingColumn {
            record,
            column: column.to_string(),
        })
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::new(missing).into());
    }
    reader.set_headers(headers);

    // Cells are read as text so ids such as `007` are not coerced into numbers
    let mut records = Vec::new();
    for row in reader.deserialize::<HashMap<String, String>>() {
        let mut row = row?;
        row.retain(|_, cell| !cell.is_empty());
        records.push(serde_json::from_value(serde_json::to_value(row)?)?);
    }
    Ok(records)
}
