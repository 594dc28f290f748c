//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::errors::{SharedError, SharedResult};

static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Process identifier for any component in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// Command line planner
    Planner,
    /// HTTP front-end
    WebServer,
    /// Library use without an owning binary (tests, embedding)
    Library,
}

impl ProcessId {
    /// Initialize the global process ID for the planner CLI
    pub fn init_planner() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Planner)
    }

    /// Initialize the global process ID for the webserver
    pub fn init_webserver() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::WebServer)
    }

    /// Get the global process ID, falling back to `Library` when no binary claimed it
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Library)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Planner => write!(f, "planner"),
            ProcessId::WebServer => write!(f, "webserver"),
            ProcessId::Library => write!(f, "library"),
        }
    }
}

/// A driver able to carry a route of jobs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
}

impl Driver {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A transport job moving something from one zone to another
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub pickup_zone: String,
    pub dropoff_zone: String,
}

impl Job {
    pub fn new(id: impl Into<String>, pickup_zone: impl Into<String>, dropoff_zone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pickup_zone: pickup_zone.into(),
            dropoff_zone: dropoff_zone.into(),
        }
    }

    /// True when `next` can be driven straight after this job
    pub fn chains_into(&self, next: &Job) -> bool {
        self.dropoff_zone == next.pickup_zone
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} -> {})", self.id, self.pickup_zone, self.dropoff_zone)
    }
}

/// Validated planning input, in the order it was loaded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub drivers: Vec<Driver>,
    pub jobs: Vec<Job>,
}

impl Dataset {
    pub fn new(drivers: Vec<Driver>, jobs: Vec<Job>) -> Self {
        Self { drivers, jobs }
    }

    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }
}

/// Ordered jobs carried by one driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub driver_id: String,
    pub jobs: Vec<Job>,
}

impl Route {
    pub fn new(driver_id: impl Into<String>, jobs: Vec<Job>) -> Self {
        Self {
            driver_id: driver_id.into(),
            jobs,
        }
    }

    pub fn empty(driver_id: impl Into<String>) -> Self {
        Self::new(driver_id, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Every consecutive pair hands over in the same zone
    pub fn is_chained(&self) -> bool {
        self.jobs.windows(2).all(|pair| pair[0].chains_into(&pair[1]))
    }
}

/// One route per driver, in driver input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub routes: Vec<Route>,
}

impl Assignment {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn route_for(&self, driver_id: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.driver_id == driver_id)
    }

    pub fn job_count(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    pub fn active_drivers(&self) -> usize {
        self.routes.iter().filter(|route| !route.is_empty()).count()
    }

    /// Convert to the wire document, optionally listing drivers without jobs
    pub fn to_document(&self, include_idle_drivers: bool) -> AssignmentDocument {
        let assignments = self
            .routes
            .iter()
            .filter(|route| include_idle_drivers || !route.is_empty())
            .map(|route| DriverAssignment {
                driver_id: route.driver_id.clone(),
                jobs: route.jobs.iter().map(AssignedJob::from).collect(),
            })
            .collect();

        AssignmentDocument { assignments }
    }
}

/// Flat presentation row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    pub driver_id: String,
    pub job_id: String,
    pub pickup_zone: String,
    pub dropoff_zone: String,
}

/// Wire format: `{"assignments": [{"driver_id": .., "jobs": [..]}]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDocument {
    pub assignments: Vec<DriverAssignment>,
}

impl AssignmentDocument {
    pub fn to_json_pretty(&self) -> SharedResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SharedError::SerializationError { message: e.to_string() })
    }

    pub fn from_json(text: &str) -> SharedResult<Self> {
        serde_json::from_str(text).map_err(|e| SharedError::DeserializationError { message: e.to_string() })
    }

    /// Flatten into rows in driver-then-route order
    pub fn rows(&self) -> Vec<AssignmentRow> {
        self.assignments
            .iter()
            .flat_map(|entry| {
                entry.jobs.iter().map(move |job| AssignmentRow {
                    driver_id: entry.driver_id.clone(),
                    job_id: job.job_id.clone(),
                    pickup_zone: job.pickup_zone.clone(),
                    dropoff_zone: job.dropoff_zone.clone(),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverAssignment {
    pub driver_id: String,
    #[serde(default)]
    pub jobs: Vec<AssignedJob>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedJob {
    pub job_id: String,
    pub pickup_zone: String,
    pub dropoff_zone: String,
}

impl From<&Job> for AssignedJob {
    fn from(job: &Job) -> Self {
        Self {
            job_id: job.id.clone(),
            pickup_zone: job.pickup_zone.clone(),
            dropoff_zone: job.dropoff_zone.clone(),
        }
    }
}

/// Kind of input record, used in validation messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Driver,
    Job,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Driver => write!(f, "driver"),
            RecordKind::Job => write!(f, "job"),
        }
    }
}

/// Accepts a string or a number, so `{"driver_id": 7}` reads as `"7"`
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected a string or number, found {other}"))),
    }
}

/// Raw driver record as read from JSON or CSV
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRecord {
    #[serde(default, alias = "id", deserialize_with = "text_or_number")]
    pub driver_id: Option<String>,
}

impl DriverRecord {
    pub fn new(driver_id: impl Into<String>) -> Self {
        Self {
            driver_id: Some(driver_id.into()),
        }
    }
}

/// Raw job record as read from JSON or CSV
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default, alias = "id", deserialize_with = "text_or_number")]
    pub job_id: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub pickup_zone: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub dropoff_zone: Option<String>,
}

impl JobRecord {
    pub fn new(job_id: impl Into<String>, pickup_zone: impl Into<String>, dropoff_zone: impl Into<String>) -> Self {
        Self {
            job_id: Some(job_id.into()),
            pickup_zone: Some(pickup_zone.into()),
            dropoff_zone: Some(dropoff_zone.into()),
        }
    }
}
