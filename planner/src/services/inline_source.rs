//! In-memory record source for request bodies and tests

use shared::{Dataset, DriverRecord, JobRecord};

use crate::error::PlannerResult;
use crate::traits::RecordSource;

#[derive(Debug, Clone, Default)]
pub struct InlineSource {
    drivers: Vec<DriverRecord>,
    jobs: Vec<JobRecord>,
}

impl InlineSource {
    pub fn new(drivers: Vec<DriverRecord>, jobs: Vec<JobRecord>) -> Self {
        Self { drivers, jobs }
    }

    /// Records mirroring an already validated dataset
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            drivers: dataset.drivers.iter().map(|driver| DriverRecord::new(driver.id.clone())).collect(),
            jobs: dataset
                .jobs
                .iter()
                .map(|job| JobRecord::new(job.id.clone(), job.pickup_zone.clone(), job.dropoff_zone.clone()))
                .collect(),
        }
    }
}

impl RecordSource for InlineSource {
    fn driver_records(&self) -> PlannerResult<Vec<DriverRecord>> {
        Ok(self.drivers.clone())
    }

    fn job_records(&self) -> PlannerResult<Vec<JobRecord>> {
        Ok(self.jobs.clone())
    }
}
