//! Test fixtures and data for planner tests

use shared::{Dataset, Driver, DriverRecord, Job, JobRecord};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const DRIVER_1: &'static str = "DR-1";
    pub const DRIVER_2: &'static str = "DR-2";
    pub const DRIVER_3: &'static str = "DR-3";

    pub const DRIVERS_JSON: &'static str = r#"[{"driver_id": "DR-1"}, {"driver_id": "DR-2"}]"#;
    pub const JOBS_JSON: &'static str = r#"[
        {"job_id": "J1", "pickup_zone": "z1", "dropoff_zone": "z6"},
        {"job_id": "J2", "pickup_zone": "z6", "dropoff_zone": "z9"},
        {"job_id": "J3", "pickup_zone": "z2", "dropoff_zone": "z4"}
    ]"#;

    pub const DRIVERS_CSV: &'static str = "Driver ID\nDR-1\nDR-2\n";
    pub const JOBS_CSV: &'static str = "Job ID,Pickup Zone,Dropoff Zone\nJ1,z1,z6\nJ2,z6,z9\nJ3,z2,z4\n";

    /// J1 and J2 chain through z6, J3 stands alone
    pub fn chained_pair() -> Dataset {
        Dataset::new(
            vec![Driver::new(Self::DRIVER_1), Driver::new(Self::DRIVER_2)],
            vec![
                Job::new("J1", "z1", "z6"),
                Job::new("J2", "z6", "z9"),
                Job::new("J3", "z2", "z4"),
            ],
        )
    }

    /// `count` jobs with pairwise distinct zones
    pub fn unchainable_jobs(count: usize) -> Vec<Job> {
        (1..=count)
            .map(|n| Job::new(format!("J{n}"), format!("a{n}"), format!("b{n}")))
            .collect()
    }

    /// Longest-first packing strands E and F; A-B plus E-C-F covers everything
    pub fn greedy_hostile() -> Dataset {
        Dataset::new(
            vec![Driver::new(Self::DRIVER_1), Driver::new(Self::DRIVER_2)],
            vec![
                Job::new("A", "z1", "z2"),
                Job::new("B", "z2", "z3"),
                Job::new("C", "z3", "z4"),
                Job::new("E", "z5", "z3"),
                Job::new("F", "z4", "z6"),
            ],
        )
    }

    /// One straight line of `count` jobs z0 -> z1 -> ... -> z{count}
    pub fn line(count: usize) -> Vec<Job> {
        (0..count)
            .map(|n| Job::new(format!("L{n:02}"), format!("z{n}"), format!("z{}", n + 1)))
            .collect()
    }

    pub fn drivers(count: usize) -> Vec<Driver> {
        (1..=count).map(|n| Driver::new(format!("DR-{n}"))).collect()
    }

    pub fn driver_records(dataset: &Dataset) -> Vec<DriverRecord> {
        dataset.drivers.iter().map(|driver| DriverRecord::new(driver.id.clone())).collect()
    }

    pub fn job_records(dataset: &Dataset) -> Vec<JobRecord> {
        dataset
            .jobs
            .iter()
            .map(|job| JobRecord::new(job.id.clone(), job.pickup_zone.clone(), job.dropoff_zone.clone()))
            .collect()
    }
}
