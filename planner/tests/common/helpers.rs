//! Test helpers and builder patterns for planner tests

use std::collections::HashSet;

use planner::{MockRecordSource, Planner, PlannerConfig};
use shared::{Assignment, Dataset, DriverRecord, JobRecord};

use super::fixtures::TestFixtures;

/// Builds a planner over a mocked record source
pub struct PlannerBuilder {
    drivers: Vec<DriverRecord>,
    jobs: Vec<JobRecord>,
    config: PlannerConfig,
}

impl PlannerBuilder {
    pub fn new() -> Self {
        Self {
            drivers: Vec::new(),
            jobs: Vec::new(),
            config: PlannerConfig::default(),
        }
    }

    pub fn with_dataset(mut self, dataset: &Dataset) -> Self {
        self.drivers = TestFixtures::driver_records(dataset);
        self.jobs = TestFixtures::job_records(dataset);
        self
    }

    pub fn with_driver_records(mut self, drivers: Vec<DriverRecord>) -> Self {
        self.drivers = drivers;
        self
    }

    pub fn with_job_records(mut self, jobs: Vec<JobRecord>) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_max_jobs(mut self, max_jobs: usize) -> Self {
        self.config = self.config.with_max_jobs_per_driver(max_jobs).unwrap();
        self
    }

    pub fn with_budget_ms(mut self, budget_ms: u64) -> Self {
        self.config = self.config.with_search_budget_ms(budget_ms);
        self
    }

    pub fn build(self) -> Planner<MockRecordSource> {
        let mut source = MockRecordSource::new();
        let drivers = self.drivers;
        let jobs = self.jobs;
        source
            .expect_driver_records()
            .returning(move || Ok(drivers.clone()))
            .times(0..);
        source
            .expect_job_records()
            .returning(move || Ok(jobs.clone()))
            .times(0..);

        Planner::new(source, self.config)
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TestHelpers;

impl TestHelpers {
    /// Job ids carried by `driver_id`, in route order
    pub fn route_ids(assignment: &Assignment, driver_id: &str) -> Vec<String> {
        assignment
            .route_for(driver_id)
            .map(|route| route.jobs.iter().map(|job| job.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Every job exactly once, every route chained and within capacity
    pub fn assert_feasible(dataset: &Dataset, assignment: &Assignment, capacity: usize) {
        assert_eq!(assignment.routes.len(), dataset.drivers.len(), "one route per driver");

        let mut seen = HashSet::new();
        for (route, driver) in assignment.routes.iter().zip(&dataset.drivers) {
            assert_eq!(route.driver_id, driver.id, "routes follow driver input order");
            assert!(route.len() <= capacity, "route for {} exceeds capacity", route.driver_id);
            assert!(route.is_chained(), "route for {} is not chained", route.driver_id);
            for job in &route.jobs {
                assert!(seen.insert(job.id.clone()), "job {} assigned twice", job.id);
                assert_eq!(dataset.job(&job.id), Some(job), "job {} differs from input", job.id);
            }
        }
        assert_eq!(seen.len(), dataset.jobs.len(), "every job assigned");
    }

    /// Brute-force feasibility for small instances
    pub fn feasible_by_enumeration(dataset: &Dataset, capacity: usize) -> bool {
        fn chainable(jobs: &[&shared::Job], used: &mut Vec<bool>, last: Option<&shared::Job>, placed: usize) -> bool {
            if placed == jobs.len() {
                return true;
            }
            for index in 0..jobs.len() {
                if used[index] || last.is_some_and(|previous| !previous.chains_into(jobs[index])) {
                    continue;
                }
                used[index] = true;
                if chainable(jobs, used, Some(jobs[index]), placed + 1) {
                    used[index] = false;
                    return true;
                }
                used[index] = false;
            }
            false
        }

        fn place(dataset: &Dataset, capacity: usize, next: usize, groups: &mut Vec<Vec<usize>>) -> bool {
            if next == dataset.jobs.len() {
                return groups.iter().all(|group| {
                    let jobs: Vec<&shared::Job> = group.iter().map(|&i| &dataset.jobs[i]).collect();
                    chainable(&jobs, &mut vec![false; jobs.len()], None, 0)
                });
            }
            for group in 0..groups.len() {
                if groups[group].len() < capacity {
                    groups[group].push(next);
                    if place(dataset, capacity, next + 1, groups) {
                        return true;
                    }
                    groups[group].pop();
                }
            }
            if groups.len() < dataset.drivers.len() {
                groups.push(vec![next]);
                if place(dataset, capacity, next + 1, groups) {
                    return true;
                }
                groups.pop();
            }
            false
        }

        place(dataset, capacity, 0, &mut Vec::new())
    }

    /// Small deterministic pseudo-random generator for instance sweeps
    pub fn lcg(state: &mut u64) -> u64 {
        *state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        *state >> 33
    }
}
