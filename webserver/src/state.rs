//! Webserver state
//!
//! Holds only the configuration defaults and counters; planning requests
//! share nothing with each other.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use planner::{PlannerConfig, PlannerResult};

#[derive(Debug)]
pub struct WebServerState {
    /// Defaults applied before per-request overrides
    pub defaults: PlannerConfig,
    pub server_start_time: Instant,
    requests_served: AtomicU64,
}

impl WebServerState {
    pub fn new(defaults: PlannerConfig) -> Self {
        Self {
            defaults,
            server_start_time: Instant::now(),
            requests_served: AtomicU64::new(0),
        }
    }

    /// Defaults with the request's overrides applied
    pub fn config_for(
        &self,
        max_jobs_per_driver: Option<usize>,
        search_budget_ms: Option<u64>,
        include_idle_drivers: Option<bool>,
    ) -> PlannerResult<PlannerConfig> {
        let mut config = self.defaults.clone();
        if let Some(max_jobs) = max_jobs_per_driver {
            config = config.with_max_jobs_per_driver(max_jobs)?;
        }
        if let Some(budget_ms) = search_budget_ms {
            config = config.with_search_budget_ms(budget_ms);
        }
        if let Some(include) = include_idle_drivers {
            config = config.with_include_idle_drivers(include);
        }
        Ok(config)
    }

    pub fn record_request(&self) -> u64 {
        self.requests_served.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }
}

impl Default for WebServerState {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_request_overrides() {
        let state = WebServerState::default();

        let config = state.config_for(Some(2), Some(0), Some(false)).unwrap();
        assert_eq!(config.max_jobs_per_driver, 2);
        assert_eq!(config.search_budget, None);
        assert!(!config.include_idle_drivers);

        let config = state.config_for(None, None, None).unwrap();
        assert_eq!(config.search_budget, Some(Duration::from_secs(5)));

        assert!(state.config_for(Some(0), None, None).is_err());
    }

    #[test]
    fn test_request_counter() {
        let state = WebServerState::default();
        assert_eq!(state.record_request(), 1);
        assert_eq!(state.record_request(), 2);
        assert_eq!(state.requests_served(), 2);
    }
}
