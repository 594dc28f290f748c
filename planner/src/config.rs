//! Planner configuration
//!
//! Defaults, then environment (`PLANNER_*`, optionally from a `.env` file),
//! then explicit overrides from the command line or request body.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

pub const DEFAULT_MAX_JOBS_PER_DRIVER: usize = 3;
pub const DEFAULT_SEARCH_BUDGET: Duration = Duration::from_secs(5);

pub const ENV_MAX_JOBS_PER_DRIVER: &str = "PLANNER_MAX_JOBS_PER_DRIVER";
pub const ENV_SEARCH_BUDGET_MS: &str = "PLANNER_SEARCH_BUDGET_MS";
pub const ENV_INCLUDE_IDLE: &str = "PLANNER_INCLUDE_IDLE";
pub const ENV_OUTPUT_FORMAT: &str = "PLANNER_OUTPUT_FORMAT";

/// How results are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(PlannerError::config(ENV_OUTPUT_FORMAT, s)),
        }
    }
}

/// Settings for one planning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Route capacity per driver
    pub max_jobs_per_driver: usize,
    /// Wall-clock budget for the backtracking search; `None` is unlimited
    pub search_budget: Option<Duration>,
    /// List drivers without jobs in rendered output
    pub include_idle_drivers: bool,
    pub output_format: OutputFormat,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_jobs_per_driver: DEFAULT_MAX_JOBS_PER_DRIVER,
            search_budget: Some(DEFAULT_SEARCH_BUDGET),
            include_idle_drivers: true,
            output_format: OutputFormat::Table,
        }
    }
}

impl PlannerConfig {
    /// Load from process environment on top of the defaults
    pub fn from_env() -> PlannerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup on top of the defaults
    pub fn from_lookup<F>(lookup: F) -> PlannerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_MAX_JOBS_PER_DRIVER) {
            let parsed = value
                .trim()
                .parse::<usize>()
                .map_err(|_| PlannerError::config(ENV_MAX_JOBS_PER_DRIVER, &value))?;
            config = config.with_max_jobs_per_driver(parsed)?;
        }

        if let Some(value) = lookup(ENV_SEARCH_BUDGET_MS) {
            let parsed = value
                .trim()
                .parse::<u64>()
                .map_err(|_| PlannerError::config(ENV_SEARCH_BUDGET_MS, &value))?;
            config = config.with_search_budget_ms(parsed);
        }

        if let Some(value) = lookup(ENV_INCLUDE_IDLE) {
            let parsed = parse_flag(&value).ok_or_else(|| PlannerError::config(ENV_INCLUDE_IDLE, &value))?;
            config = config.with_include_idle_drivers(parsed);
        }

        if let Some(value) = lookup(ENV_OUTPUT_FORMAT) {
            config = config.with_output_format(value.parse()?);
        }

        Ok(config)
    }

    pub fn with_max_jobs_per_driver(mut self, max_jobs: usize) -> PlannerResult<Self> {
        if max_jobs == 0 {
            return Err(PlannerError::config("max_jobs_per_driver", "0"));
        }
        self.max_jobs_per_driver = max_jobs;
        Ok(self)
    }

    /// Set the search budget in milliseconds, 0 meaning unlimited
    pub fn with_search_budget_ms(mut self, budget_ms: u64) -> Self {
        self.search_budget = match budget_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };
        self
    }

    pub fn with_include_idle_drivers(mut self, include: bool) -> Self {
        self.include_idle_drivers = include;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
