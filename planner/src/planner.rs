//! Planner facade
//!
//! Ties a record source to the pure core: load and validate, solve, render.
//! Every call is independent; nothing is cached between runs.

use shared::{logging, process_debug, process_info, Dataset, ProcessId};

use crate::config::PlannerConfig;
use crate::core::extract::ResponseExtractor;
use crate::core::prompt::{render_prompt, RenderedPrompt};
use crate::core::solver::{Solution, Solver};
use crate::core::verify::{verify_document, VerificationReport};
use crate::core::{loader, presenter};
use crate::error::PlannerResult;
use crate::traits::RecordSource;

/// Result of a successful `assign` run
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub dataset: Dataset,
    pub solution: Solution,
}

/// Planner over an injected record source
pub struct Planner<S>
where
    S: RecordSource,
{
    source: S,
    config: PlannerConfig,
}

impl<S> Planner<S>
where
    S: RecordSource,
{
    pub fn new(source: S, config: PlannerConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn solver(&self) -> Solver {
        Solver::new(self.config.max_jobs_per_driver, self.config.search_budget)
    }

    /// Read and validate the input
    pub fn load(&self) -> PlannerResult<Dataset> {
        loader::load(&self.source)
    }

    /// Load, then assign every job
    pub fn assign(&self) -> PlannerResult<PlanOutcome> {
        let dataset = self.load()?;
        logging::log_progress(
            ProcessId::current(),
            "Planning",
            &format!(
                "{} job(s) across {} driver(s), at most {} per driver",
                dataset.jobs.len(),
                dataset.drivers.len(),
                self.config.max_jobs_per_driver
            ),
        );

        let solution = self.solver().solve(&dataset)?;
        Ok(PlanOutcome { dataset, solution })
    }

    /// Render an outcome in the configured format
    pub fn render(&self, outcome: &PlanOutcome) -> PlannerResult<String> {
        presenter::render(
            &outcome.solution.assignment,
            self.config.output_format,
            self.config.include_idle_drivers,
        )
    }

    /// Verify an assignment produced elsewhere against the loaded input
    pub fn check(&self, response: &str) -> PlannerResult<VerificationReport> {
        let dataset = self.load()?;
        let document = ResponseExtractor::new()?.extract(response)?;
        process_debug!(
            ProcessId::current(),
            "Extracted {} driver entr(ies) from response",
            document.assignments.len()
        );

        let report = verify_document(&dataset, &document, self.config.max_jobs_per_driver);
        if report.is_valid() {
            process_info!(ProcessId::current(), "Assignment satisfies every constraint");
        } else {
            process_info!(
                ProcessId::current(),
                "Assignment has {} violation(s)",
                report.violations.len()
            );
        }
        Ok(report)
    }

    /// Instruction prompt for the loaded input
    pub fn prompt(&self, request: Option<&str>) -> PlannerResult<RenderedPrompt> {
        let dataset = self.load()?;
        render_prompt(&dataset, self.config.max_jobs_per_driver, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::PlannerError;
    use crate::services::InlineSource;
    use shared::{DriverRecord, JobRecord};

    fn source() -> InlineSource {
        InlineSource::new(
            vec![DriverRecord::new("DR-1"), DriverRecord::new("DR-2")],
            vec![
                JobRecord::new("J1", "z1", "z6"),
                JobRecord::new("J2", "z6", "z9"),
                JobRecord::new("J3", "z2", "z4"),
            ],
        )
    }

    #[test]
    fn test_assign_and_render_csv() {
        let config = PlannerConfig::default().with_output_format(OutputFormat::Csv);
        let planner = Planner::new(source(), config);

        let outcome = planner.assign().unwrap();
        assert_eq!(
            planner.render(&outcome).unwrap(),
            "driver_id,job_id,pickup_zone,dropoff_zone\nDR-1,J1,z1,z6\nDR-1,J2,z6,z9\nDR-2,J3,z2,z4\n"
        );
    }

    #[test]
    fn test_check_flags_broken_response() {
        let planner = Planner::new(source(), PlannerConfig::default());

        let report = planner
            .check(r#"{"assignments": [{"driver_id": "DR-1", "jobs": [{"job_id": "J1", "pickup_zone": "z1", "dropoff_zone": "z6"}]}]}"#)
            .unwrap();
        assert!(!report.is_valid());
        assert_eq!(report.violations.len(), 2);
    }

    #[test]
    fn test_check_rejects_text_without_json() {
        let planner = Planner::new(source(), PlannerConfig::default());
        assert!(matches!(
            planner.check("I could not find an assignment."),
            Err(PlannerError::Extraction { .. })
        ));
    }

    #[test]
    fn test_prompt_uses_configured_capacity() {
        let config = PlannerConfig::default().with_max_jobs_per_driver(2).unwrap();
        let prompt = Planner::new(source(), config).prompt(None).unwrap();
        assert!(prompt.text.contains("at most 2 jobs"));
    }
}
