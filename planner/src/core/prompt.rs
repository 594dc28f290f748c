//! Instruction prompt rendering
//!
//! Produces the planning instructions a chat model would need to attempt the
//! same assignment, so its answer can be compared with `check`. Nothing here
//! calls a model.

use serde::Serialize;
use serde_json::json;
use shared::Dataset;

use crate::error::PlannerResult;

/// Default request used when the caller gives none
pub const DEFAULT_REQUEST: &str = "Assign all jobs to the available drivers.";

const TOKENS_PER_WORD: f64 = 1.3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPrompt {
    pub text: String,
    pub estimated_tokens: u32,
}

pub fn render_prompt(dataset: &Dataset, capacity: usize, request: Option<&str>) -> PlannerResult<RenderedPrompt> {
    let drivers: Vec<_> = dataset
        .drivers
        .iter()
        .map(|driver| json!({ "driver_id": driver.id }))
        .collect();
    let jobs: Vec<_> = dataset
        .jobs
        .iter()
        .map(|job| {
            json!({
                "job_id": job.id,
                "pickup_zone": job.pickup_zone,
                "dropoff_zone": job.dropoff_zone,
            })
        })
        .collect();

    let request = request.map(str::trim).filter(|r| !r.is_empty()).unwrap_or(DEFAULT_REQUEST);

    let text = format!(
        "You are a job planner system.\n\
         Always respond ONLY in valid JSON with this structure:\n\
         {{\"assignments\": [{{\"driver_id\": \"...\", \"jobs\": [{{\"job_id\": \"...\", \"pickup_zone\": \"...\", \"dropoff_zone\": \"...\"}}]}}]}}\n\
         \n\
         Rules:\n\
         1. Each job must include pickup_zone and dropoff_zone.\n\
         2. A driver's next job must have pickup_zone equal to the previous job's dropoff_zone.\n\
         3. Each driver can have at most {capacity} jobs.\n\
         4. Assign all jobs so none are left unassigned, each to exactly one driver.\n\
         \n\
         Drivers: {drivers}\n\
         Jobs: {jobs}\n\
         \n\
         User request:\n\
         {request}\n\
         \n\
         Return the assignment strictly in JSON format, nothing else.\n",
        drivers = serde_json::to_string(&drivers)?,
        jobs = serde_json::to_string(&jobs)?,
    );

    let estimated_tokens = estimate_tokens(&text);
    Ok(RenderedPrompt { text, estimated_tokens })
}

/// Rough token count from whitespace-separated words
pub fn estimate_tokens(text: &str) -> u32 {
    let words = text.split_whitespace().count() as f64;
    (words * TOKENS_PER_WORD) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Driver, Job};

    #[test]
    fn test_prompt_contains_data_and_capacity() {
        let dataset = Dataset::new(vec![Driver::new("DR-1")], vec![Job::new("J1", "z1", "z6")]);

        let prompt = render_prompt(&dataset, 2, Some("  Keep DR-1 busy  ")).unwrap();
        assert!(prompt.text.contains("at most 2 jobs"));
        assert!(prompt.text.contains(r#"Drivers: [{"driver_id":"DR-1"}]"#));
        assert!(prompt.text.contains(r#""job_id":"J1""#));
        assert!(prompt.text.contains("User request:\nKeep DR-1 busy\n"));
        assert!(prompt.estimated_tokens > 0);
    }

    #[test]
    fn test_blank_request_falls_back_to_default() {
        let prompt = render_prompt(&Dataset::default(), 3, Some("   ")).unwrap();
        assert!(prompt.text.contains(DEFAULT_REQUEST));
    }

    #[test]
    fn test_token_estimate() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("one two three four five six seven eight nine ten"), 13);
    }
}
