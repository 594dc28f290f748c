//! Assignment extraction from free-form text
//!
//! Assignments produced outside the planner (by hand, by a chat model) often
//! arrive wrapped in Markdown fences or surrounded by prose. The extractor
//! recovers the JSON document from such text; the result still has to pass
//! verification before anything trusts it.

use regex::Regex;
use serde_json::Value;
use shared::{AssignmentDocument, DriverAssignment};

use crate::error::{PlannerError, PlannerResult};

pub struct ResponseExtractor {
    fence_regex: Regex,
    span_regex: Regex,
}

impl ResponseExtractor {
    pub fn new() -> PlannerResult<Self> {
        Ok(Self {
            // Opening fence with optional language tag, or a closing fence
            fence_regex: Regex::new(r"(?m)^\s*```[A-Za-z]*\s*$")?,
            // Widest object or array span
            span_regex: Regex::new(r"\{[\s\S]*\}|\[[\s\S]*\]")?,
        })
    }

    /// Pull an assignment document out of `text`
    pub fn extract(&self, text: &str) -> PlannerResult<AssignmentDocument> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PlannerError::extraction("response is empty"));
        }

        let cleaned = self.fence_regex.replace_all(trimmed, "");
        let value = match serde_json::from_str::<Value>(cleaned.trim()) {
            Ok(value) => value,
            Err(_) => {
                let span = self
                    .span_regex
                    .find(&cleaned)
                    .ok_or_else(|| PlannerError::extraction("no JSON object or array found"))?;
                serde_json::from_str::<Value>(span.as_str())
                    .map_err(|error| PlannerError::extraction(format!("invalid JSON: {error}")))?
            }
        };

        Self::document_from_value(value)
    }

    fn document_from_value(value: Value) -> PlannerResult<AssignmentDocument> {
        match value {
            Value::Object(mut object) => {
                let assignments = object
                    .remove("assignments")
                    .ok_or_else(|| PlannerError::extraction("JSON object has no 'assignments' list"))?;
                Self::entries(assignments)
            }
            array @ Value::Array(_) => Self::entries(array),
            _ => Err(PlannerError::extraction("expected a JSON object or array")),
        }
    }

    fn entries(value: Value) -> PlannerResult<AssignmentDocument> {
        let assignments: Vec<DriverAssignment> = serde_json::from_value(value)
            .map_err(|error| PlannerError::extraction(format!("malformed assignment entries: {error}")))?;
        Ok(AssignmentDocument { assignments })
    }
}
