//! Message types exchanged with the planner's HTTP front-end
//!
//! - `api`: request bodies and error payloads for the JSON endpoints

pub mod api;

pub use api::{AssignRequest, CheckRequest, ErrorKind, ErrorResponse};
