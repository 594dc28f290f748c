//! Shared types for the driver job planner
//!
//! Domain model (drivers, jobs, routes, assignments), the validation error
//! taxonomy, logging helpers and the HTTP request messages used by both the
//! `planner` library and the `webserver` front-end.

pub mod types;
pub mod errors;
pub mod logging;
pub mod messages;

pub use types::*;
pub use errors::*;

pub use messages::{AssignRequest, CheckRequest, ErrorKind, ErrorResponse};
