//! HTTP front-end for the driver and job planner
//!
//! Exposes assignment and verification as stateless JSON endpoints.

pub mod error;
pub mod state;
pub mod types;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use types::*;
pub use webserver_impl::WebServer;
