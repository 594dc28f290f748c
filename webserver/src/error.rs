//! WebServer-specific error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use planner::PlannerError;
use shared::{process_error, process_warn, ErrorKind, ErrorResponse, ProcessId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error("Invalid request format: {details}")]
    InvalidRequest { details: String },

    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Planning task failed: {0}")]
    TaskFailed(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WebServerError {
    pub fn invalid_request(details: impl Into<String>) -> Self {
        WebServerError::InvalidRequest { details: details.into() }
    }

    /// Status code and error category for the response
    pub fn classify(&self) -> (StatusCode, ErrorKind) {
        match self {
            WebServerError::Planner(error) => match error {
                PlannerError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, ErrorKind::Validation),
                PlannerError::InfeasibleAssignment { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, ErrorKind::InfeasibleAssignment)
                }
                PlannerError::SearchTimeout { .. } => (StatusCode::REQUEST_TIMEOUT, ErrorKind::SearchTimeout),
                PlannerError::Extraction { .. } => (StatusCode::UNPROCESSABLE_ENTITY, ErrorKind::Extraction),
                PlannerError::ConfigurationError { .. } => (StatusCode::BAD_REQUEST, ErrorKind::Configuration),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::Internal),
            },
            WebServerError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, ErrorKind::Validation),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::Internal),
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        let (_, kind) = self.classify();
        let ids = match self {
            WebServerError::Planner(error) => error.offending_ids(),
            _ => Vec::new(),
        };
        ErrorResponse::new(kind, self.to_string()).with_ids(ids)
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let (status, _) = self.classify();
        if status.is_server_error() {
            process_error!(ProcessId::current(), "Request failed with {}: {}", status, self);
        } else {
            process_warn!(ProcessId::current(), "Request failed with {}: {}", status, self);
        }
        (status, Json(self.to_error_response())).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
