//! REST API handlers
//!
//! Each request is planned in isolation on the blocking pool; handlers only
//! translate between JSON bodies and the planner.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use chrono::Utc;
use planner::{InlineSource, Planner, PlannerResult};
use shared::{process_debug, process_info, AssignRequest, CheckRequest, ProcessId};
use uuid::Uuid;

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::types::{AssignResponse, CheckResponse, HealthResponse};

/// Assign jobs - POST /api/assign
pub async fn assign(
    State(state): State<Arc<WebServerState>>,
    body: Result<Json<AssignRequest>, JsonRejection>,
) -> WebServerResult<Json<AssignResponse>> {
    let Json(request) = body.map_err(|rejection| WebServerError::invalid_request(rejection.body_text()))?;
    let request_id = Uuid::new_v4();
    state.record_request();

    let config = state.config_for(
        request.max_jobs_per_driver,
        request.search_budget_ms,
        request.include_idle_drivers,
    )?;
    process_debug!(
        ProcessId::current(),
        "[{}] assign: {} driver(s), {} job(s)",
        request_id,
        request.drivers.len(),
        request.jobs.len()
    );

    let include_idle = config.include_idle_drivers;
    let source = InlineSource::new(request.drivers, request.jobs);
    let outcome = run_blocking(move || Planner::new(source, config).assign()).await?;

    process_info!(
        ProcessId::current(),
        "[{}] assigned {} job(s) via {}",
        request_id,
        outcome.dataset.jobs.len(),
        outcome.solution.stats.strategy
    );
    Ok(Json(AssignResponse::from_solution(&outcome.solution, include_idle)))
}

/// Verify an external assignment - POST /api/check
pub async fn check(
    State(state): State<Arc<WebServerState>>,
    body: Result<Json<CheckRequest>, JsonRejection>,
) -> WebServerResult<Json<CheckResponse>> {
    let Json(request) = body.map_err(|rejection| WebServerError::invalid_request(rejection.body_text()))?;
    let request_id = Uuid::new_v4();
    state.record_request();

    let config = state.config_for(request.max_jobs_per_driver, None, None)?;
    let source = InlineSource::new(request.drivers, request.jobs);
    let response = request.response;
    let report = run_blocking(move || Planner::new(source, config).check(&response)).await?;

    process_info!(
        ProcessId::current(),
        "[{}] check: {} violation(s)",
        request_id,
        report.violations.len()
    );
    Ok(Json(CheckResponse::from(report)))
}

/// Health check - GET /health
pub async fn health(State(state): State<Arc<WebServerState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        requests_served: state.requests_served(),
        server_time: Utc::now().timestamp(),
    })
}

async fn run_blocking<T, F>(work: F) -> WebServerResult<T>
where
    F: FnOnce() -> PlannerResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|error| WebServerError::TaskFailed(error.to_string()))?
        .map_err(WebServerError::from)
}
