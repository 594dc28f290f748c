//! Main webserver implementation

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use shared::{logging, process_info, ProcessId};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::web::handlers::api;

/// Stateless HTTP front-end for the planner
#[derive(Clone)]
pub struct WebServer {
    state: Arc<WebServerState>,
}

impl WebServer {
    pub fn new(state: WebServerState) -> Self {
        Self { state: Arc::new(state) }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // API routes
            .route("/api/assign", post(api::assign))
            .route("/api/check", post(api::check))
            // Health check
            .route("/health", get(api::health))
            .layer(
                ServiceBuilder::new()
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.state.clone())
    }

    /// Serve until ctrl-c
    pub async fn run(&self, bind_address: SocketAddr) -> WebServerResult<()> {
        let listener = tokio::net::TcpListener::bind(bind_address)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {bind_address}: {e}")))?;

        process_info!(ProcessId::current(), "🌐 Planner API listening on http://{}", bind_address);

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                logging::log_shutdown(ProcessId::current(), "ctrl-c received");
            })
            .await?;

        Ok(())
    }

    pub fn state(&self) -> &Arc<WebServerState> {
        &self.state
    }
}
