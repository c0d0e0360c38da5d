//! API Module
//!
//! HTTP layer for the server. Each submodule handles one concern.

pub mod auth;
pub mod health;
pub mod jobs;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::supervisor::Supervisor;
use runlet_client::OrchestratorClient;

/// Shared state handed to every handler
pub struct AppState {
    pub client: OrchestratorClient,
    pub supervisor: Supervisor,
    /// Basic-auth credentials; `None` disables authentication
    pub auth: Option<(String, String)>,
}

/// Create the main router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(health::home))
        .route("/v1/ping", get(health::ping))
        .route("/v1/jobs", post(jobs::submit_job));

    if state.auth.is_some() {
        router = router.layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::require_basic_auth,
        ));
    }

    router.with_state(state).layer(TraceLayer::new_for_http())
}
