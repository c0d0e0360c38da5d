//! Health check handlers

use axum::extract::State;
use std::sync::Arc;
use tracing::warn;

use crate::api::AppState;

/// GET /
/// Plain-text banner
pub async fn home() -> &'static str {
    "runlet is running\n"
}

/// GET /v1/ping
/// Verifies connectivity to the orchestrator by counting pods across all
/// namespaces. Best-effort: failures are reported in the body, not as an
/// error status.
pub async fn ping(State(state): State<Arc<AppState>>) -> String {
    match state.client.list_pods(None).await {
        Ok(pods) => format!("{} pods running\n", pods.items.len()),
        Err(e) => {
            warn!(error = %e, "orchestrator ping failed");
            "can't talk to the cluster\n".to_string()
        }
    }
}
