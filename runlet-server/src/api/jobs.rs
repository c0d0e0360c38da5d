//! Job submission handler

use axum::extract::State;
use std::sync::Arc;

use crate::api::AppState;
use runlet_core::job::JobManifest;

/// POST /v1/jobs
/// Decodes a job manifest and hands it to the supervisor.
///
/// The response only acknowledges the submission attempt with a plain-text
/// line; tracking and cleanup run in a detached task and are visible through
/// logs alone. A rejected submission is reported the same best-effort way.
pub async fn submit_job(State(state): State<Arc<AppState>>, body: String) -> String {
    let manifest: JobManifest = match serde_json::from_str(&body) {
        Ok(manifest) => manifest,
        Err(_) => return "failed to parse request body\n".to_string(),
    };

    match state.supervisor.submit(manifest).await {
        Ok(job) => format!("created {job}\n"),
        Err(_) => "failed to create job\n".to_string(),
    }
}
