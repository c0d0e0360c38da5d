//! Lifecycle watch loop
//!
//! One loop per accepted submission, running in its own detached task until
//! the job reaches a terminal phase. Cleanup is bound to loop entry through
//! a drop guard, so no exit path (terminal classification, task abort, or a
//! future phase nobody thought about) can skip it.

use std::time::Duration;
use tokio::time;
use tracing::{info, warn};

use crate::supervisor::cleanup::CleanupGuard;
use runlet_client::OrchestratorClient;
use runlet_core::job::JobRef;
use runlet_core::phase::JobPhase;

/// Polls a submitted job until it succeeds or fails, then cleans it up.
///
/// Each tick re-fetches the job by (name, namespace) and classifies the
/// reported counters. A failed status fetch classifies as `Unknown` and is
/// never promoted to a terminal failure: an orchestrator outage while
/// polling does not itself fail the job.
pub async fn watch_job(client: OrchestratorClient, job: JobRef, poll_interval: Duration) {
    let _cleanup = CleanupGuard::new(client.clone(), job.clone());

    let mut ticker = time::interval(poll_interval);

    loop {
        ticker.tick().await;

        let phase = match client.get_job(&job.namespace, &job.name).await {
            Ok(current) => JobPhase::classify(&current.status),
            Err(e) => {
                warn!(job = %job, error = %e, "failed to fetch job status");
                JobPhase::Unknown
            }
        };

        match phase {
            JobPhase::Active => info!(job = %job, "active"),
            JobPhase::Succeeded => {
                info!(job = %job, "finished");
                break;
            }
            JobPhase::Failed => {
                warn!(job = %job, "failed");
                break;
            }
            JobPhase::Unknown => info!(job = %job, "status not recognized yet"),
        }
    }
}
