//! Guaranteed job cleanup
//!
//! Deletion is best effort: a failure is logged and the resource may leak,
//! but the attempt itself happens exactly once per watched job.

use tracing::{error, info};

use runlet_client::OrchestratorClient;
use runlet_core::job::{DeleteOptions, JobRef};

/// Deletes the watched job when dropped.
///
/// Constructed at watch-loop entry so every exit path reaches the delete.
/// The inner `Option` keeps the attempt exactly-once.
#[derive(Debug)]
pub struct CleanupGuard {
    client: OrchestratorClient,
    job: Option<JobRef>,
}

impl CleanupGuard {
    pub fn new(client: OrchestratorClient, job: JobRef) -> Self {
        Self {
            client,
            job: Some(job),
        }
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Some(job) = self.job.take() {
            let client = self.client.clone();
            // Drop cannot await; the guard only lives inside a watcher task,
            // so a runtime is on hand to finish the delete.
            tokio::spawn(async move {
                delete_job(&client, &job).await;
            });
        }
    }
}

/// Issues a foreground-propagation delete and logs the outcome.
///
/// Foreground propagation keeps the delete from completing until dependent
/// pods are gone. A resource that is already absent is treated as success;
/// any other failure is logged without retry or escalation.
pub async fn delete_job(client: &OrchestratorClient, job: &JobRef) {
    info!(job = %job, "cleaning up");

    let result = client
        .delete_job(&job.namespace, &job.name, &DeleteOptions::foreground())
        .await;

    match result {
        Ok(()) => info!(job = %job, "removed"),
        Err(e) if e.is_not_found() => info!(job = %job, "already removed"),
        Err(e) => error!(job = %job, error = %e, "failed to remove"),
    }
}
