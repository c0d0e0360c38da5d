//! Job lifecycle supervisor
//!
//! Owns the fire-and-forget path a submission takes once it reaches the
//! server: unique-name assignment, creation, a detached watch loop, and
//! guaranteed cleanup when that loop ends.

pub mod cleanup;
pub mod watcher;

use std::time::Duration;
use tracing::{error, info};

use runlet_client::{ClientError, OrchestratorClient};
use runlet_core::job::{JobManifest, JobRef};
use runlet_core::naming::assign_unique_name;

/// Submits jobs and spawns one watcher task per accepted submission
#[derive(Debug, Clone)]
pub struct Supervisor {
    client: OrchestratorClient,
    poll_interval: Duration,
}

impl Supervisor {
    /// Creates a supervisor polling at the given interval
    pub fn new(client: OrchestratorClient, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_interval,
        }
    }

    /// Assigns a unique name, creates the job, and starts tracking it.
    ///
    /// A rejected creation never enters the watch path: only resources the
    /// orchestrator acknowledged as created are eligible for cleanup, so a
    /// failed submission must not schedule a delete that could mask other
    /// errors. No retry is performed here.
    pub async fn submit(&self, mut manifest: JobManifest) -> Result<JobRef, ClientError> {
        let name = assign_unique_name(&mut manifest);
        let namespace = manifest.metadata.namespace.clone();

        let job = match self.client.create_job(&namespace, &manifest).await {
            Ok(job) => job,
            Err(e) => {
                error!(job = %name, error = %e, "failed to create");
                return Err(e);
            }
        };

        let job_ref = job.reference();
        info!(job = %job_ref, "created");

        let client = self.client.clone();
        let poll_interval = self.poll_interval;
        let watched = job_ref.clone();
        tokio::spawn(async move {
            watcher::watch_job(client, watched, poll_interval).await;
        });

        Ok(job_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supervisor::watcher::watch_job;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::Router;
    use axum::routing::{get, post};
    use runlet_core::job::{Job, JobStatus, ObjectMeta};
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Scripted response for one status fetch
    #[derive(Clone)]
    enum Tick {
        Status(JobStatus),
        FetchError,
    }

    /// Orchestrator stand-in with a per-job status script.
    ///
    /// Each fetch consumes the next script entry; the last entry repeats so
    /// a terminal status stays terminal. Jobs without a script report the
    /// fallback status, or empty counters when none is set.
    #[derive(Default)]
    struct MockOrchestrator {
        script: HashMap<String, VecDeque<Tick>>,
        fallback: Option<JobStatus>,
        reject_creates: bool,
        created: Vec<String>,
        fetches: HashMap<String, usize>,
        deletes: HashMap<String, usize>,
    }

    type Shared = Arc<Mutex<MockOrchestrator>>;

    async fn create_job(
        State(mock): State<Shared>,
        Path(ns): Path<String>,
        body: String,
    ) -> (StatusCode, String) {
        let manifest: JobManifest = serde_json::from_str(&body).unwrap();
        let mut mock = mock.lock().unwrap();

        if mock.reject_creates {
            return (StatusCode::FORBIDDEN, "jobs is forbidden".to_string());
        }

        let name = manifest.metadata.name.clone();
        mock.created.push(name.clone());

        let job = Job {
            metadata: ObjectMeta {
                name,
                namespace: ns,
                extra: Default::default(),
            },
            status: JobStatus::default(),
            extra: Default::default(),
        };
        (StatusCode::CREATED, serde_json::to_string(&job).unwrap())
    }

    async fn fetch_job(
        State(mock): State<Shared>,
        Path((ns, name)): Path<(String, String)>,
    ) -> (StatusCode, String) {
        let mut guard = mock.lock().unwrap();
        let mock = &mut *guard;
        *mock.fetches.entry(name.clone()).or_default() += 1;

        let tick = match mock.script.get_mut(&name) {
            Some(script) if script.len() > 1 => script.pop_front().unwrap(),
            Some(script) => script.front().cloned().unwrap(),
            None => Tick::Status(mock.fallback.clone().unwrap_or_default()),
        };

        match tick {
            Tick::FetchError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "etcd leader changed".to_string(),
            ),
            Tick::Status(status) => {
                let job = Job {
                    metadata: ObjectMeta {
                        name,
                        namespace: ns,
                        extra: Default::default(),
                    },
                    status,
                    extra: Default::default(),
                };
                (StatusCode::OK, serde_json::to_string(&job).unwrap())
            }
        }
    }

    async fn remove_job(
        State(mock): State<Shared>,
        Path((_ns, name)): Path<(String, String)>,
    ) -> StatusCode {
        *mock.lock().unwrap().deletes.entry(name).or_default() += 1;
        StatusCode::OK
    }

    async fn spawn_mock(mock: Shared) -> OrchestratorClient {
        let app = Router::new()
            .route("/apis/batch/v1/namespaces/{ns}/jobs", post(create_job))
            .route(
                "/apis/batch/v1/namespaces/{ns}/jobs/{name}",
                get(fetch_job).delete(remove_job),
            )
            .with_state(mock);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        OrchestratorClient::new(format!("http://{addr}"))
    }

    fn status(active: i32, succeeded: i32, failed: i32) -> JobStatus {
        JobStatus {
            active: Some(active),
            succeeded: Some(succeeded),
            failed: Some(failed),
            ..Default::default()
        }
    }

    fn script(mock: &Shared, name: &str, ticks: Vec<Tick>) {
        mock.lock()
            .unwrap()
            .script
            .insert(name.to_string(), ticks.into());
    }

    fn deletes(mock: &Shared, name: &str) -> usize {
        mock.lock().unwrap().deletes.get(name).copied().unwrap_or(0)
    }

    fn fetches(mock: &Shared, name: &str) -> usize {
        mock.lock().unwrap().fetches.get(name).copied().unwrap_or(0)
    }

    fn manifest(base: &str) -> JobManifest {
        serde_json::from_value(serde_json::json!({
            "metadata": {"name": base, "namespace": "default"},
            "spec": {"template": {"metadata": {"name": base}}}
        }))
        .unwrap()
    }

    /// Waits until the job has been deleted exactly once, then gives the
    /// mock time to catch a second delete if one were coming.
    async fn assert_single_delete(mock: &Shared, name: &str) {
        for _ in 0..200 {
            if deletes(mock, name) >= 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(deletes(mock, name), 1, "expected one delete of {name}");

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(deletes(mock, name), 1, "delete of {name} ran twice");
    }

    const POLL: Duration = Duration::from_millis(10);

    fn job_ref(name: &str) -> JobRef {
        JobRef {
            name: name.to_string(),
            namespace: "default".to_string(),
        }
    }

    #[tokio::test]
    async fn test_watch_reaches_succeeded_through_unknown_and_active() {
        let mock = Shared::default();
        script(
            &mock,
            "job-1",
            vec![
                Tick::Status(status(0, 0, 0)),
                Tick::Status(status(1, 0, 0)),
                Tick::Status(status(1, 0, 0)),
                Tick::Status(status(0, 1, 0)),
            ],
        );
        let client = spawn_mock(Arc::clone(&mock)).await;

        watch_job(client, job_ref("job-1"), POLL).await;

        assert_eq!(fetches(&mock, "job-1"), 4);
        assert_single_delete(&mock, "job-1").await;
    }

    #[tokio::test]
    async fn test_watch_terminates_on_failed() {
        let mock = Shared::default();
        script(
            &mock,
            "job-2",
            vec![Tick::Status(status(1, 0, 0)), Tick::Status(status(0, 0, 1))],
        );
        let client = spawn_mock(Arc::clone(&mock)).await;

        watch_job(client, job_ref("job-2"), POLL).await;

        assert_eq!(fetches(&mock, "job-2"), 2);
        assert_single_delete(&mock, "job-2").await;
    }

    #[tokio::test]
    async fn test_fetch_error_does_not_terminate_watch() {
        let mock = Shared::default();
        script(
            &mock,
            "job-3",
            vec![Tick::FetchError, Tick::Status(status(0, 1, 0))],
        );
        let client = spawn_mock(Arc::clone(&mock)).await;

        watch_job(client, job_ref("job-3"), POLL).await;

        assert_eq!(fetches(&mock, "job-3"), 2);
        assert_single_delete(&mock, "job-3").await;
    }

    #[tokio::test]
    async fn test_active_checked_before_succeeded() {
        // Both counters set on the first tick: the job must be observed as
        // active and keep being watched until succeeded wins alone.
        let mock = Shared::default();
        script(
            &mock,
            "job-4",
            vec![Tick::Status(status(1, 1, 0)), Tick::Status(status(0, 1, 0))],
        );
        let client = spawn_mock(Arc::clone(&mock)).await;

        watch_job(client, job_ref("job-4"), POLL).await;

        assert_eq!(fetches(&mock, "job-4"), 2);
        assert_single_delete(&mock, "job-4").await;
    }

    #[tokio::test]
    async fn test_aborted_watch_still_cleans_up() {
        let mock = Shared::default();
        script(&mock, "job-5", vec![Tick::Status(status(1, 0, 0))]);
        let client = spawn_mock(Arc::clone(&mock)).await;

        let handle = tokio::spawn(watch_job(client, job_ref("job-5"), POLL));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();

        assert_single_delete(&mock, "job-5").await;
    }

    #[tokio::test]
    async fn test_rejected_submission_spawns_nothing() {
        let mock = Shared::default();
        mock.lock().unwrap().reject_creates = true;
        let client = spawn_mock(Arc::clone(&mock)).await;

        let supervisor = Supervisor::new(client, POLL);
        let result = supervisor.submit(manifest("etl-batch")).await;
        assert!(result.is_err());

        tokio::time::sleep(Duration::from_millis(100)).await;

        let mock = mock.lock().unwrap();
        assert!(mock.created.is_empty());
        assert!(mock.fetches.is_empty());
        assert!(mock.deletes.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_submissions_are_independent() {
        let mock = Shared::default();
        mock.lock().unwrap().fallback = Some(status(0, 1, 0));
        let client = spawn_mock(Arc::clone(&mock)).await;

        let supervisor = Supervisor::new(client, POLL);
        let (first, second) = tokio::join!(
            supervisor.submit(manifest("etl-batch")),
            supervisor.submit(manifest("etl-batch")),
        );
        let first = first.unwrap();
        let second = second.unwrap();

        assert_ne!(first.name, second.name);
        assert!(first.name.starts_with("etl-batch-"));
        assert!(second.name.starts_with("etl-batch-"));

        assert_single_delete(&mock, &first.name).await;
        assert_single_delete(&mock, &second.name).await;
    }
}
