//! Job-related API endpoints

use reqwest::Method;
use tracing::debug;

use crate::OrchestratorClient;
use crate::error::Result;
use runlet_core::job::{DeleteOptions, Job, JobManifest};

impl OrchestratorClient {
    /// Submit a job manifest for execution
    ///
    /// # Arguments
    /// * `namespace` - The namespace the job is created in
    /// * `manifest` - The fully-named job manifest
    ///
    /// # Returns
    /// The job as accepted by the orchestrator
    pub async fn create_job(&self, namespace: &str, manifest: &JobManifest) -> Result<Job> {
        let url = format!(
            "{}/apis/batch/v1/namespaces/{}/jobs",
            self.base_url, namespace
        );

        debug!(namespace, name = %manifest.metadata.name, "creating job");

        let response = self
            .request(Method::POST, &url)
            .json(manifest)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Fetch the current state of a submitted job
    ///
    /// # Arguments
    /// * `namespace` - The namespace the job lives in
    /// * `name` - The assigned job name
    ///
    /// # Returns
    /// The job including its current status counters
    pub async fn get_job(&self, namespace: &str, name: &str) -> Result<Job> {
        let url = format!(
            "{}/apis/batch/v1/namespaces/{}/jobs/{}",
            self.base_url, namespace, name
        );
        let response = self.request(Method::GET, &url).send().await?;

        self.handle_response(response).await
    }

    /// Delete a submitted job
    ///
    /// # Arguments
    /// * `namespace` - The namespace the job lives in
    /// * `name` - The assigned job name
    /// * `options` - Deletion options, including the propagation policy
    pub async fn delete_job(
        &self,
        namespace: &str,
        name: &str,
        options: &DeleteOptions,
    ) -> Result<()> {
        let url = format!(
            "{}/apis/batch/v1/namespaces/{}/jobs/{}",
            self.base_url, namespace, name
        );

        debug!(namespace, name, "deleting job");

        let response = self
            .request(Method::DELETE, &url)
            .json(options)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
