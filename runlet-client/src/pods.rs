//! Pod-related API endpoints

use reqwest::Method;

use crate::OrchestratorClient;
use crate::error::Result;
use runlet_core::job::PodList;

impl OrchestratorClient {
    /// List pods, across all namespaces when none is given
    ///
    /// Only the item count is consumed by the health-check path; the items
    /// themselves stay opaque.
    pub async fn list_pods(&self, namespace: Option<&str>) -> Result<PodList> {
        let url = match namespace {
            Some(ns) => format!("{}/api/v1/namespaces/{}/pods", self.base_url, ns),
            None => format!("{}/api/v1/pods", self.base_url),
        };
        let response = self.request(Method::GET, &url).send().await?;

        self.handle_response(response).await
    }
}
