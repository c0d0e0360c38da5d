//! Runlet Orchestrator Client
//!
//! A small, type-safe HTTP client for the cluster orchestrator's REST API.
//! It covers exactly the surface the supervisor consumes: job creation,
//! status fetches, deletion with propagation control, and the pod listing
//! used by the health-check path.
//!
//! The client is `Clone` and safe for concurrent use; each watcher task
//! holds its own clone over a shared connection pool.
//!
//! # Example
//!
//! ```no_run
//! use runlet_client::OrchestratorClient;
//!
//! # async fn example() -> runlet_client::Result<()> {
//! let client = OrchestratorClient::new("https://orchestrator:6443");
//! let job = client.get_job("default", "etl-batch-1234").await?;
//! println!("active pods: {:?}", job.status.active);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
mod jobs;
mod pods;

// Re-export commonly used types
pub use config::{ClusterConfig, ConfigError};
pub use error::{ClientError, Result};

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

/// HTTP client for the orchestrator API
#[derive(Debug, Clone)]
pub struct OrchestratorClient {
    /// Base URL of the orchestrator (e.g., "https://orchestrator:6443")
    base_url: String,
    /// Bearer token attached to every request, when configured
    token: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl OrchestratorClient {
    /// Create a new orchestrator client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the orchestrator API
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new orchestrator client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client,
        }
    }

    /// Attach a bearer token to every request issued by this client
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL of the orchestrator
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request, attaching authentication when configured
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("failed to parse JSON response: {e}")))
    }

    /// Handle an API response whose body is not needed (e.g., deletions)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}
