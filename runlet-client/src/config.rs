//! Orchestrator credential resolution
//!
//! Two modes, mirroring where the process runs: inside the cluster, where
//! the API address comes from the environment and the token from a mounted
//! service-account file, or outside it, where a JSON credentials file names
//! both. The resolved value is immutable; it is built once at startup and
//! handed to whoever constructs the client.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::OrchestratorClient;

/// Token file mounted into every pod running inside the cluster
const IN_CLUSTER_TOKEN_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";

/// Errors raised while resolving orchestrator credentials
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("failed to read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed credentials file {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Resolved connection settings for the orchestrator API
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Base URL of the orchestrator API server
    pub server: String,
    /// Bearer token, when the orchestrator requires one
    pub token: Option<String>,
}

/// On-disk shape of an external credentials file
#[derive(Debug, Deserialize)]
struct CredentialsFile {
    server: String,
    #[serde(default)]
    token: Option<String>,
}

impl ClusterConfig {
    /// Resolve credentials from the surrounding cluster
    ///
    /// Reads the API server address from the environment and the bearer
    /// token from the mounted service-account file.
    pub fn in_cluster() -> Result<Self, ConfigError> {
        let host = std::env::var("KUBERNETES_SERVICE_HOST")
            .map_err(|_| ConfigError::MissingEnv("KUBERNETES_SERVICE_HOST"))?;
        let port = std::env::var("KUBERNETES_SERVICE_PORT")
            .map_err(|_| ConfigError::MissingEnv("KUBERNETES_SERVICE_PORT"))?;

        let token =
            std::fs::read_to_string(IN_CLUSTER_TOKEN_PATH).map_err(|source| {
                ConfigError::Unreadable {
                    path: IN_CLUSTER_TOKEN_PATH.to_string(),
                    source,
                }
            })?;

        Ok(Self {
            server: format!("https://{host}:{port}"),
            token: Some(token.trim().to_string()),
        })
    }

    /// Load credentials from an external JSON file
    ///
    /// The file names the API server and, optionally, a bearer token:
    /// `{ "server": "https://...", "token": "..." }`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&path.display().to_string(), &contents)
    }

    fn parse(path: &str, contents: &str) -> Result<Self, ConfigError> {
        let file: CredentialsFile =
            serde_json::from_str(contents).map_err(|source| ConfigError::Malformed {
                path: path.to_string(),
                source,
            })?;

        Ok(Self {
            server: file.server,
            token: file.token,
        })
    }

    /// Build a client from the resolved settings
    pub fn connect(&self) -> OrchestratorClient {
        let client = OrchestratorClient::new(self.server.clone());
        match &self.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }
}
