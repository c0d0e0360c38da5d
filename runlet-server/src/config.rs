//! Process configuration
//!
//! All settings are resolved once at startup and passed by value into the
//! components that need them; nothing reads configuration globally after
//! parsing.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Runlet server configuration
#[derive(Debug, Parser)]
#[command(
    name = "runlet-server",
    about = "Batch job submission and supervision service"
)]
pub struct Config {
    /// Resolve orchestrator credentials from the surrounding cluster
    #[arg(long)]
    pub in_cluster: bool,

    /// Path to the credentials file used when running outside the cluster
    #[arg(long, default_value = "kubeconfig")]
    pub kubeconfig: PathBuf,

    /// Address the HTTP server binds to
    #[arg(long, env = "RUNLET_BIND_ADDR", default_value = "0.0.0.0:10777")]
    pub bind_addr: String,

    /// Seconds between status polls for a submitted job
    #[arg(long, env = "RUNLET_POLL_INTERVAL", default_value_t = 1)]
    pub poll_interval_secs: u64,

    /// Username for basic auth; auth is disabled unless both halves are set
    #[arg(long, env = "RUNLET_USERNAME")]
    pub username: Option<String>,

    /// Password for basic auth
    #[arg(long, env = "RUNLET_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl Config {
    /// How often each watcher re-fetches job status
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Basic-auth credentials when both halves are configured
    pub fn basic_auth(&self) -> Option<(String, String)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some((user.clone(), pass.clone()))
            }
            _ => None,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind address cannot be empty");
        }

        if self.poll_interval_secs == 0 {
            anyhow::bail!("poll interval must be greater than 0");
        }

        if self.username.is_some() != self.password.is_some() {
            anyhow::bail!("basic auth requires both RUNLET_USERNAME and RUNLET_PASSWORD");
        }

        Ok(())
    }
}
