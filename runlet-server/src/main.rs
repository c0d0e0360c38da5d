//! Runlet Server
//!
//! HTTP control surface for submitting batch jobs to a cluster orchestrator
//! and supervising them to completion.
//!
//! Architecture:
//! - Configuration: command-line flags and environment (clap)
//! - Api: axum routes for submission and health checks
//! - Supervisor: one detached watch loop per accepted job, with guaranteed
//!   cleanup when the loop ends
//!
//! The submission response only acknowledges the attempt; lifecycle tracking
//! and cleanup happen asynchronously and are visible through logs alone.

mod api;
mod config;
mod supervisor;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::AppState;
use crate::config::Config;
use crate::supervisor::Supervisor;
use runlet_client::ClusterConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runlet_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Runlet Server");

    let config = Config::parse();
    config.validate()?;

    let cluster = if config.in_cluster {
        ClusterConfig::in_cluster().context("Failed to resolve in-cluster credentials")?
    } else {
        ClusterConfig::from_file(&config.kubeconfig).context("Failed to load credentials file")?
    };

    let client = cluster.connect();
    info!("Orchestrator client initialized: {}", client.base_url());

    let supervisor = Supervisor::new(client.clone(), config.poll_interval());
    let state = Arc::new(AppState {
        client,
        supervisor,
        auth: config.basic_auth(),
    });

    if state.auth.is_some() {
        info!("Basic authentication enabled");
    }

    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
