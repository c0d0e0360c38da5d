//! Job wire types
//!
//! Structures exchanged with the orchestrator's batch API. Only the fields
//! the supervisor reads or writes are typed; everything else in a caller's
//! manifest rides through flattened maps untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Resource identification shared by jobs and pod templates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A job manifest as supplied by a caller, before submission
///
/// The manifest is treated as already validated: apart from the name
/// rewrite it is handed to the orchestrator exactly as received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobManifest {
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: JobSpec,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The execution section of a job manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    pub template: PodTemplate,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Pod template nested inside a job spec
///
/// The orchestrator requires the template name to agree with the job name,
/// which is why the metadata here is typed at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodTemplate {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A job as accepted and reported by the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    /// The (name, namespace) pair that identifies this job for the rest of
    /// its supervision
    pub fn reference(&self) -> JobRef {
        JobRef {
            name: self.metadata.name.clone(),
            namespace: self.metadata.namespace.clone(),
        }
    }
}

/// Counters and timestamps the orchestrator reports for a submitted job
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub succeeded: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<DateTime<Utc>>,
}

/// Reference to a submitted job, sufficient to re-fetch or delete it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobRef {
    pub name: String,
    pub namespace: String,
}

impl fmt::Display for JobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Deletion options forwarded to the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOptions {
    pub propagation_policy: PropagationPolicy,
}

impl DeleteOptions {
    /// Foreground propagation: dependents are removed before the delete is
    /// considered complete, so a job never leaves orphaned pods behind.
    pub fn foreground() -> Self {
        Self {
            propagation_policy: PropagationPolicy::Foreground,
        }
    }
}

/// How dependent resources are removed relative to their owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropagationPolicy {
    Orphan,
    Background,
    Foreground,
}

/// Pod listing consumed by the health-check path; items stay opaque since
/// only the count is used
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodList {
    #[serde(default)]
    pub items: Vec<Value>,
}
