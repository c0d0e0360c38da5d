//! Lifecycle classification
//!
//! Collapses the orchestrator's reported status counters into the small
//! state machine the watch loop runs on.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::job::JobStatus;

/// Classification of a job's execution state at poll time
///
/// `Active` and `Unknown` are non-terminal; `Succeeded` and `Failed` end
/// supervision. `Unknown` is a real variant rather than a default arm so
/// that adding a phase forces every consumer through exhaustiveness
/// checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobPhase {
    Active,
    Succeeded,
    Failed,
    Unknown,
}

impl JobPhase {
    /// True when no further transitions are expected and supervision ends
    pub fn is_terminal(self) -> bool {
        matches!(self, JobPhase::Succeeded | JobPhase::Failed)
    }

    /// Collapses reported counters into a phase.
    ///
    /// Checked in precedence order: active, then succeeded, then failed.
    /// Counters matching no pattern fall through to `Unknown`, which is
    /// non-terminal: the orchestrator may report all-zero counters before
    /// the first pod is scheduled.
    pub fn classify(status: &JobStatus) -> JobPhase {
        if status.active.unwrap_or(0) >= 1 {
            JobPhase::Active
        } else if status.succeeded.unwrap_or(0) >= 1 {
            JobPhase::Succeeded
        } else if status.failed.unwrap_or(0) >= 1 {
            JobPhase::Failed
        } else {
            JobPhase::Unknown
        }
    }
}

impl fmt::Display for JobPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobPhase::Active => "active",
            JobPhase::Succeeded => "succeeded",
            JobPhase::Failed => "failed",
            JobPhase::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}
