//! Submission naming
//!
//! Every submission gets a collision-free name so concurrent callers can
//! reuse the same base name without clashing in the orchestrator.

use uuid::Uuid;

use crate::job::JobManifest;

/// Assigns a unique submission name derived from the caller-supplied base
/// name.
///
/// The generated name is `{base}-{uuid}`. The orchestrator rejects jobs
/// whose template name disagrees with the job name, so both fields are
/// rewritten. The base name itself is not validated; a bad character set
/// surfaces later as a creation error.
///
/// Returns the assigned name.
pub fn assign_unique_name(manifest: &mut JobManifest) -> String {
    let name = format!("{}-{}", manifest.metadata.name, Uuid::new_v4());
    manifest.metadata.name = name.clone();
    manifest.spec.template.metadata.name = name.clone();
    name
}
