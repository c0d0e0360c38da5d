//! Runlet Core
//!
//! Core types and policy for the runlet job supervisor.
//!
//! This crate contains:
//! - Job types: wire-level manifest, job, and status structures
//! - Naming: collision-free submission names
//! - Phase: the lifecycle classification policy

pub mod job;
pub mod naming;
pub mod phase;
