//! Test helpers shared across crates in the run-settings workspace.
//!
//! Provides guards for process-global state (environment variables and the
//! working directory) and a temporary directory fixture for run settings
//! files.

pub mod cwd;
pub mod env;
pub mod fixtures;
