//! Integration module for the CLI.
//!
//! Loads workspaces and record files, and drives the budget monitor against a
//! simulated or the system clock.

pub(crate) mod simulation;
pub(crate) mod workspace_store;
