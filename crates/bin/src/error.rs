//! CLI error type.

use optima_budget::BudgetError;
use optima_metrics::{ExportError, MetricsError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the `optima` binary.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Schedule or portfolio error.
    #[error("Budget error: {0}")]
    Budget(#[from] BudgetError),

    /// Record loading or option parsing error.
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),

    /// Export error.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Malformed workspace file.
    #[error("Workspace file {path}: {source}")]
    Workspace {
        /// File that failed to parse.
        path: PathBuf,
        /// Parse error.
        source: serde_json::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Account that owns no portfolio in the workspace.
    #[error("Unknown account '{0}'")]
    UnknownAccount(String),
}
