//! Error types for metrics operations.

use thiserror::Error;

/// Result type for metrics operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors raised around the aggregation core: parsing options and reading input.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Unknown granularity name
    #[error("Unknown granularity '{0}' (expected daily, weekly or monthly)")]
    UnknownGranularity(String),

    /// Unknown date range name
    #[error("Unknown date range '{0}'")]
    UnknownRange(String),

    /// Bucket key that is not a day or month key
    #[error("Invalid period key '{0}'")]
    InvalidPeriod(String),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
