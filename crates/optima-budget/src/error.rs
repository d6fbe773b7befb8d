//! Error types for budget operations.

use thiserror::Error;

/// Result type for budget operations.
pub type Result<T> = std::result::Result<T, BudgetError>;

/// Errors that can occur while creating schedules or talking to a store.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BudgetError {
    /// Schedule time is not a valid `HH:MM` UTC time
    #[error("Invalid schedule time '{value}': {reason}")]
    InvalidScheduleFormat {
        /// The rejected input
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Day of week outside 0 (Sunday) to 6 (Saturday)
    #[error("Invalid day of week: {0} (must be 0-6, 0 = Sunday)")]
    InvalidWeekday(u8),

    /// Budget cap is negative or not a finite number
    #[error("Invalid budget cap: {0}")]
    InvalidBudgetCap(f64),

    /// Entity missing from the store
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind ("portfolio", "schedule")
        kind: &'static str,
        /// Requested identifier
        id: String,
    },

    /// Entity already present in the store
    #[error("{kind} already exists: {id}")]
    Duplicate {
        /// Entity kind ("portfolio", "schedule")
        kind: &'static str,
        /// Conflicting identifier
        id: String,
    },
}

impl BudgetError {
    pub(crate) fn format(value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidScheduleFormat {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Validate a budget cap amount.
pub(crate) fn check_cap(cap: f64) -> Result<f64> {
    if cap.is_finite() && cap >= 0.0 {
        Ok(cap)
    } else {
        Err(BudgetError::InvalidBudgetCap(cap))
    }
}
