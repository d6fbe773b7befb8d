//! Budget reconciliation
//!
//! Brings each portfolio's current cap in line with what its schedules demand at an
//! instant, producing new portfolio values and one change entry per adjusted
//! portfolio. Portfolios are reconciled independently, in input order.

use crate::evaluator::{EvaluatorConfig, evaluate_with};
use crate::ids::{PortfolioId, ScheduleId};
use crate::portfolio::Portfolio;
use crate::schedule::BudgetSchedule;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason text used when a portfolio falls back to its default cap.
pub const REVERT_REASON: &str = "Reverting to Default";

/// Why a portfolio's cap changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapReason {
    /// A schedule window opened.
    Schedule {
        /// Schedule identifier
        id: ScheduleId,
        /// Schedule name
        name: String,
    },
    /// No window is open; back to the default cap.
    RevertToDefault,
}

impl fmt::Display for CapReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schedule { name, .. } => write!(f, "{name}"),
            Self::RevertToDefault => write!(f, "{REVERT_REASON}"),
        }
    }
}

/// A single cap adjustment.
///
/// Displays as the change-log line
/// `[<instant>] Portfolio "<name>": Changed budget from $<old> to $<new> (<reason>)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapChange {
    /// Instant the pass was evaluated at.
    pub at: DateTime<Utc>,
    /// Adjusted portfolio.
    pub portfolio_id: PortfolioId,
    /// Portfolio display name.
    pub portfolio_name: String,
    /// Cap before the pass.
    pub old_cap: f64,
    /// Cap after the pass.
    pub new_cap: f64,
    /// Cause of the adjustment.
    pub reason: CapReason,
}

impl fmt::Display for CapChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Portfolio \"{}\": Changed budget from ${} to ${} ({})",
            self.at.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.portfolio_name,
            self.old_cap,
            self.new_cap,
            self.reason
        )
    }
}

/// Output of a reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Portfolios in input order; untouched ones are equal to their inputs.
    pub portfolios: Vec<Portfolio>,
    /// Adjustments in input portfolio order.
    pub changes: Vec<CapChange>,
}

impl Reconciliation {
    /// Whether any cap changed.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Change-log lines.
    pub fn log_lines(&self) -> Vec<String> {
        self.changes.iter().map(ToString::to_string).collect()
    }

    /// Portfolios whose cap changed.
    pub fn changed_portfolios(&self) -> impl Iterator<Item = &Portfolio> {
        self.portfolios
            .iter()
            .filter(|p| self.changes.iter().any(|c| c.portfolio_id == p.id))
    }
}

/// Reconcile with the default evaluation policies.
pub fn reconcile(
    portfolios: &[Portfolio],
    schedules: &[BudgetSchedule],
    instant: DateTime<Utc>,
) -> Reconciliation {
    reconcile_with(&EvaluatorConfig::default(), portfolios, schedules, instant)
}

/// Reconcile every portfolio against `schedules` at `instant`.
///
/// The dayparting flag is not consulted; any active schedule is honoured.
pub fn reconcile_with(
    config: &EvaluatorConfig,
    portfolios: &[Portfolio],
    schedules: &[BudgetSchedule],
    instant: DateTime<Utc>,
) -> Reconciliation {
    let mut changes = Vec::new();

    let portfolios = portfolios
        .iter()
        .map(|portfolio| {
            let matched = evaluate_with(config, schedules, &portfolio.id, instant);
            let desired = matched.map_or(portfolio.default_budget_cap, |s| s.scheduled_budget_cap);

            if desired == portfolio.current_budget_cap {
                return portfolio.clone();
            }

            changes.push(CapChange {
                at: instant,
                portfolio_id: portfolio.id.clone(),
                portfolio_name: portfolio.name.clone(),
                old_cap: portfolio.current_budget_cap,
                new_cap: desired,
                reason: matched.map_or(CapReason::RevertToDefault, |s| CapReason::Schedule {
                    id: s.id.clone(),
                    name: s.name.clone(),
                }),
            });

            Portfolio {
                current_budget_cap: desired,
                ..portfolio.clone()
            }
        })
        .collect();

    Reconciliation {
        portfolios,
        changes,
    }
}
