//! Campaign portfolios and their budget caps.

use crate::ids::{AccountId, PortfolioId, ScheduleId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A group of campaigns sharing one budget cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    /// Portfolio identifier.
    pub id: PortfolioId,

    /// Owning advertiser account.
    #[serde(alias = "amazonAccountId")]
    pub account_id: AccountId,

    /// Display name.
    pub name: String,

    /// Marketplace code (e.g. `US`, `UK`).
    #[serde(default)]
    pub marketplace: String,

    /// Cap applied when no schedule is open.
    pub default_budget_cap: f64,

    /// Cap currently in force; rewritten by reconciliation.
    pub current_budget_cap: f64,

    /// Whether operators may edit schedules for this portfolio.
    ///
    /// Reconciliation honours existing schedules regardless of this flag.
    #[serde(alias = "isDaypartingEnabled", default)]
    pub dayparting_enabled: bool,
}

impl Portfolio {
    /// Create a portfolio sitting at its default cap.
    pub fn new(
        id: impl Into<PortfolioId>,
        account_id: impl Into<AccountId>,
        name: impl Into<String>,
        default_budget_cap: f64,
    ) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            name: name.into(),
            marketplace: String::new(),
            default_budget_cap,
            current_budget_cap: default_budget_cap,
            dayparting_enabled: false,
        }
    }

    /// Set the marketplace code.
    pub fn with_marketplace(mut self, marketplace: impl Into<String>) -> Self {
        self.marketplace = marketplace.into();
        self
    }

    /// Set the dayparting flag.
    pub const fn with_dayparting(mut self, enabled: bool) -> Self {
        self.dayparting_enabled = enabled;
        self
    }

    /// Set the cap currently in force.
    pub const fn with_current_cap(mut self, cap: f64) -> Self {
        self.current_budget_cap = cap;
        self
    }

    /// Whether the cap in force equals the default.
    pub fn is_at_default(&self) -> bool {
        self.current_budget_cap == self.default_budget_cap
    }
}

impl fmt::Display for Portfolio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: ${} (default ${})",
            self.name, self.current_budget_cap, self.default_budget_cap
        )
    }
}

/// Which rule determines a portfolio's cap at an instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "scheduleId", rename_all = "snake_case")]
pub enum CapState {
    /// No schedule is open; the default cap applies.
    AtDefault,
    /// The named schedule's cap applies.
    AtOverride(ScheduleId),
}

impl CapState {
    /// Whether an override is in force.
    pub const fn is_override(&self) -> bool {
        matches!(self, Self::AtOverride(_))
    }
}

impl fmt::Display for CapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtDefault => write!(f, "default"),
            Self::AtOverride(id) => write!(f, "override ({id})"),
        }
    }
}
