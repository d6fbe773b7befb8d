//! Storage interfaces for portfolios and schedules.
//!
//! The reconciliation core never owns master collections; the monitor reads batches
//! through these traits and writes results back through them. [`InMemoryStore`]
//! backs simulations and tests.

use crate::error::{BudgetError, Result};
use crate::ids::{AccountId, PortfolioId, ScheduleId};
use crate::portfolio::Portfolio;
use crate::schedule::{BudgetSchedule, NewSchedule};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// Access to stored portfolios.
pub trait PortfolioRepository: Send + Sync {
    /// All portfolios in storage order.
    fn list_portfolios(&self) -> Result<Vec<Portfolio>>;

    /// A single portfolio.
    fn get_portfolio(&self, id: &PortfolioId) -> Result<Portfolio>;

    /// Replace a stored portfolio.
    fn update_portfolio(&self, portfolio: Portfolio) -> Result<Portfolio>;

    /// Portfolios owned by one account.
    fn list_portfolios_for_account(&self, account_id: &AccountId) -> Result<Vec<Portfolio>> {
        Ok(self
            .list_portfolios()?
            .into_iter()
            .filter(|p| &p.account_id == account_id)
            .collect())
    }
}

/// Access to stored schedules.
pub trait ScheduleRepository: Send + Sync {
    /// All schedules in declaration order.
    fn list_schedules(&self) -> Result<Vec<BudgetSchedule>>;

    /// A single schedule.
    fn get_schedule(&self, id: &ScheduleId) -> Result<BudgetSchedule>;

    /// Store a new schedule.
    fn insert_schedule(&self, schedule: BudgetSchedule) -> Result<BudgetSchedule>;

    /// Replace a stored schedule.
    fn update_schedule(&self, schedule: BudgetSchedule) -> Result<BudgetSchedule>;

    /// Remove a schedule, returning it.
    fn delete_schedule(&self, id: &ScheduleId) -> Result<BudgetSchedule>;

    /// Schedules belonging to any of `portfolio_ids`.
    fn list_schedules_for(&self, portfolio_ids: &[PortfolioId]) -> Result<Vec<BudgetSchedule>> {
        Ok(self
            .list_schedules()?
            .into_iter()
            .filter(|s| portfolio_ids.contains(&s.portfolio_id))
            .collect())
    }
}

/// Serializable snapshot of portfolios and schedules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Portfolios.
    pub portfolios: Vec<Portfolio>,
    /// Schedules, in priority order.
    #[serde(default)]
    pub schedules: Vec<BudgetSchedule>,
}

impl Workspace {
    /// Check caps and identifier uniqueness.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for p in &self.portfolios {
            if !seen.insert(p.id.as_str()) {
                return Err(BudgetError::Duplicate {
                    kind: "portfolio",
                    id: p.id.to_string(),
                });
            }
            crate::error::check_cap(p.default_budget_cap)?;
        }

        let mut seen = HashSet::new();
        for s in &self.schedules {
            if !seen.insert(s.id.as_str()) {
                return Err(BudgetError::Duplicate {
                    kind: "schedule",
                    id: s.id.to_string(),
                });
            }
            s.validate()?;
        }
        Ok(())
    }
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    portfolios: RwLock<Vec<Portfolio>>,
    schedules: RwLock<Vec<BudgetSchedule>>,
    next_schedule: AtomicU64,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a validated workspace.
    pub fn from_workspace(workspace: Workspace) -> Result<Self> {
        workspace.validate()?;
        let next = workspace.schedules.len() as u64;
        Ok(Self {
            portfolios: RwLock::new(workspace.portfolios),
            schedules: RwLock::new(workspace.schedules),
            next_schedule: AtomicU64::new(next),
        })
    }

    /// Copy out the current contents.
    pub fn snapshot(&self) -> Workspace {
        Workspace {
            portfolios: read(&self.portfolios).clone(),
            schedules: read(&self.schedules).clone(),
        }
    }

    /// Add a portfolio.
    pub fn insert_portfolio(&self, portfolio: Portfolio) -> Result<Portfolio> {
        let mut portfolios = write(&self.portfolios);
        if portfolios.iter().any(|p| p.id == portfolio.id) {
            return Err(BudgetError::Duplicate {
                kind: "portfolio",
                id: portfolio.id.to_string(),
            });
        }
        portfolios.push(portfolio.clone());
        Ok(portfolio)
    }

    /// Validate input and store it as a new schedule with a generated id.
    pub fn create_schedule(&self, input: NewSchedule) -> Result<BudgetSchedule> {
        loop {
            let n = self.next_schedule.fetch_add(1, Ordering::Relaxed) + 1;
            let id = ScheduleId::from(format!("s{n}"));
            if self.get_schedule(&id).is_err() {
                let schedule = BudgetSchedule::create(id, input)?;
                return self.insert_schedule(schedule);
            }
        }
    }

    /// Flip a portfolio's dayparting flag.
    pub fn set_dayparting(&self, id: &PortfolioId, enabled: bool) -> Result<Portfolio> {
        let portfolio = self.get_portfolio(id)?.with_dayparting(enabled);
        self.update_portfolio(portfolio)
    }
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn not_found(kind: &'static str, id: impl ToString) -> BudgetError {
    BudgetError::NotFound {
        kind,
        id: id.to_string(),
    }
}

impl PortfolioRepository for InMemoryStore {
    fn list_portfolios(&self) -> Result<Vec<Portfolio>> {
        Ok(read(&self.portfolios).clone())
    }

    fn get_portfolio(&self, id: &PortfolioId) -> Result<Portfolio> {
        read(&self.portfolios)
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| not_found("portfolio", id))
    }

    fn update_portfolio(&self, portfolio: Portfolio) -> Result<Portfolio> {
        let mut portfolios = write(&self.portfolios);
        let slot = portfolios
            .iter_mut()
            .find(|p| p.id == portfolio.id)
            .ok_or_else(|| not_found("portfolio", &portfolio.id))?;
        *slot = portfolio.clone();
        Ok(portfolio)
    }
}

impl ScheduleRepository for InMemoryStore {
    fn list_schedules(&self) -> Result<Vec<BudgetSchedule>> {
        Ok(read(&self.schedules).clone())
    }

    fn get_schedule(&self, id: &ScheduleId) -> Result<BudgetSchedule> {
        read(&self.schedules)
            .iter()
            .find(|s| &s.id == id)
            .cloned()
            .ok_or_else(|| not_found("schedule", id))
    }

    fn insert_schedule(&self, schedule: BudgetSchedule) -> Result<BudgetSchedule> {
        schedule.validate()?;
        let mut schedules = write(&self.schedules);
        if schedules.iter().any(|s| s.id == schedule.id) {
            return Err(BudgetError::Duplicate {
                kind: "schedule",
                id: schedule.id.to_string(),
            });
        }
        schedules.push(schedule.clone());
        Ok(schedule)
    }

    fn update_schedule(&self, schedule: BudgetSchedule) -> Result<BudgetSchedule> {
        schedule.validate()?;
        let mut schedules = write(&self.schedules);
        let slot = schedules
            .iter_mut()
            .find(|s| s.id == schedule.id)
            .ok_or_else(|| not_found("schedule", &schedule.id))?;
        *slot = schedule.clone();
        Ok(schedule)
    }

    fn delete_schedule(&self, id: &ScheduleId) -> Result<BudgetSchedule> {
        let mut schedules = write(&self.schedules);
        let index = schedules
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| not_found("schedule", id))?;
        Ok(schedules.remove(index))
    }
}
