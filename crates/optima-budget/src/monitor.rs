//! The periodic budget monitor job.
//!
//! One pass reads the portfolios and schedules in scope from storage, reconciles
//! them at the clock's current instant, writes back the portfolios whose cap moved,
//! and keeps the most recent change entries in a bounded log.

use crate::change_log::{ChangeLog, DEFAULT_LOG_CAPACITY};
use crate::clock::Clock;
use crate::error::Result;
use crate::evaluator::EvaluatorConfig;
use crate::ids::{AccountId, PortfolioId};
use crate::reconciler::{CapChange, reconcile_with};
use crate::repository::{PortfolioRepository, ScheduleRepository};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Monitor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Evaluation policies
    pub evaluator: EvaluatorConfig,
    /// Number of change entries retained (default: 50)
    pub log_capacity: usize,
    /// Restrict passes to one account's portfolios (default: all)
    pub account: Option<AccountId>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            evaluator: EvaluatorConfig::default(),
            log_capacity: DEFAULT_LOG_CAPACITY,
            account: None,
        }
    }
}

/// Result of a single monitor pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PassReport {
    /// Instant the pass evaluated.
    pub at: DateTime<Utc>,
    /// Number of portfolios reconciled.
    pub evaluated: usize,
    /// Adjustments applied, in portfolio order.
    pub changes: Vec<CapChange>,
}

/// Applies reconciliation results to a store on demand.
#[derive(Debug)]
pub struct BudgetMonitor<S, C> {
    store: Arc<S>,
    clock: C,
    config: MonitorConfig,
    log: ChangeLog,
}

impl<S, C> BudgetMonitor<S, C>
where
    S: PortfolioRepository + ScheduleRepository,
    C: Clock,
{
    /// Create a monitor with default configuration.
    pub fn new(store: Arc<S>, clock: C) -> Self {
        Self::with_config(store, clock, MonitorConfig::default())
    }

    /// Create a monitor.
    pub fn with_config(store: Arc<S>, clock: C, config: MonitorConfig) -> Self {
        let log = ChangeLog::with_capacity(config.log_capacity);
        Self {
            store,
            clock,
            config,
            log,
        }
    }

    /// Run one reconciliation pass at the clock's current instant.
    ///
    /// # Errors
    /// Propagates storage errors; a failed write leaves earlier writes in place.
    pub fn run_pass(&mut self) -> Result<PassReport> {
        let at = self.clock.now();

        let portfolios = match &self.config.account {
            Some(account) => self.store.list_portfolios_for_account(account)?,
            None => self.store.list_portfolios()?,
        };
        let ids: Vec<PortfolioId> = portfolios.iter().map(|p| p.id.clone()).collect();
        let schedules = self.store.list_schedules_for(&ids)?;

        let result = reconcile_with(&self.config.evaluator, &portfolios, &schedules, at);

        // Only the cap is written; other fields may have been edited during the pass
        for change in &result.changes {
            let stored = self.store.get_portfolio(&change.portfolio_id)?;
            self.store
                .update_portfolio(stored.with_current_cap(change.new_cap))?;
        }
        for change in &result.changes {
            info!(
                portfolio = %change.portfolio_id,
                old_cap = change.old_cap,
                new_cap = change.new_cap,
                reason = %change.reason,
                "budget cap changed"
            );
        }
        debug!(
            at = %at,
            evaluated = portfolios.len(),
            changed = result.changes.len(),
            "reconciliation pass complete"
        );

        self.log.record(result.changes.iter().cloned());

        Ok(PassReport {
            at,
            evaluated: portfolios.len(),
            changes: result.changes,
        })
    }

    /// Retained change entries.
    pub const fn log(&self) -> &ChangeLog {
        &self.log
    }

    /// The clock driving this monitor.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// The backing store.
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Active configuration.
    pub const fn config(&self) -> &MonitorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimulatedClock;
    use crate::portfolio::Portfolio;
    use crate::ids::ScheduleId;
    use crate::repository::InMemoryStore;
    use crate::schedule::{BudgetSchedule, NewSchedule};
    use chrono::{Duration, TimeZone};

    fn setup() -> (Arc<InMemoryStore>, Arc<SimulatedClock>) {
        let store = InMemoryStore::new();
        store
            .insert_portfolio(Portfolio::new("p1", "acc1", "Summer Clothing Launch", 500.0))
            .unwrap();
        store
            .insert_portfolio(Portfolio::new("p3", "acc2", "Pet Supplies - UK", 300.0))
            .unwrap();
        store
            .create_schedule(NewSchedule::new(
                "p1",
                "Morning Rush Boost",
                1000.0,
                "13:00",
                "17:00",
                vec![1, 2, 3, 4, 5],
            ))
            .unwrap();
        store
            .create_schedule(NewSchedule::new("p3", "Always", 450.0, "00:00", "24:00", (0..7).collect()))
            .unwrap();

        let start = Utc.with_ymd_and_hms(2024, 1, 3, 12, 45, 0).unwrap();
        (Arc::new(store), Arc::new(SimulatedClock::new(start)))
    }

    #[test]
    fn test_pass_writes_back_and_logs() {
        let (store, clock) = setup();
        let mut monitor = BudgetMonitor::new(store.clone(), clock.clone());

        let report = monitor.run_pass().unwrap();
        assert_eq!(report.evaluated, 2);
        assert_eq!(report.changes.len(), 1); // only p3's all-day schedule is open
        assert_eq!(store.get_portfolio(&"p3".into()).unwrap().current_budget_cap, 450.0);

        clock.tick(); // 13:00
        let report = monitor.run_pass().unwrap();
        assert_eq!(report.changes.len(), 1);
        assert_eq!(store.get_portfolio(&"p1".into()).unwrap().current_budget_cap, 1000.0);

        let report = monitor.run_pass().unwrap();
        assert!(report.changes.is_empty());
        assert_eq!(monitor.log().len(), 2);
        assert!(monitor.log().lines()[0].contains("Morning Rush Boost"));
    }

    #[test]
    fn test_account_scope() {
        let (store, clock) = setup();
        clock.advance(Duration::hours(1));
        let config = MonitorConfig {
            account: Some("acc1".into()),
            ..Default::default()
        };
        let mut monitor = BudgetMonitor::with_config(store.clone(), clock, config);

        let report = monitor.run_pass().unwrap();
        assert_eq!(report.evaluated, 1);
        assert_eq!(report.changes.len(), 1);
        // Out-of-scope portfolio untouched
        assert_eq!(store.get_portfolio(&"p3".into()).unwrap().current_budget_cap, 300.0);
    }

    #[test]
    fn test_log_capacity_from_config() {
        let (store, clock) = setup();
        let config = MonitorConfig {
            log_capacity: 1,
            ..Default::default()
        };
        let mut monitor = BudgetMonitor::with_config(store, clock.clone(), config);
        monitor.run_pass().unwrap();
        clock.tick();
        monitor.run_pass().unwrap();
        assert_eq!(monitor.log().len(), 1);
        assert_eq!(monitor.config().log_capacity, 1);
    }

    /// Store that renames and flags `p1` while schedules are being read, as a
    /// concurrent operator edit would.
    struct EditDuringPass {
        inner: InMemoryStore,
    }

    impl PortfolioRepository for EditDuringPass {
        fn list_portfolios(&self) -> Result<Vec<Portfolio>> {
            self.inner.list_portfolios()
        }
        fn get_portfolio(&self, id: &PortfolioId) -> Result<Portfolio> {
            self.inner.get_portfolio(id)
        }
        fn update_portfolio(&self, portfolio: Portfolio) -> Result<Portfolio> {
            self.inner.update_portfolio(portfolio)
        }
    }

    impl ScheduleRepository for EditDuringPass {
        fn list_schedules(&self) -> Result<Vec<BudgetSchedule>> {
            let id = PortfolioId::from("p1");
            let edited = Portfolio {
                name: "Summer Clothing Launch (renamed)".to_string(),
                ..self.inner.get_portfolio(&id)?
            };
            self.inner.update_portfolio(edited)?;
            self.inner.set_dayparting(&id, true)?;
            self.inner.list_schedules()
        }
        fn get_schedule(&self, id: &ScheduleId) -> Result<BudgetSchedule> {
            self.inner.get_schedule(id)
        }
        fn insert_schedule(&self, schedule: BudgetSchedule) -> Result<BudgetSchedule> {
            self.inner.insert_schedule(schedule)
        }
        fn update_schedule(&self, schedule: BudgetSchedule) -> Result<BudgetSchedule> {
            self.inner.update_schedule(schedule)
        }
        fn delete_schedule(&self, id: &ScheduleId) -> Result<BudgetSchedule> {
            self.inner.delete_schedule(id)
        }
    }

    #[test]
    fn test_pass_keeps_concurrent_edits() {
        let (store, clock) = setup();
        clock.advance(Duration::hours(1)); // 13:45, boost open
        let store = Arc::new(EditDuringPass {
            inner: Arc::try_unwrap(store).unwrap(),
        });
        let mut monitor = BudgetMonitor::new(store.clone(), clock);

        let report = monitor.run_pass().unwrap();
        assert_eq!(report.changes.len(), 2);

        let p1 = store.get_portfolio(&"p1".into()).unwrap();
        assert_eq!(p1.current_budget_cap, 1000.0);
        assert!(p1.dayparting_enabled);
        assert_eq!(p1.name, "Summer Clothing Launch (renamed)");
    }
}
