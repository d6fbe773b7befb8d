//! Simulated and live drivers for the budget monitor.

use crate::error::CliError;
use chrono::{DateTime, Duration, Utc};
use optima_budget::{
    BudgetMonitor, ChangeLog, Clock, InMemoryStore, MonitorConfig, SimulatedClock, SystemClock,
};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tracing::{info, warn};

/// Configuration for a simulated run.
#[derive(Debug, Clone)]
pub(crate) struct SimulationConfig {
    /// Simulated start instant.
    pub start: DateTime<Utc>,
    /// Simulated minutes per tick.
    pub step_minutes: i64,
    /// Number of ticks to run.
    pub ticks: u32,
    /// Pace ticks against the wall clock.
    pub realtime: bool,
    /// Wall-clock milliseconds per tick when `realtime` is set.
    pub tick_ms: u64,
    /// Monitor settings.
    pub monitor: MonitorConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start: Utc::now(),
            step_minutes: 15,
            ticks: 96,
            realtime: false,
            tick_ms: 1000,
            monitor: MonitorConfig::default(),
        }
    }
}

/// Outcome of a simulated run.
#[derive(Debug)]
pub(crate) struct SimulationOutcome {
    /// Simulated instant after the last tick.
    pub finished_at: DateTime<Utc>,
    /// Passes run.
    pub passes: u32,
    /// Total adjustments applied.
    pub changes: usize,
    /// Retained change entries, newest first.
    pub log: ChangeLog,
}

/// Run `ticks` passes against a simulated clock, advancing one step after each.
pub(crate) async fn run_simulation(
    store: Arc<InMemoryStore>,
    config: SimulationConfig,
) -> Result<SimulationOutcome, CliError> {
    let clock = Arc::new(SimulatedClock::with_step(
        config.start,
        Duration::minutes(config.step_minutes),
    ));
    let mut monitor = BudgetMonitor::with_config(store, Arc::clone(&clock), config.monitor);
    let mut ticker = config
        .realtime
        .then(|| tokio::time::interval(StdDuration::from_millis(config.tick_ms.max(1))));

    info!(
        start = %config.start,
        step_minutes = config.step_minutes,
        ticks = config.ticks,
        "starting simulation"
    );

    let mut changes = 0;
    for _ in 0..config.ticks {
        if let Some(ticker) = ticker.as_mut() {
            ticker.tick().await;
        }
        changes += monitor.run_pass()?.changes.len();
        clock.tick();
    }

    Ok(SimulationOutcome {
        finished_at: clock.now(),
        passes: config.ticks,
        changes,
        log: monitor.log().clone(),
    })
}

/// Reconcile against the system clock every `interval` until Ctrl-C, or once.
///
/// Returns the change log accumulated over the run.
pub(crate) async fn run_live(
    store: Arc<InMemoryStore>,
    config: MonitorConfig,
    interval: StdDuration,
    once: bool,
) -> Result<ChangeLog, CliError> {
    let mut monitor = BudgetMonitor::with_config(store, SystemClock, config);

    if once {
        monitor.run_pass()?;
        return Ok(monitor.log().clone());
    }

    info!(interval_secs = interval.as_secs(), "monitor started");
    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = monitor.run_pass() {
                    warn!(error = %e, "reconciliation pass failed");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down monitor");
                break;
            }
        }
    }

    Ok(monitor.log().clone())
}
