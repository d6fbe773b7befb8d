//! Time sources.
//!
//! Reconciliation works on explicit instants; a [`Clock`] is how the periodic job
//! obtains them. [`SystemClock`] reads the wall clock, [`SimulatedClock`] is stepped
//! by hand or on a fixed auto-advance interval.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex, PoisonError};

/// Default auto-advance step of a simulated clock.
pub const DEFAULT_SIMULATION_STEP_MINUTES: i64 = 15;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A manually or automatically stepped clock for simulation and tests.
#[derive(Debug)]
pub struct SimulatedClock {
    current: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl SimulatedClock {
    /// Start at `start` with the default 15 minute step.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_step(start, Duration::minutes(DEFAULT_SIMULATION_STEP_MINUTES))
    }

    /// Start at `start`, advancing by `step` on each [`tick`](Self::tick).
    pub const fn with_step(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            current: Mutex::new(start),
            step,
        }
    }

    /// Auto-advance step.
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Move by `delta` (negative to go back) and return the new instant.
    pub fn advance(&self, delta: Duration) -> DateTime<Utc> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current += delta;
        *current
    }

    /// Advance by the configured step.
    pub fn tick(&self) -> DateTime<Utc> {
        self.advance(self.step)
    }

    /// Jump to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
