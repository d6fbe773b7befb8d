#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/optima-ads/optima/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod change_log;
pub mod clock;
pub mod error;
pub mod evaluator;
pub mod ids;
pub mod monitor;
pub mod portfolio;
pub mod reconciler;
pub mod repository;
pub mod schedule;

pub use change_log::{ChangeLog, DEFAULT_LOG_CAPACITY};
pub use clock::{Clock, SimulatedClock, SystemClock};
pub use error::{BudgetError, Result};
pub use evaluator::{EvaluatorConfig, TieBreak, cap_state, evaluate, evaluate_with};
pub use ids::{AccountId, PortfolioId, ScheduleId};
pub use monitor::{BudgetMonitor, MonitorConfig, PassReport};
pub use portfolio::{CapState, Portfolio};
pub use reconciler::{CapChange, CapReason, REVERT_REASON, Reconciliation, reconcile, reconcile_with};
pub use repository::{InMemoryStore, PortfolioRepository, ScheduleRepository, Workspace};
pub use schedule::{BudgetSchedule, DaySet, MinuteOfDay, NewSchedule, OvernightPolicy};
