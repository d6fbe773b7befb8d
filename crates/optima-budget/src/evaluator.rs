//! Schedule evaluation
//!
//! Selects the single schedule, if any, whose window is open for a portfolio at a
//! given instant. Evaluation is pure: it reads the schedules it is given and nothing
//! else.

use crate::ids::PortfolioId;
use crate::portfolio::CapState;
use crate::schedule::{BudgetSchedule, OvernightPolicy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rule for choosing between overlapping open schedules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The first open schedule in input order wins.
    #[default]
    FirstDeclared,
    /// The open schedule with the largest cap wins; ties go to the earlier one.
    HighestCap,
}

/// Evaluation policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Overlap resolution (default: first declared)
    pub tie_break: TieBreak,
    /// Treatment of windows crossing midnight (default: wraparound)
    pub overnight: OvernightPolicy,
}

/// Find the schedule that applies to `portfolio_id` at `instant` using the default
/// policies.
pub fn evaluate<'a>(
    schedules: &'a [BudgetSchedule],
    portfolio_id: &PortfolioId,
    instant: DateTime<Utc>,
) -> Option<&'a BudgetSchedule> {
    evaluate_with(&EvaluatorConfig::default(), schedules, portfolio_id, instant)
}

/// Find the schedule that applies to `portfolio_id` at `instant`.
///
/// Only active schedules owned by the portfolio are considered.
pub fn evaluate_with<'a>(
    config: &EvaluatorConfig,
    schedules: &'a [BudgetSchedule],
    portfolio_id: &PortfolioId,
    instant: DateTime<Utc>,
) -> Option<&'a BudgetSchedule> {
    let mut open = schedules.iter().filter(|s| {
        s.is_active && &s.portfolio_id == portfolio_id && s.covers(instant, config.overnight)
    });

    match config.tie_break {
        TieBreak::FirstDeclared => open.next(),
        TieBreak::HighestCap => open.fold(None, |best: Option<&BudgetSchedule>, s| match best {
            Some(b) if b.scheduled_budget_cap >= s.scheduled_budget_cap => Some(b),
            _ => Some(s),
        }),
    }
}

/// Cap state of a portfolio at `instant`.
pub fn cap_state(
    config: &EvaluatorConfig,
    schedules: &[BudgetSchedule],
    portfolio_id: &PortfolioId,
    instant: DateTime<Utc>,
) -> CapState {
    evaluate_with(config, schedules, portfolio_id, instant)
        .map_or(CapState::AtDefault, |s| CapState::AtOverride(s.id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::NewSchedule;
    use chrono::TimeZone;

    fn make(id: &str, portfolio: &str, cap: f64, start: &str, end: &str) -> BudgetSchedule {
        BudgetSchedule::create(
            id,
            NewSchedule::new(portfolio, id, cap, start, end, (0..7).collect()),
        )
        .unwrap()
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 3, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_no_schedules() {
        assert!(evaluate(&[], &"p1".into(), at(12, 0)).is_none());
    }

    #[test]
    fn test_filters_portfolio_and_active() {
        let mut inactive = make("s1", "p1", 900.0, "00:00", "24:00");
        inactive.is_active = false;
        let other = make("s2", "p2", 700.0, "00:00", "24:00");
        let schedules = vec![inactive, other];

        assert!(evaluate(&schedules, &"p1".into(), at(12, 0)).is_none());
        assert_eq!(
            evaluate(&schedules, &"p2".into(), at(12, 0)).map(|s| s.id.as_str()),
            Some("s2")
        );
    }

    #[test]
    fn test_first_declared_wins() {
        let schedules = vec![
            make("low", "p1", 600.0, "08:00", "20:00"),
            make("high", "p1", 1500.0, "10:00", "14:00"),
        ];
        let hit = evaluate(&schedules, &"p1".into(), at(12, 0)).unwrap();
        assert_eq!(hit.id.as_str(), "low");
    }

    #[test]
    fn test_highest_cap_wins() {
        let config = EvaluatorConfig {
            tie_break: TieBreak::HighestCap,
            ..Default::default()
        };
        let schedules = vec![
            make("low", "p1", 600.0, "08:00", "20:00"),
            make("high", "p1", 1500.0, "10:00", "14:00"),
            make("same", "p1", 1500.0, "11:00", "13:00"),
        ];

        let hit = evaluate_with(&config, &schedules, &"p1".into(), at(12, 0)).unwrap();
        assert_eq!(hit.id.as_str(), "high");

        // Outside the larger window the smaller one still applies
        let hit = evaluate_with(&config, &schedules, &"p1".into(), at(9, 0)).unwrap();
        assert_eq!(hit.id.as_str(), "low");
    }

    #[test]
    fn test_overnight_policy_is_honoured() {
        let schedules = vec![make("night", "p1", 3500.0, "22:00", "02:00")];
        let same_day = EvaluatorConfig {
            overnight: OvernightPolicy::SameDay,
            ..Default::default()
        };

        assert!(evaluate(&schedules, &"p1".into(), at(23, 0)).is_some());
        assert!(evaluate_with(&same_day, &schedules, &"p1".into(), at(23, 0)).is_none());
    }

    #[test]
    fn test_cap_state() {
        let schedules = vec![make("s1", "p1", 900.0, "09:00", "17:00")];
        let config = EvaluatorConfig::default();

        assert_eq!(
            cap_state(&config, &schedules, &"p1".into(), at(9, 0)),
            CapState::AtOverride("s1".into())
        );
        assert_eq!(
            cap_state(&config, &schedules, &"p1".into(), at(17, 0)),
            CapState::AtDefault
        );
    }
}
