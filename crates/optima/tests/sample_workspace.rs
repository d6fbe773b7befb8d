//! Monitor and reporting over the bundled sample data.

use approx::assert_relative_eq;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use optima::budget::{
    BudgetMonitor, InMemoryStore, MonitorConfig, PortfolioId, PortfolioRepository,
    SimulatedClock, evaluate,
};
use optima::metrics::{DateRange, Granularity, ReportBuilder, calculate_totals};
use optima::sample;
use rstest::rstest;
use std::sync::Arc;

fn cap(store: &InMemoryStore, id: &str) -> f64 {
    store
        .get_portfolio(&PortfolioId::from(id))
        .unwrap()
        .current_budget_cap
}

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    // 2024-01-01 is a Monday
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0).unwrap()
}

#[test]
fn test_simulated_week_matches_evaluator() {
    let store = Arc::new(InMemoryStore::from_workspace(sample::sample_workspace().unwrap()).unwrap());
    let schedules = sample::sample_schedules().unwrap();
    let clock = Arc::new(SimulatedClock::new(at(1, 0, 0)));
    let mut monitor = BudgetMonitor::new(Arc::clone(&store), Arc::clone(&clock));

    for _ in 0..(7 * 24 * 4) {
        monitor.run_pass().unwrap();
        let now = clock.tick() - Duration::minutes(15);
        for portfolio in sample::sample_portfolios() {
            let expected = evaluate(&schedules, &portfolio.id, now)
                .map_or(portfolio.default_budget_cap, |s| s.scheduled_budget_cap);
            assert_eq!(cap(&store, portfolio.id.as_str()), expected, "{} at {now}", portfolio.id);
        }
    }
    // p1: 5 opens + 5 closes, p2: Saturday open, p5: Sunday's window still open at
    // Monday 00:00, then 7 opens and 7 closes
    assert_eq!(monitor.log().len(), 26);
}

#[test]
fn test_sample_schedules_at_key_instants() {
    let store = Arc::new(InMemoryStore::from_workspace(sample::sample_workspace().unwrap()).unwrap());
    let clock = Arc::new(SimulatedClock::new(at(3, 14, 30)));
    let mut monitor = BudgetMonitor::new(Arc::clone(&store), Arc::clone(&clock));

    // Wednesday afternoon: only the weekday boost is open
    monitor.run_pass().unwrap();
    assert_eq!(cap(&store, "p1"), 1000.0);
    assert_eq!(cap(&store, "p2"), 1200.0);
    assert_eq!(cap(&store, "p5"), 2000.0);

    // Thursday 01:00 belongs to Wednesday's evening window
    clock.set(at(4, 1, 0));
    monitor.run_pass().unwrap();
    assert_eq!(cap(&store, "p1"), 500.0);
    assert_eq!(cap(&store, "p5"), 3500.0);

    // Saturday noon: weekend schedule
    clock.set(at(6, 12, 0));
    monitor.run_pass().unwrap();
    assert_eq!(cap(&store, "p2"), 2000.0);
    assert_eq!(cap(&store, "p5"), 2000.0);

    let lines = monitor.log().lines();
    assert_eq!(
        lines[0],
        "[2024-01-06T12:00:00.000Z] Portfolio \"Kitchen Gadgets Core\": Changed budget from $1200 to $2000 (Weekend Warrior)"
    );
}

#[rstest]
#[case::wednesday_boost(at(3, 14, 30), 1000.0, 1200.0, 2000.0)]
#[case::thursday_after_midnight(at(4, 1, 0), 500.0, 1200.0, 3500.0)]
#[case::saturday_noon(at(6, 12, 0), 500.0, 2000.0, 2000.0)]
#[case::sunday_late(at(7, 23, 0), 500.0, 2000.0, 3500.0)]
#[case::monday_after_midnight(at(8, 0, 30), 500.0, 1200.0, 3500.0)]
fn test_single_pass_caps(
    #[case] instant: DateTime<Utc>,
    #[case] p1: f64,
    #[case] p2: f64,
    #[case] p5: f64,
) {
    let store = Arc::new(InMemoryStore::from_workspace(sample::sample_workspace().unwrap()).unwrap());
    let mut monitor = BudgetMonitor::new(Arc::clone(&store), SimulatedClock::new(instant));

    monitor.run_pass().unwrap();
    assert_eq!(cap(&store, "p1"), p1);
    assert_eq!(cap(&store, "p2"), p2);
    assert_eq!(cap(&store, "p3"), 300.0);
    assert_eq!(cap(&store, "p4"), 450.0);
    assert_eq!(cap(&store, "p5"), p5);
}

#[test]
fn test_account_scoped_monitor_leaves_others() {
    let store = Arc::new(InMemoryStore::from_workspace(sample::sample_workspace().unwrap()).unwrap());
    let clock = SimulatedClock::new(at(3, 23, 0));
    let config = MonitorConfig {
        account: Some("acc1".into()),
        ..MonitorConfig::default()
    };
    let mut monitor = BudgetMonitor::with_config(Arc::clone(&store), clock, config);

    let pass = monitor.run_pass().unwrap();
    assert_eq!(pass.evaluated, 2);
    assert!(pass.changes.is_empty());
    // p5 (acc3) has an open window but is out of scope
    assert_eq!(cap(&store, "p5"), 2000.0);
}

#[test]
fn test_per_account_totals_sum_to_global() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let records = sample::sample_records(today);
    let global = calculate_totals(&records);

    let mut spend = 0.0;
    let mut clicks = 0;
    for account in sample::sample_accounts() {
        let report = ReportBuilder::new()
            .account(account.id.as_str())
            .granularity(Granularity::Monthly)
            .build(&records);
        spend += report.totals.spend;
        clicks += report.totals.clicks;
    }
    assert_relative_eq!(spend, global.spend, epsilon = 1e-6);
    assert_eq!(clicks, global.clicks);
}

#[test]
fn test_ninety_day_report() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let records = sample::sample_records(today);
    let report = ReportBuilder::new()
        .range(DateRange::Last90Days, today)
        .granularity(Granularity::Weekly)
        .build(&records);

    assert_eq!(report.record_count, 91 * 10);
    assert!(report.series.windows(2).all(|w| w[0].period < w[1].period));
    assert!(report.totals.acos > 0.0);
}
