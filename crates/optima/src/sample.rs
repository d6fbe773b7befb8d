//! Reproducible sample data: three accounts, five portfolios, three schedules and
//! generated daily performance records.

use crate::account::{Account, Marketplace};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use optima_budget::{BudgetSchedule, DaySet, NewSchedule, Portfolio, Result, Workspace};
use optima_metrics::PerformanceRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Days of history generated before "today" (inclusive of today: 101 days).
pub const DEFAULT_HISTORY_DAYS: u32 = 100;

/// Campaigns generated per portfolio.
pub const CAMPAIGNS_PER_PORTFOLIO: u32 = 2;

/// Seed used by [`sample_records`].
pub const DEFAULT_SEED: u64 = 42;

const WEEKEND_MULTIPLIER: f64 = 1.2;

/// Sample advertiser accounts.
pub fn sample_accounts() -> Vec<Account> {
    use Marketplace::*;

    vec![
        Account::new("acc1", "Alpha Brands US", "A123XYZ", UnitedStates),
        Account::new("acc2", "Alpha Brands UK", "B456ABC", UnitedKingdom),
        Account::new("acc3", "Omega Gadgets", "C789DEF", UnitedStates),
    ]
}

/// Sample portfolios, all at their default caps.
pub fn sample_portfolios() -> Vec<Portfolio> {
    vec![
        // acc1 (US)
        Portfolio::new("p1", "acc1", "Summer Clothing Launch", 500.0)
            .with_marketplace("US")
            .with_dayparting(true),
        Portfolio::new("p2", "acc1", "Kitchen Gadgets Core", 1200.0)
            .with_marketplace("US")
            .with_dayparting(true),
        // acc2 (UK)
        Portfolio::new("p3", "acc2", "Pet Supplies - UK", 300.0).with_marketplace("UK"),
        Portfolio::new("p4", "acc2", "Home Decor - UK", 450.0).with_marketplace("UK"),
        // acc3 (US)
        Portfolio::new("p5", "acc3", "Tech Accessories", 2000.0)
            .with_marketplace("US")
            .with_dayparting(true),
    ]
}

/// Sample schedules, in priority order.
///
/// # Errors
/// Never fails for the built-in definitions; the `Result` comes from schedule validation.
pub fn sample_schedules() -> Result<Vec<BudgetSchedule>> {
    let weekdays: Vec<u8> = DaySet::WEEKDAYS.indices().collect();
    let weekend: Vec<u8> = DaySet::WEEKEND.indices().collect();
    let every_day: Vec<u8> = DaySet::EVERY_DAY.indices().collect();

    Ok(vec![
        BudgetSchedule::create(
            "s1",
            NewSchedule::new("p1", "Morning Rush Boost", 1000.0, "13:00", "17:00", weekdays),
        )?,
        BudgetSchedule::create(
            "s2",
            NewSchedule::new("p2", "Weekend Warrior", 2000.0, "00:00", "23:59", weekend),
        )?,
        BudgetSchedule::create(
            "s3",
            NewSchedule::new("p5", "Evening Prime Time", 3500.0, "22:00", "02:00", every_day),
        )?,
    ])
}

/// Sample portfolios and schedules as one validated workspace.
///
/// # Errors
/// Propagates schedule or workspace validation errors.
pub fn sample_workspace() -> Result<Workspace> {
    let workspace = Workspace {
        portfolios: sample_portfolios(),
        schedules: sample_schedules()?,
    };
    workspace.validate()?;
    Ok(workspace)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Generate `days + 1` days of records ending at `today`, two campaigns per portfolio.
///
/// Weekend days carry 20% more impressions. Amounts are rounded to cents. The same
/// seed always produces the same records.
pub fn generate_performance_data(
    portfolios: &[Portfolio],
    today: NaiveDate,
    days: u32,
    rng: &mut StdRng,
) -> Vec<PerformanceRecord> {
    let mut records =
        Vec::with_capacity((days as usize + 1) * portfolios.len() * CAMPAIGNS_PER_PORTFOLIO as usize);

    for back in (0..=i64::from(days)).rev() {
        let date = today - Duration::days(back);
        let multiplier = if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            WEEKEND_MULTIPLIER
        } else {
            1.0
        };

        for portfolio in portfolios {
            for c in 1..=CAMPAIGNS_PER_PORTFOLIO {
                let base_impressions = 1000.0 + rng.gen_range(0.0..5000.0);
                let impressions = (base_impressions * multiplier).floor() as u64;
                let clicks = (impressions as f64 * rng.gen_range(0.005..0.015)).floor() as u64;
                let cpc = rng.gen_range(0.8..1.3);
                let spend = clicks as f64 * cpc;
                let orders = (clicks as f64 * rng.gen_range(0.05..0.15)).floor();
                let average_order_value = rng.gen_range(25.0..35.0);
                let ppc_sales = orders * average_order_value;
                let organic_sales = ppc_sales * rng.gen_range(0.5..2.0);

                records.push(
                    PerformanceRecord::new(
                        date,
                        portfolio.account_id.as_str(),
                        portfolio.id.as_str(),
                        format!("c_{}_{c}", portfolio.id),
                        format!("{} - Campaign {c}", portfolio.name),
                    )
                    .with_counts(impressions, clicks)
                    .with_amounts(
                        round_cents(spend),
                        round_cents(ppc_sales),
                        round_cents(ppc_sales + organic_sales),
                    ),
                );
            }
        }
    }

    records
}

/// Sample records for the sample portfolios with the default seed and history.
pub fn sample_records(today: NaiveDate) -> Vec<PerformanceRecord> {
    let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
    generate_performance_data(&sample_portfolios(), today, DEFAULT_HISTORY_DAYS, &mut rng)
}
