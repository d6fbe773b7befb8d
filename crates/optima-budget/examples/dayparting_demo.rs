//! Walks a simulated Wednesday through the reconciliation job.
//!
//! Run with: `cargo run -p optima-budget --example dayparting_demo`

use chrono::{TimeZone, Utc};
use optima_budget::{
    BudgetMonitor, InMemoryStore, NewSchedule, Portfolio, PortfolioRepository, SimulatedClock,
};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(InMemoryStore::new());
    store.insert_portfolio(Portfolio::new("p1", "acc1", "Summer Clothing Launch", 500.0))?;
    store.insert_portfolio(Portfolio::new("p5", "acc3", "Tech Accessories", 2000.0))?;
    store.create_schedule(NewSchedule::new(
        "p1",
        "Morning Rush Boost",
        1000.0,
        "13:00",
        "17:00",
        vec![1, 2, 3, 4, 5],
    ))?;
    store.create_schedule(NewSchedule::new(
        "p5",
        "Evening Prime Time",
        3500.0,
        "22:00",
        "02:00",
        (0..7).collect(),
    ))?;

    let start = Utc
        .with_ymd_and_hms(2024, 1, 3, 0, 0, 0)
        .single()
        .ok_or("invalid start time")?;
    let clock = Arc::new(SimulatedClock::new(start));
    let mut monitor = BudgetMonitor::new(store.clone(), clock.clone());

    println!("Simulating 24 hours in 15 minute steps...\n");
    for _ in 0..96 {
        for change in monitor.run_pass()?.changes {
            println!("{change}");
        }
        clock.tick();
    }

    println!("\nFinal caps:");
    for portfolio in store.list_portfolios()? {
        println!("  {portfolio}");
    }
    Ok(())
}
