//! Print a weekly performance report for a small synthetic record set.
//!
//! Run with `cargo run -p optima-metrics --example report_demo`.

use chrono::{Duration, NaiveDate};
use optima_metrics::{DateRange, Granularity, PerformanceRecord, ReportBuilder};

fn main() {
    let Some(today) = NaiveDate::from_ymd_opt(2024, 3, 15) else {
        return;
    };

    let records: Vec<PerformanceRecord> = (0..45_i64)
        .map(|back| {
            let clicks = 20 + (back % 7) as u64 * 3;
            let spend = clicks as f64 * 0.85;
            PerformanceRecord::new(
                today - Duration::days(back),
                "acc1",
                "p1",
                "c_p1_1",
                "Summer Clothing Launch - Campaign 1",
            )
            .with_counts(2500 + back as u64 * 10, clicks)
            .with_amounts(spend, spend * 3.2, spend * 5.0)
        })
        .collect();

    let report = ReportBuilder::new()
        .account("acc1")
        .range(DateRange::Last30Days, today)
        .granularity(Granularity::Weekly)
        .build(&records);

    println!("{}", report.to_ascii());
    println!("{}", report.totals);
}
