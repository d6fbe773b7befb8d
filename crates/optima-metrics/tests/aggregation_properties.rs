//! Aggregation invariants over a multi-campaign record set.

use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate};
use optima_metrics::{
    DateRange, Granularity, PerformanceRecord, aggregate_by_granularity, calculate_totals,
    filter_range, format_period_label,
};
use rstest::rstest;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// 75 days, three campaigns, varied counters with some zero-click days.
fn records() -> Vec<PerformanceRecord> {
    let mut out = Vec::new();
    for day in 0..75_i64 {
        for c in 0..3_u64 {
            let seed = day as u64 * 7 + c * 13;
            let clicks = if seed % 11 == 0 { 0 } else { 5 + seed % 40 };
            let spend = clicks as f64 * (0.5 + (seed % 5) as f64 * 0.25);
            let ppc_sales = if clicks == 0 { 0.0 } else { spend * (2.0 + (seed % 3) as f64) };
            out.push(
                PerformanceRecord::new(
                    start() + Duration::days(day),
                    if c == 2 { "acc2" } else { "acc1" },
                    format!("p{c}"),
                    format!("c_p{c}_1"),
                    format!("Campaign {c}"),
                )
                .with_counts(1000 + seed * 17, clicks)
                .with_amounts(spend, ppc_sales, ppc_sales * 1.8 + 10.0),
            );
        }
    }
    out
}

#[rstest]
#[case(Granularity::Daily)]
#[case(Granularity::Weekly)]
#[case(Granularity::Monthly)]
fn test_bucket_totals_match_record_totals(#[case] granularity: Granularity) {
    let records = records();
    let from_records = calculate_totals(&records);
    let from_series = calculate_totals(&aggregate_by_granularity(&records, granularity));

    assert_eq!(from_series.impressions, from_records.impressions);
    assert_eq!(from_series.clicks, from_records.clicks);
    assert_relative_eq!(from_series.spend, from_records.spend, epsilon = 1e-6);
    assert_relative_eq!(from_series.total_sales, from_records.total_sales, epsilon = 1e-6);
    assert_relative_eq!(from_series.acos, from_records.acos, epsilon = 1e-9);
    assert_relative_eq!(from_series.tacos, from_records.tacos, epsilon = 1e-9);
    assert_relative_eq!(from_series.cvr, from_records.cvr, epsilon = 1e-9);
}

#[rstest]
#[case(Granularity::Daily, 75)]
#[case(Granularity::Weekly, 11)]
#[case(Granularity::Monthly, 3)]
fn test_series_is_sorted_and_order_independent(
    #[case] granularity: Granularity,
    #[case] buckets: usize,
) {
    let records = records();
    let mut shuffled = records.clone();
    shuffled.reverse();
    shuffled.rotate_left(40);

    let series = aggregate_by_granularity(&records, granularity);
    assert_eq!(series.len(), buckets);
    assert!(series.windows(2).all(|w| w[0].period < w[1].period));
    let reordered = aggregate_by_granularity(&shuffled, granularity);
    assert_eq!(reordered.len(), series.len());
    for (a, b) in reordered.iter().zip(&series) {
        assert_eq!(a.period, b.period);
        assert_eq!(a.impressions, b.impressions);
        assert_eq!(a.clicks, b.clicks);
        assert_relative_eq!(a.spend, b.spend, epsilon = 1e-9);
        assert_relative_eq!(a.sales, b.sales, epsilon = 1e-9);
        assert_relative_eq!(a.ppc_sales, b.ppc_sales, epsilon = 1e-9);
        assert_relative_eq!(a.orders, b.orders, epsilon = 1e-9);
        assert_relative_eq!(a.acos, b.acos, epsilon = 1e-9);
        assert_relative_eq!(a.tacos, b.tacos, epsilon = 1e-9);
        assert_relative_eq!(a.ctr, b.ctr, epsilon = 1e-9);
        assert_relative_eq!(a.cvr, b.cvr, epsilon = 1e-9);
        assert_relative_eq!(a.cpc, b.cpc, epsilon = 1e-9);
    }
}

#[test]
fn test_weekly_buckets_start_on_sunday() {
    let series = aggregate_by_granularity(&records(), Granularity::Weekly);
    // 2024-01-01 is a Monday
    assert_eq!(series[0].period, "2023-12-31");
    for point in &series {
        let label = format_period_label(&point.period, Granularity::Weekly).unwrap();
        assert!(label.starts_with("Week of "));
    }
}

#[test]
fn test_zero_click_bucket_has_zero_rates() {
    let records = records();
    let zero_day: Vec<_> = records.iter().filter(|r| r.clicks == 0).cloned().take(1).collect();
    let series = aggregate_by_granularity(&zero_day, Granularity::Daily);
    assert_eq!(series[0].cvr, 0.0);
    assert_eq!(series[0].cpc, 0.0);
    assert_eq!(series[0].acos, 0.0);
    assert_eq!(series[0].spend, 0.0);
    assert_eq!(series[0].tacos, 0.0);
}

#[test]
fn test_range_then_aggregate() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let scoped = filter_range(&records(), DateRange::ThisMonth, today);
    assert_eq!(scoped.len(), 15 * 3);

    let monthly = aggregate_by_granularity(&scoped, Granularity::Monthly);
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].period, "2024-03");
}

#[test]
fn test_empty_input() {
    assert!(aggregate_by_granularity(&[], Granularity::Weekly).is_empty());
    let totals = calculate_totals(Vec::<PerformanceRecord>::new());
    assert_eq!(totals.clicks, 0);
    assert_eq!(totals.acos, 0.0);
    assert_eq!(totals.ppc_percent_of_sales, 0.0);
}
