//! Bucketing of raw records into chart series.
//!
//! Counters are summed per bucket first; rates are then derived from the bucket
//! totals. Pre-computed rates are never averaged.

use crate::granularity::Granularity;
use crate::ratio::{estimated_orders, percent, ratio};
use crate::record::{MetricSource, PerformanceRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One bucket of an aggregated series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataPoint {
    /// Bucket key: `YYYY-MM-DD` for days and week starts, `YYYY-MM` for months.
    #[serde(rename = "date", alias = "period")]
    pub period: String,
    /// Summed ad spend.
    pub spend: f64,
    /// Summed total sales.
    pub sales: f64,
    /// Summed PPC sales.
    pub ppc_sales: f64,
    /// Summed impressions.
    pub impressions: u64,
    /// Summed clicks.
    pub clicks: u64,
    /// Estimated orders (`ppc_sales / 25`).
    pub orders: f64,
    /// Advertising cost of sales, percent.
    pub acos: f64,
    /// Total advertising cost of sales, percent.
    pub tacos: f64,
    /// Click-through rate, percent.
    pub ctr: f64,
    /// Conversion rate, percent.
    pub cvr: f64,
    /// Cost per click.
    pub cpc: f64,
}

#[derive(Debug, Default)]
struct Totals {
    impressions: u64,
    clicks: u64,
    spend: f64,
    ppc_sales: f64,
    sales: f64,
}

impl Totals {
    fn add<T: MetricSource>(&mut self, item: &T) {
        self.impressions += item.impressions();
        self.clicks += item.clicks();
        self.spend += item.spend();
        self.ppc_sales += item.ppc_sales();
        self.sales += item.total_sales();
    }

    fn into_point(self, period: String) -> ChartDataPoint {
        let orders = estimated_orders(self.ppc_sales);
        let clicks = self.clicks as f64;
        ChartDataPoint {
            period,
            spend: self.spend,
            sales: self.sales,
            ppc_sales: self.ppc_sales,
            impressions: self.impressions,
            clicks: self.clicks,
            orders,
            acos: percent(self.spend, self.ppc_sales),
            tacos: percent(self.spend, self.sales),
            ctr: percent(clicks, self.impressions as f64),
            cvr: percent(orders, clicks),
            cpc: ratio(self.spend, clicks),
        }
    }
}

/// Aggregate records into buckets of the given granularity, ascending by key.
///
/// Input order does not matter. An empty input yields an empty series.
pub fn aggregate_by_granularity(
    records: &[PerformanceRecord],
    granularity: Granularity,
) -> Vec<ChartDataPoint> {
    let mut buckets: BTreeMap<String, Totals> = BTreeMap::new();

    for record in records {
        buckets
            .entry(granularity.bucket_key(record.date))
            .or_default()
            .add(record);
    }

    buckets
        .into_iter()
        .map(|(period, totals)| totals.into_point(period))
        .collect()
}

impl MetricSource for ChartDataPoint {
    fn impressions(&self) -> u64 {
        self.impressions
    }
    fn clicks(&self) -> u64 {
        self.clicks
    }
    fn spend(&self) -> f64 {
        self.spend
    }
    fn ppc_sales(&self) -> f64 {
        self.ppc_sales
    }
    fn total_sales(&self) -> f64 {
        self.sales
    }
}
