//! Range-wide summary metrics.

use crate::ratio::{ASSUMED_AVERAGE_ORDER_VALUE, percent, ratio};
use crate::record::MetricSource;
use serde::{Deserialize, Serialize};

/// Summed counters and efficiency ratios over a set of records or buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedMetrics {
    /// Total impressions.
    pub impressions: u64,
    /// Total clicks.
    pub clicks: u64,
    /// Total ad spend.
    pub spend: f64,
    /// Total PPC sales.
    pub ppc_sales: f64,
    /// Total sales.
    pub total_sales: f64,
    /// Spend / PPC sales, percent.
    pub acos: f64,
    /// Spend / total sales, percent.
    pub tacos: f64,
    /// Clicks / impressions, percent.
    pub ctr: f64,
    /// Estimated orders / clicks, percent.
    pub cvr: f64,
    /// PPC sales / total sales, percent.
    pub ppc_percent_of_sales: f64,
}

impl AggregatedMetrics {
    /// Estimated orders (`ppc_sales / 25`).
    pub fn estimated_orders(&self) -> f64 {
        self.ppc_sales / ASSUMED_AVERAGE_ORDER_VALUE
    }

    /// Cost per click.
    pub fn cpc(&self) -> f64 {
        ratio(self.spend, self.clicks as f64)
    }

    /// Sales not attributed to ads.
    pub fn organic_sales(&self) -> f64 {
        (self.total_sales - self.ppc_sales).max(0.0)
    }
}

/// Sum counters across `items` and derive ratios from the sums.
///
/// Accepts raw records or bucketed points; totals over daily buckets equal totals
/// over the records they were built from. Empty input yields all zeros.
pub fn calculate_totals<I>(items: I) -> AggregatedMetrics
where
    I: IntoIterator,
    I::Item: MetricSource,
{
    let mut m = items
        .into_iter()
        .fold(AggregatedMetrics::default(), |mut acc, item| {
            acc.impressions += item.impressions();
            acc.clicks += item.clicks();
            acc.spend += item.spend();
            acc.ppc_sales += item.ppc_sales();
            acc.total_sales += item.total_sales();
            acc
        });

    let clicks = m.clicks as f64;
    m.acos = percent(m.spend, m.ppc_sales);
    m.tacos = percent(m.spend, m.total_sales);
    m.ctr = percent(clicks, m.impressions as f64);
    m.cvr = percent(m.ppc_sales / ASSUMED_AVERAGE_ORDER_VALUE, clicks);
    m.ppc_percent_of_sales = percent(m.ppc_sales, m.total_sales);
    m
}
