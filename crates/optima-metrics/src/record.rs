//! Raw daily performance records.

use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Counters that can be summed into aggregated metrics.
///
/// Implemented by raw records and by already-bucketed points, so range-wide totals
/// can be computed from either.
pub trait MetricSource {
    /// Ad impressions.
    fn impressions(&self) -> u64;
    /// Ad clicks.
    fn clicks(&self) -> u64;
    /// Ad spend.
    fn spend(&self) -> f64;
    /// Sales attributed to ads.
    fn ppc_sales(&self) -> f64;
    /// All sales, attributed or organic.
    fn total_sales(&self) -> f64;
}

impl<T: MetricSource + ?Sized> MetricSource for &T {
    fn impressions(&self) -> u64 {
        (**self).impressions()
    }
    fn clicks(&self) -> u64 {
        (**self).clicks()
    }
    fn spend(&self) -> f64 {
        (**self).spend()
    }
    fn ppc_sales(&self) -> f64 {
        (**self).ppc_sales()
    }
    fn total_sales(&self) -> f64 {
        (**self).total_sales()
    }
}

/// One campaign's performance on one day. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    /// Calendar day of the record.
    pub date: NaiveDate,
    /// Advertiser account.
    #[serde(alias = "amazonAccountId")]
    pub account_id: String,
    /// Portfolio the campaign belongs to.
    pub portfolio_id: String,
    /// Campaign identifier.
    pub campaign_id: String,
    /// Campaign display name.
    pub campaign_name: String,
    /// Ad impressions.
    pub impressions: u64,
    /// Ad clicks.
    pub clicks: u64,
    /// Ad spend.
    pub spend: f64,
    /// Sales attributed to ads.
    pub ppc_sales: f64,
    /// All sales.
    pub total_sales: f64,
}

impl PerformanceRecord {
    /// Create a record with zeroed counters.
    pub fn new(
        date: NaiveDate,
        account_id: impl Into<String>,
        portfolio_id: impl Into<String>,
        campaign_id: impl Into<String>,
        campaign_name: impl Into<String>,
    ) -> Self {
        Self {
            date,
            account_id: account_id.into(),
            portfolio_id: portfolio_id.into(),
            campaign_id: campaign_id.into(),
            campaign_name: campaign_name.into(),
            impressions: 0,
            clicks: 0,
            spend: 0.0,
            ppc_sales: 0.0,
            total_sales: 0.0,
        }
    }

    /// Set impressions and clicks.
    pub const fn with_counts(mut self, impressions: u64, clicks: u64) -> Self {
        self.impressions = impressions;
        self.clicks = clicks;
        self
    }

    /// Set spend, PPC sales and total sales.
    pub const fn with_amounts(mut self, spend: f64, ppc_sales: f64, total_sales: f64) -> Self {
        self.spend = spend;
        self.ppc_sales = ppc_sales;
        self.total_sales = total_sales;
        self
    }
}

impl MetricSource for PerformanceRecord {
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
        self.total_sales
    }
}

/// Records belonging to one account.
pub fn records_for_account<'a>(
    records: &'a [PerformanceRecord],
    account_id: &'a str,
) -> impl Iterator<Item = &'a PerformanceRecord> {
    records.iter().filter(move |r| r.account_id == account_id)
}

/// Read records from CSV with a header row of camelCase field names.
pub fn read_records_csv<R: Read>(reader: R) -> Result<Vec<PerformanceRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let records = rdr.deserialize().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Read records from a CSV file.
pub fn load_records_csv<P: AsRef<Path>>(path: P) -> Result<Vec<PerformanceRecord>> {
    let file = std::fs::File::open(path)?;
    read_records_csv(std::io::BufReader::new(file))
}
