//! Performance reports: scoped totals plus a bucketed series.

use crate::aggregate::{ChartDataPoint, aggregate_by_granularity};
use crate::export::ExportError;
use crate::granularity::Granularity;
use crate::range::{DateRange, filter_range};
use crate::record::PerformanceRecord;
use crate::summary::{series_ascii_table, series_markdown};
use crate::totals::{AggregatedMetrics, calculate_totals};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A performance report over one account (or all accounts) and one date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    /// Report title.
    pub title: String,

    /// Account scope, `None` for all accounts.
    pub account_id: Option<String>,

    /// Date range the records were filtered to.
    pub range: Option<DateRange>,

    /// First day covered.
    pub period_start: Option<NaiveDate>,

    /// Last day covered.
    pub period_end: Option<NaiveDate>,

    /// Bucket size of `series`.
    pub granularity: Granularity,

    /// Report generation timestamp.
    pub generated_at: DateTime<Utc>,

    /// Number of records in scope.
    pub record_count: usize,

    /// Totals over every record in scope.
    pub totals: AggregatedMetrics,

    /// Bucketed series, ascending by period.
    pub series: Vec<ChartDataPoint>,
}

impl PerformanceReport {
    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn heading(&self) -> String {
        let mut heading = self.title.clone();
        if let Some(account) = &self.account_id {
            heading.push_str(&format!(" [{account}]"));
        }
        if let (Some(start), Some(end)) = (self.period_start, self.period_end) {
            heading.push_str(&format!(" {start} to {end}"));
        }
        heading
    }

    /// Format as ASCII tables for terminal display.
    pub fn to_ascii(&self) -> String {
        let mut output = self.totals.to_ascii_table(&self.heading());
        output.push('\n');
        output.push_str(&format!("{} breakdown\n", capitalize(self.granularity.name())));
        output.push_str(&series_ascii_table(&self.series, self.granularity));
        output
    }

    /// Format as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut output = self.totals.to_markdown(&self.heading());
        output.push_str(&format!(
            "\n## {} Breakdown\n\n",
            capitalize(self.granularity.name())
        ));
        output.push_str(&series_markdown(&self.series, self.granularity));
        output.push_str(&format!(
            "\n*Generated {} from {} records*\n",
            self.generated_at.format("%Y-%m-%d %H:%M UTC"),
            self.record_count
        ));
        output
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    title: Option<String>,
    account_id: Option<String>,
    range: Option<(DateRange, NaiveDate)>,
    granularity: Granularity,
    generated_at: Option<DateTime<Utc>>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Restrict to one account.
    pub fn account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Restrict to a date range relative to `today`.
    pub const fn range(mut self, range: DateRange, today: NaiveDate) -> Self {
        self.range = Some((range, today));
        self
    }

    /// Set the series granularity.
    pub const fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Fix the generation timestamp.
    pub const fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Build the report from `records`, applying account and range scope.
    pub fn build(self, records: &[PerformanceRecord]) -> PerformanceReport {
        let scoped: Vec<PerformanceRecord> = match &self.account_id {
            Some(account) => records
                .iter()
                .filter(|r| &r.account_id == account)
                .cloned()
                .collect(),
            None => records.to_vec(),
        };

        let (scoped, period_start, period_end) = match self.range {
            Some((range, today)) => {
                let (start, end) = range.bounds(today);
                (filter_range(&scoped, range, today), Some(start), Some(end))
            }
            None => {
                let start = scoped.iter().map(|r| r.date).min();
                let end = scoped.iter().map(|r| r.date).max();
                (scoped, start, end)
            }
        };

        let title = self.title.unwrap_or_else(|| match self.range {
            Some((range, _)) => format!("Performance: {range}"),
            None => "Performance".to_string(),
        });

        PerformanceReport {
            title,
            account_id: self.account_id,
            range: self.range.map(|(range, _)| range),
            period_start,
            period_end,
            granularity: self.granularity,
            generated_at: self.generated_at.unwrap_or_else(Utc::now),
            record_count: scoped.len(),
            totals: calculate_totals(&scoped),
            series: aggregate_by_granularity(&scoped, self.granularity),
        }
    }
}
