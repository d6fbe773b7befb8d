#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/optima-ads/optima/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod error;
pub mod export;
pub mod granularity;
pub mod label;
pub mod range;
pub mod ratio;
pub mod record;
pub mod report;
pub mod summary;
pub mod totals;

pub use aggregate::{ChartDataPoint, aggregate_by_granularity};
pub use error::{MetricsError, Result};
pub use export::{ExportError, ExportFormat, Exporter};
pub use granularity::{Granularity, week_start};
pub use label::format_period_label;
pub use range::{DateRange, filter_range};
pub use ratio::{ASSUMED_AVERAGE_ORDER_VALUE, estimated_orders, percent, ratio};
pub use record::{
    MetricSource, PerformanceRecord, load_records_csv, read_records_csv, records_for_account,
};
pub use report::{PerformanceReport, ReportBuilder};
pub use summary::{series_ascii_table, series_markdown};
pub use totals::{AggregatedMetrics, calculate_totals};
