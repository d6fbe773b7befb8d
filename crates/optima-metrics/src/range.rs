//! Reporting date ranges.

use crate::error::MetricsError;
use crate::record::PerformanceRecord;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A reporting window relative to "today".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    /// Today and the seven days before it.
    #[serde(rename = "last-7-days")]
    Last7Days,
    /// Today and the thirty days before it.
    #[default]
    #[serde(rename = "last-30-days")]
    Last30Days,
    /// First of the current month through today.
    #[serde(rename = "this-month")]
    ThisMonth,
    /// The whole previous calendar month.
    #[serde(rename = "last-month")]
    LastMonth,
    /// Today and the ninety days before it.
    #[serde(rename = "last-90-days")]
    Last90Days,
}

impl DateRange {
    /// All ranges.
    pub const fn all() -> [Self; 5] {
        [
            Self::Last7Days,
            Self::Last30Days,
            Self::ThisMonth,
            Self::LastMonth,
            Self::Last90Days,
        ]
    }

    /// Short identifier, as accepted by [`FromStr`].
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Last7Days => "last-7-days",
            Self::Last30Days => "last-30-days",
            Self::ThisMonth => "this-month",
            Self::LastMonth => "last-month",
            Self::Last90Days => "last-90-days",
        }
    }

    /// Inclusive `(start, end)` dates of the window.
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Last7Days => (today - Duration::days(7), today),
            Self::Last30Days => (today - Duration::days(30), today),
            Self::Last90Days => (today - Duration::days(90), today),
            Self::ThisMonth => (first_of_month(today), today),
            Self::LastMonth => {
                let end = first_of_month(today) - Duration::days(1);
                (first_of_month(end), end)
            }
        }
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        let (start, end) = self.bounds(today);
        start <= date && date <= end
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Last7Days => "Last 7 Days",
            Self::Last30Days => "Last 30 Days",
            Self::ThisMonth => "This Month",
            Self::LastMonth => "Last Month",
            Self::Last90Days => "Last 90 Days",
        };
        write!(f, "{label}")
    }
}

impl FromStr for DateRange {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "last-7-days" | "7d" => Ok(Self::Last7Days),
            "last-30-days" | "30d" => Ok(Self::Last30Days),
            "this-month" | "mtd" => Ok(Self::ThisMonth),
            "last-month" => Ok(Self::LastMonth),
            "last-90-days" | "90d" => Ok(Self::Last90Days),
            _ => Err(MetricsError::UnknownRange(s.to_string())),
        }
    }
}

/// Records inside `range`, sorted by date.
pub fn filter_range(
    records: &[PerformanceRecord],
    range: DateRange,
    today: NaiveDate,
) -> Vec<PerformanceRecord> {
    let mut filtered: Vec<PerformanceRecord> = records
        .iter()
        .filter(|r| range.contains(r.date, today))
        .cloned()
        .collect();
    filtered.sort_by_key(|r| r.date);
    filtered
}
