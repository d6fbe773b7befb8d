//! Human-readable labels for bucket keys.

use crate::error::{MetricsError, Result};
use crate::granularity::Granularity;
use chrono::NaiveDate;

/// Format a bucket key for display.
///
/// Daily keys become `Jan 5`, weekly keys `Week of Jan 5` and monthly keys
/// `January 2024`.
pub fn format_period_label(period: &str, granularity: Granularity) -> Result<String> {
    let invalid = || MetricsError::InvalidPeriod(period.to_string());

    match granularity {
        Granularity::Daily | Granularity::Weekly => {
            let date = NaiveDate::parse_from_str(period, "%Y-%m-%d").map_err(|_| invalid())?;
            let day = date.format("%b %-d").to_string();
            Ok(if granularity == Granularity::Weekly {
                format!("Week of {day}")
            } else {
                day
            })
        }
        Granularity::Monthly => {
            let date = NaiveDate::parse_from_str(&format!("{period}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            Ok(date.format("%B %Y").to_string())
        }
    }
}
