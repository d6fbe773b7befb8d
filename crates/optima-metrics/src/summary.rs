//! Text rendering of summary metrics and series.

use crate::aggregate::ChartDataPoint;
use crate::granularity::Granularity;
use crate::label::format_period_label;
use crate::totals::AggregatedMetrics;
use std::fmt;

impl AggregatedMetrics {
    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self, title: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{title}\n"));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("  Spend:                  ${:.2}\n", self.spend));
        output.push_str(&format!("  PPC Sales:              ${:.2}\n", self.ppc_sales));
        output.push_str(&format!(
            "  Total Sales:            ${:.2} ({:.1}% from PPC)\n",
            self.total_sales, self.ppc_percent_of_sales
        ));
        output.push_str(&format!("  Impressions:            {}\n", self.impressions));
        output.push_str(&format!("  Clicks:                 {}\n", self.clicks));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!("  ACoS:                   {:.2}%\n", self.acos));
        output.push_str(&format!("  TaCoS:                  {:.2}%\n", self.tacos));
        output.push_str(&format!("  CTR:                    {:.2}%\n", self.ctr));
        output.push_str(&format!("  CVR (est.):             {:.2}%\n", self.cvr));
        output.push_str(&format!("  CPC:                    ${:.2}\n", self.cpc()));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output
    }

    /// Format as Markdown.
    pub fn to_markdown(&self, title: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {title}\n\n"));
        output.push_str("## Key Metrics\n\n");
        output.push_str(&format!("- **Spend:** ${:.2}\n", self.spend));
        output.push_str(&format!("- **PPC Sales:** ${:.2}\n", self.ppc_sales));
        output.push_str(&format!(
            "- **Total Sales:** ${:.2} ({:.1}% from PPC)\n",
            self.total_sales, self.ppc_percent_of_sales
        ));
        output.push_str(&format!("- **ACoS:** {:.2}%\n", self.acos));
        output.push_str(&format!("- **TaCoS:** {:.2}%\n", self.tacos));
        output.push_str(&format!("- **CTR:** {:.2}%\n", self.ctr));
        output.push_str(&format!("- **CVR (est.):** {:.2}%\n", self.cvr));

        output
    }
}

impl fmt::Display for AggregatedMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "spend ${:.2}, sales ${:.2}, ACoS {:.2}%, TaCoS {:.2}%, CTR {:.2}%, CVR {:.2}%",
            self.spend, self.total_sales, self.acos, self.tacos, self.ctr, self.cvr
        )
    }
}

/// Label for a point, falling back to the raw key if it cannot be parsed.
fn label(point: &ChartDataPoint, granularity: Granularity) -> String {
    format_period_label(&point.period, granularity).unwrap_or_else(|_| point.period.clone())
}

/// Format a series as an ASCII table, one row per bucket.
pub fn series_ascii_table(series: &[ChartDataPoint], granularity: Granularity) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<18} {:>10} {:>12} {:>12} {:>8} {:>8} {:>7} {:>7} {:>6}\n",
        "Period", "Spend", "PPC Sales", "Sales", "ACoS", "TaCoS", "CTR", "CVR", "CPC"
    ));
    output.push_str(&"-".repeat(98));
    output.push('\n');

    for point in series {
        output.push_str(&format!(
            "{:<18} {:>10.2} {:>12.2} {:>12.2} {:>7.2}% {:>7.2}% {:>6.2}% {:>6.2}% {:>6.2}\n",
            label(point, granularity),
            point.spend,
            point.ppc_sales,
            point.sales,
            point.acos,
            point.tacos,
            point.ctr,
            point.cvr,
            point.cpc
        ));
    }

    output
}

/// Format a series as a Markdown table.
pub fn series_markdown(series: &[ChartDataPoint], granularity: Granularity) -> String {
    let mut output = String::new();

    output.push_str("| Period | Spend | PPC Sales | Sales | ACoS | TaCoS | CTR | CVR |\n");
    output.push_str("|--------|-------|-----------|-------|------|-------|-----|-----|\n");
    for point in series {
        output.push_str(&format!(
            "| {} | ${:.2} | ${:.2} | ${:.2} | {:.2}% | {:.2}% | {:.2}% | {:.2}% |\n",
            label(point, granularity),
            point.spend,
            point.ppc_sales,
            point.sales,
            point.acos,
            point.tacos,
            point.ctr,
            point.cvr
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_by_granularity;
    use crate::record::PerformanceRecord;
    use crate::totals::calculate_totals;
    use chrono::NaiveDate;

    fn records() -> Vec<PerformanceRecord> {
        vec![
            PerformanceRecord::new(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(), "acc1", "p1", "c1", "C1")
                .with_counts(1000, 20)
                .with_amounts(20.0, 100.0, 200.0),
        ]
    }

    #[test]
    fn test_metrics_ascii_table() {
        let table = calculate_totals(&records()).to_ascii_table("Last 30 Days");
        assert!(table.contains("Last 30 Days"));
        assert!(table.contains("ACoS:                   20.00%"));
        assert!(table.contains("$200.00 (50.0% from PPC)"));
    }

    #[test]
    fn test_metrics_markdown() {
        let md = calculate_totals(&records()).to_markdown("Report");
        assert!(md.contains("# Report"));
        assert!(md.contains("- **TaCoS:** 10.00%"));
    }

    #[test]
    fn test_metrics_display() {
        let text = calculate_totals(&records()).to_string();
        assert!(text.contains("ACoS 20.00%"));
    }

    #[test]
    fn test_series_tables_use_labels() {
        let series = aggregate_by_granularity(&records(), Granularity::Weekly);
        let table = series_ascii_table(&series, Granularity::Weekly);
        assert!(table.contains("Week of Dec 31"));

        let md = series_markdown(&series, Granularity::Weekly);
        assert!(md.contains("| Week of Dec 31 | $20.00 |"));
    }
}
