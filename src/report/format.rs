//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - aggregation code stays clean and testable
//! - output changes are localized (golden tests below)

use crate::domain::{DailyPoint, RegionFilter};
use crate::io::ingest::IngestReport;
use crate::report::{DatasetStats, PriceImpact};

/// Per-source table printed after `sales ingest`.
pub fn format_ingest_report(report: &IngestReport) -> String {
    let mut out = String::new();
    out.push_str("=== sales ingest ===\n");
    out.push_str(&format!("{:<40} {:>10} {:>10}\n", "source", "rows", "kept"));
    for s in &report.sources {
        out.push_str(&format!(
            "{:<40} {:>10} {:>10}\n",
            s.path.display(),
            s.rows_read,
            s.rows_kept
        ));
    }
    out.push_str(&format!(
        "Wrote {} row(s) to {}\n",
        report.rows_written,
        report.output.display()
    ));
    out
}

/// Dataset stats + key findings for one region selection.
pub fn format_summary(filter: RegionFilter, stats: &DatasetStats, impact: &PriceImpact) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Pink Morsel Sales ({}) ===\n", filter.display_name()));
    let range = match (stats.first_date, stats.last_date) {
        (Some(a), Some(b)) => format!("[{a}, {b}]"),
        _ => "-".to_string(),
    };
    out.push_str(&format!(
        "Rows: n={} | days={} | range={range}\n",
        stats.rows, stats.days
    ));
    out.push_str(&format!("Total sales: {}\n", fmt_money(stats.total_sales)));
    out.push('\n');
    for line in findings_lines(impact) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Key-finding lines shared by `sales summary` and the dashboard panel.
pub fn findings_lines(impact: &PriceImpact) -> Vec<String> {
    let mut lines = vec![format!("Price increase: {}", impact.event_date)];
    lines.push(format!(
        "Before: {} avg/day over {} day(s)",
        impact.before_avg.map(fmt_money).unwrap_or_else(|| "-".to_string()),
        impact.before_days
    ));
    lines.push(format!(
        "After:  {} avg/day over {} day(s)",
        impact.after_avg.map(fmt_money).unwrap_or_else(|| "-".to_string()),
        impact.after_days
    ));
    lines.push(match impact.change_pct {
        Some(pct) => format!("Change: {pct:+.1}%"),
        None => "Change: n/a".to_string(),
    });
    lines
}

/// `date  sales` table, one line per aggregate point.
pub fn format_daily_table(series: &[DailyPoint]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<12} {:>14}\n", "date", "sales"));
    for p in series {
        out.push_str(&format!("{:<12} {:>14}\n", p.date.to_string(), fmt_money(p.sales)));
    }
    out
}

/// `$1,234.50` style formatting.
pub fn fmt_money(v: f64) -> String {
    let sign = if v < 0.0 { "-" } else { "" };
    let cents = format!("{:.2}", v.abs());
    let (int_part, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{frac}")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use super::*;
    use crate::io::ingest::SourceReport;
    use crate::report::price_impact;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn money_grouping() {
        assert_eq!(fmt_money(0.0), "$0.00");
        assert_eq!(fmt_money(6.0), "$6.00");
        assert_eq!(fmt_money(999.999), "$1,000.00");
        assert_eq!(fmt_money(1234567.5), "$1,234,567.50");
        assert_eq!(fmt_money(-42.1), "-$42.10");
    }

    #[test]
    fn summary_golden() {
        let series = vec![
            DailyPoint { date: ymd(2021, 1, 14), sales: 6400.0 },
            DailyPoint { date: ymd(2021, 1, 15), sales: 9216.0 },
        ];
        let stats = DatasetStats {
            rows: 4,
            days: 2,
            first_date: Some(ymd(2021, 1, 14)),
            last_date: Some(ymd(2021, 1, 15)),
            total_sales: 15616.0,
        };
        let impact = price_impact(&series, ymd(2021, 1, 15));
        let txt = format_summary(RegionFilter::North, &stats, &impact);
        let expected = concat!(
            "=== Pink Morsel Sales (North) ===\n",
            "Rows: n=4 | days=2 | range=[2021-01-14, 2021-01-15]\n",
            "Total sales: $15,616.00\n",
            "\n",
            "Price increase: 2021-01-15\n",
            "Before: $6,400.00 avg/day over 1 day(s)\n",
            "After:  $9,216.00 avg/day over 1 day(s)\n",
            "Change: +44.0%\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn ingest_report_lists_sources() {
        let report = IngestReport {
            sources: vec![SourceReport {
                path: PathBuf::from("a.csv"),
                rows_read: 10,
                rows_kept: 4,
            }],
            rows_written: 4,
            output: PathBuf::from("output.csv"),
        };
        let txt = format_ingest_report(&report);
        assert!(txt.contains("a.csv"));
        assert!(txt.ends_with("Wrote 4 row(s) to output.csv\n"));
    }

    #[test]
    fn daily_table_has_header_and_rows() {
        let txt = format_daily_table(&[DailyPoint { date: ymd(2021, 1, 10), sales: 6.0 }]);
        let lines: Vec<_> = txt.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("2021-01-10"));
        assert!(lines[1].ends_with("$6.00"));
    }
}
