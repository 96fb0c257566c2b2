//! Reporting utilities: daily aggregates, dataset stats and price-impact
//! findings, plus formatted terminal output (`format`).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DailyPoint, RegionFilter, SalesRecord};

pub mod format;

pub use format::*;

/// Group by date and sum sales over the rows matching `filter`.
///
/// One point per distinct date present in the filtered rows, ascending.
/// Dates with no matching rows are absent (no zero fill).
pub fn daily_aggregate(records: &[SalesRecord], filter: RegionFilter) -> Vec<DailyPoint> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for r in records.iter().filter(|r| filter.matches(r.region)) {
        *by_date.entry(r.date).or_insert(0.0) += r.sales;
    }
    by_date
        .into_iter()
        .map(|(date, sales)| DailyPoint { date, sales })
        .collect()
}

/// Summary stats about the rows behind one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub rows: usize,
    pub days: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub total_sales: f64,
}

pub fn dataset_stats(records: &[SalesRecord], series: &[DailyPoint], filter: RegionFilter) -> DatasetStats {
    let rows = records.iter().filter(|r| filter.matches(r.region)).count();
    DatasetStats {
        rows,
        days: series.len(),
        first_date: series.first().map(|p| p.date),
        last_date: series.last().map(|p| p.date),
        total_sales: series.iter().map(|p| p.sales).sum(),
    }
}

/// Average daily sales before vs. after the price increase.
///
/// "Before" is strictly earlier than the event date; the event day itself
/// counts as "after".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceImpact {
    pub event_date: NaiveDate,
    pub before_days: usize,
    pub after_days: usize,
    pub before_avg: Option<f64>,
    pub after_avg: Option<f64>,
    /// Relative change of the daily average, in percent.
    pub change_pct: Option<f64>,
}

pub fn price_impact(series: &[DailyPoint], event_date: NaiveDate) -> PriceImpact {
    let (before, after): (Vec<&DailyPoint>, Vec<&DailyPoint>) =
        series.iter().partition(|p| p.date < event_date);

    let avg = |pts: &[&DailyPoint]| {
        if pts.is_empty() {
            None
        } else {
            Some(pts.iter().map(|p| p.sales).sum::<f64>() / pts.len() as f64)
        }
    };

    let before_avg = avg(&before);
    let after_avg = avg(&after);
    let change_pct = match (before_avg, after_avg) {
        (Some(b), Some(a)) if b > 0.0 => Some((a - b) / b * 100.0),
        _ => None,
    };

    PriceImpact {
        event_date,
        before_days: before.len(),
        after_days: after.len(),
        before_avg,
        after_avg,
        change_pct,
    }
}
