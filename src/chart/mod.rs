//! Chart specifications: the data-in/figure-out contract with renderers.
//!
//! [`compute_chart`] is the dashboard's update handler. It is pure: given the
//! shared dataset and a region selection it returns a fresh [`ChartSpec`]
//! which any host (the TUI, the ASCII plotter, or an external consumer of the
//! JSON export) can draw.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{DailyPoint, RegionFilter, price_increase_date};
use crate::io::dataset::Dataset;
use crate::report::daily_aggregate;

pub mod dashboard;

pub use dashboard::*;

/// Stable handle of the chart element.
pub const CHART_ELEMENT_ID: &str = "sales-line-chart";

pub const X_LABEL: &str = "Date";
pub const Y_LABEL: &str = "Total Sales ($)";

pub const MARKER_LABEL: &str = "Price Increase (Jan 15, 2021)";

/// A line chart of daily sales with one static vertical marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub element_id: String,
    pub title: String,
    pub region: RegionFilter,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<DailyPoint>,
    pub marker: Marker,
}

/// Vertical line at a fixed date, spanning the full plot height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub date: NaiveDate,
    pub label: String,
    pub color: String,
    pub width: u32,
    pub dash: String,
    /// Vertical extent in plot-relative coordinates (`0` bottom, `1` top).
    pub y_span: [f64; 2],
}

impl Marker {
    /// The price-increase marker. Identical for every region selection.
    pub fn price_increase() -> Self {
        Self {
            date: price_increase_date(),
            label: MARKER_LABEL.to_string(),
            color: "red".to_string(),
            width: 3,
            dash: "dash".to_string(),
            y_span: [0.0, 1.0],
        }
    }
}

pub fn chart_title(filter: RegionFilter) -> String {
    format!("Pink Morsel Sales Over Time ({})", filter.display_name())
}

/// Build the chart for `filter` from the shared dataset.
pub fn compute_chart(dataset: &Dataset, filter: RegionFilter) -> ChartSpec {
    ChartSpec {
        element_id: CHART_ELEMENT_ID.to_string(),
        title: chart_title(filter),
        region: filter,
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        series: daily_aggregate(dataset.records(), filter),
        marker: Marker::price_increase(),
    }
}

impl ChartSpec {
    /// Date range to draw: the series extent widened to include the marker,
    /// and never a single day.
    pub fn x_bounds(&self) -> (NaiveDate, NaiveDate) {
        let marker = self.marker.date;
        let first = self.series.first().map_or(marker, |p| p.date.min(marker));
        let last = self.series.last().map_or(marker, |p| p.date.max(marker));
        if first == last {
            let lo = first.checked_sub_days(Days::new(1)).unwrap_or(first);
            let hi = last.checked_add_days(Days::new(1)).unwrap_or(last);
            (lo, hi)
        } else {
            (first, last)
        }
    }

    /// Sales range to draw; starts at zero since sales are non-negative.
    pub fn y_bounds(&self) -> (f64, f64) {
        let max = self.series.iter().map(|p| p.sales).fold(0.0, f64::max);
        if max > 0.0 { (0.0, max) } else { (0.0, 1.0) }
    }

    pub fn total_sales(&self) -> f64 {
        self.series.iter().map(|p| p.sales).sum()
    }
}

/// Dates as plot coordinates (days since 0001-01-01).
pub fn date_to_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Region, SalesRecord};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scenario() -> Dataset {
        Dataset::from_records(vec![
            SalesRecord { sales: 3.0, date: ymd(2021, 1, 11), region: Region::West },
            SalesRecord { sales: 6.0, date: ymd(2021, 1, 10), region: Region::North },
        ])
    }

    #[test]
    fn all_regions_chart() {
        let chart = compute_chart(&scenario(), RegionFilter::All);
        assert_eq!(chart.element_id, "sales-line-chart");
        assert_eq!(chart.title, "Pink Morsel Sales Over Time (All Regions)");
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0], DailyPoint { date: ymd(2021, 1, 10), sales: 6.0 });
        assert_eq!(chart.series[1], DailyPoint { date: ymd(2021, 1, 11), sales: 3.0 });
    }

    #[test]
    fn empty_region_is_not_an_error() {
        let chart = compute_chart(&scenario(), RegionFilter::East);
        assert!(chart.series.is_empty());
        assert_eq!(chart.title, "Pink Morsel Sales Over Time (East)");
        assert_eq!(chart.total_sales(), 0.0);
    }

    #[test]
    fn marker_is_invariant_of_the_filter() {
        let ds = scenario();
        let expected = Marker::price_increase();
        for filter in RegionFilter::ALL {
            let chart = compute_chart(&ds, filter);
            assert_eq!(chart.marker, expected);
            assert!(chart.title.contains(filter.display_name()));
        }
        assert_eq!(expected.date, ymd(2021, 1, 15));
        assert_eq!(expected.y_span, [0.0, 1.0]);
    }

    #[test]
    fn marker_is_static_even_without_data() {
        let chart = compute_chart(&Dataset::default(), RegionFilter::All);
        assert_eq!(chart.marker.label, "Price Increase (Jan 15, 2021)");
        assert_eq!(chart.x_bounds(), (ymd(2021, 1, 14), ymd(2021, 1, 16)));
        assert_eq!(chart.y_bounds(), (0.0, 1.0));
    }

    #[test]
    fn x_bounds_include_marker() {
        let chart = compute_chart(&scenario(), RegionFilter::All);
        assert_eq!(chart.x_bounds(), (ymd(2021, 1, 10), ymd(2021, 1, 15)));
        assert_eq!(chart.y_bounds(), (0.0, 6.0));
    }

    #[test]
    fn date_coordinates_round_trip() {
        let d = ymd(2021, 1, 15);
        assert_eq!(x_to_date(date_to_x(d)), Some(d));
        assert_eq!(date_to_x(ymd(2021, 1, 16)) - date_to_x(d), 1.0);
    }
}
