//! Static page description of the dashboard.
//!
//! The page layout (headings, the region radio control and its five options)
//! is fixed configuration; only the chart and findings depend on data.

use serde::{Deserialize, Serialize};

use crate::chart::{ChartSpec, compute_chart};
use crate::domain::{RegionFilter, price_increase_date};
use crate::io::dataset::Dataset;
use crate::report::{PriceImpact, price_impact};

pub const DASHBOARD_HEADING: &str = "Soul Foods Pink Morsel Sales Dashboard";
pub const DASHBOARD_SUBHEADING: &str =
    "Analyzing sales before and after the price increase on January 15, 2021";

/// Stable handle of the region radio control.
pub const REGION_FILTER_ID: &str = "region-filter";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioOption {
    pub value: RegionFilter,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionControl {
    pub id: String,
    pub options: Vec<RadioOption>,
    pub selected: RegionFilter,
}

impl RegionControl {
    pub fn new(selected: RegionFilter) -> Self {
        Self {
            id: REGION_FILTER_ID.to_string(),
            options: RegionFilter::ALL
                .into_iter()
                .map(|value| RadioOption {
                    value,
                    label: value.display_name().to_string(),
                })
                .collect(),
            selected,
        }
    }
}

/// Everything a host needs to draw the page for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSpec {
    pub heading: String,
    pub subheading: String,
    pub region_control: RegionControl,
    pub chart: ChartSpec,
    pub findings: PriceImpact,
}

impl DashboardSpec {
    pub fn build(dataset: &Dataset, selected: RegionFilter) -> Self {
        let chart = compute_chart(dataset, selected);
        let findings = price_impact(&chart.series, price_increase_date());
        Self {
            heading: DASHBOARD_HEADING.to_string(),
            subheading: DASHBOARD_SUBHEADING.to_string(),
            region_control: RegionControl::new(selected),
            chart,
            findings,
        }
    }

    /// Apply a new selection, recomputing only the data-dependent parts.
    pub fn select(&mut self, dataset: &Dataset, selected: RegionFilter) {
        self.region_control.selected = selected;
        self.chart = compute_chart(dataset, selected);
        self.findings = price_impact(&self.chart.series, price_increase_date());
    }
}
