//! Shared dashboard logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! combined CSV -> dataset -> region filter -> daily aggregate -> chart + findings
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::path::Path;

use crate::chart::DashboardSpec;
use crate::domain::RegionFilter;
use crate::error::AppError;
use crate::io::dataset::{Dataset, load_dataset};
use crate::report::{DatasetStats, dataset_stats};

/// All computed outputs for one region selection.
#[derive(Debug, Clone)]
pub struct RegionView {
    pub dashboard: DashboardSpec,
    pub stats: DatasetStats,
}

/// Load the combined dataset once; the result is shared read-only afterwards.
pub fn load(path: &Path) -> Result<Dataset, AppError> {
    load_dataset(path)
}

/// Build the full view for `filter` from an already-loaded dataset.
pub fn build_view(dataset: &Dataset, filter: RegionFilter) -> RegionView {
    let dashboard = DashboardSpec::build(dataset, filter);
    let stats = dataset_stats(dataset.records(), &dashboard.chart.series, filter);
    RegionView { dashboard, stats }
}
